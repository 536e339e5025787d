//! キャプション文書パーサー
//!
//! 2形式に対応する:
//! 1. フラット形式: 1行1項目の `section.item=value`
//! 2. 構造化形式: `{ "en": { "home": { "title": ... } }, "nl": { ... } }`

use crate::config::CaptionFormat;
use crate::error::{Error, Result};
use crate::language::Language;
use crate::types::{CaptionStore, CaptionValue};
use serde_json::{Map, Value};

/// 構造化形式で該当言語が無いときに使う言語
const FALLBACK_LANGUAGE: Language = Language::En;

/// キャプション文書を形式に応じてパース
pub fn parse_caption_document(
    format: CaptionFormat,
    document: &str,
    language: Language,
) -> Result<CaptionStore> {
    match format {
        CaptionFormat::Flat => Ok(parse_flat(document)),
        CaptionFormat::Structured => parse_structured(document, language.code()),
    }
}

/// フラット形式をパース
///
/// 空行、`=` を含まない行、キーが `.` で2つに分かれない行は無視する。
/// 値は最初の `=` 以降すべてで、2つ目以降の `=` では切らない
/// （`about.p1=a=b` の値は `a=b`）。
///
/// # Examples
/// ```
/// use portfolio_common::parse_flat;
///
/// let store = parse_flat("home.title=Welcome\nbroken line\n");
/// assert_eq!(store.text("home", "title").as_deref(), Some("Welcome"));
/// assert_eq!(store.len(), 1);
/// ```
pub fn parse_flat(text: &str) -> CaptionStore {
    let mut store = CaptionStore::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let mut parts = key.split('.');
        if let (Some(section), Some(item), None) = (parts.next(), parts.next(), parts.next()) {
            store.insert(section, item, CaptionValue::from(value));
        }
    }

    store
}

/// 構造化形式をパースし、指定言語のストアを作る
pub fn parse_structured(json: &str, language: &str) -> Result<CaptionStore> {
    let document: Value = serde_json::from_str(json.trim())?;
    if !document.is_object() {
        return Err(Error::Parse("キャプション文書のトップレベルがオブジェクトではありません".into()));
    }

    Ok(select_language(&document, language)
        .map(store_from_sections)
        .unwrap_or_default())
}

/// 言語を選択
///
/// 完全一致 → 英語 → なし（空ストア扱い）の順。
/// オブジェクトでない言語値は存在しないものとして扱う。
pub fn select_language<'a>(document: &'a Value, language: &str) -> Option<&'a Map<String, Value>> {
    document
        .get(language)
        .and_then(Value::as_object)
        .or_else(|| document.get(FALLBACK_LANGUAGE.code()).and_then(Value::as_object))
}

/// セクション → 項目 のマップからストアを作る
///
/// 形式に合わない値は読み飛ばす（描画されないだけでエラーにはしない）。
fn store_from_sections(sections: &Map<String, Value>) -> CaptionStore {
    let mut store = CaptionStore::new();

    for (section, items) in sections {
        let Some(items) = items.as_object() else {
            continue;
        };
        for (item, value) in items {
            if let Ok(value) = serde_json::from_value::<CaptionValue>(value.clone()) {
                store.insert(section, item, value);
            }
        }
    }

    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CaptionEntry;

    // =============================================
    // parse_flat テスト
    // =============================================

    #[test]
    fn test_parse_flat_basic() {
        let text = "home.title=Welcome\nabout.paragraph1=I paint.\n";
        let store = parse_flat(text);

        assert_eq!(store.text("home", "title").as_deref(), Some("Welcome"));
        assert_eq!(store.text("about", "paragraph1").as_deref(), Some("I paint."));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_parse_flat_ignores_invalid_lines() {
        let text = "\
no equals sign here
title=missing section
a.b.c=three parts


nav.home=Home";
        let store = parse_flat(text);

        assert_eq!(store.len(), 1);
        assert_eq!(store.text("nav", "home").as_deref(), Some("Home"));
    }

    #[test]
    fn test_parse_flat_trims_lines() {
        let store = parse_flat("   pictures.sunset=Sunset over the bay   \r\n");
        assert_eq!(
            store.text("pictures", "sunset").as_deref(),
            Some("Sunset over the bay")
        );
    }

    #[test]
    fn test_parse_flat_value_keeps_later_equals() {
        let store = parse_flat("contact.paragraph2=a=b");
        assert_eq!(store.text("contact", "paragraph2").as_deref(), Some("a=b"));
    }

    #[test]
    fn test_parse_flat_last_duplicate_wins() {
        let store = parse_flat("home.title=One\nhome.title=Two");
        assert_eq!(store.text("home", "title").as_deref(), Some("Two"));
    }

    #[test]
    fn test_parse_flat_empty() {
        assert!(parse_flat("").is_empty());
    }

    // =============================================
    // parse_structured テスト
    // =============================================

    const DOC: &str = r#"{
        "en": {
            "home": {"title": "Welcome"},
            "pictures": {
                "sunset": {"title": "Sunset", "description": ["Evening", "glow"]}
            }
        },
        "nl": {
            "home": {"title": "Welkom"}
        }
    }"#;

    #[test]
    fn test_parse_structured_exact_language() {
        let store = parse_structured(DOC, "nl").unwrap();
        assert_eq!(store.text("home", "title").as_deref(), Some("Welkom"));
        // 英語側の項目は混ざらない
        assert!(store.get("pictures", "sunset").is_none());
    }

    #[test]
    fn test_parse_structured_falls_back_to_english() {
        let store = parse_structured(DOC, "xx").unwrap();
        assert_eq!(store.text("home", "title").as_deref(), Some("Welcome"));
        assert_eq!(
            store.get("pictures", "sunset"),
            Some(&CaptionValue::Entry(CaptionEntry {
                title: "Sunset".into(),
                description: crate::types::CaptionText::Fragments(vec![
                    "Evening".into(),
                    "glow".into()
                ]),
            }))
        );
    }

    #[test]
    fn test_parse_structured_no_language_is_empty() {
        let store = parse_structured(r#"{"de": {"home": {"title": "Willkommen"}}}"#, "nl").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_select_language_returns_subtree() {
        let document: Value = serde_json::from_str(DOC).unwrap();
        let selected = select_language(&document, "nl").unwrap();
        assert_eq!(Some(selected), document["nl"].as_object());

        let fallback = select_language(&document, "xx").unwrap();
        assert_eq!(Some(fallback), document["en"].as_object());
    }

    #[test]
    fn test_select_language_non_object_falls_back() {
        let document: Value = serde_json::from_str(r#"{"en": {"a": {}}, "nl": null}"#).unwrap();
        let selected = select_language(&document, "nl").unwrap();
        assert!(selected.contains_key("a"));
    }

    #[test]
    fn test_parse_structured_skips_unusable_values() {
        let json = r#"{"en": {
            "home": {"title": "Welcome", "count": 3, "flag": true},
            "broken": "not a section"
        }}"#;
        let store = parse_structured(json, "en").unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.section("broken").is_none());
    }

    #[test]
    fn test_parse_structured_rejects_non_object() {
        assert!(matches!(parse_structured("[1, 2]", "en"), Err(Error::Parse(_))));
        assert!(matches!(parse_structured("{", "en"), Err(Error::Json(_))));
    }

    #[test]
    fn test_parse_caption_document_dispatch() {
        let flat =
            parse_caption_document(CaptionFormat::Flat, "nav.about=Over", Language::Nl).unwrap();
        assert_eq!(flat.text("nav", "about").as_deref(), Some("Over"));

        let structured =
            parse_caption_document(CaptionFormat::Structured, DOC, Language::Nl).unwrap();
        assert_eq!(structured.text("home", "title").as_deref(), Some("Welkom"));
    }
}
