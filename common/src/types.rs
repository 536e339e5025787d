//! キャプションの型定義
//!
//! 構造化キャプション文書の値は3形式:
//! - 文字列: そのまま表示
//! - 文字列配列: 半角スペースで連結して表示
//! - `{title, description}`: モーダルでタイトル＋説明として表示

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 説明文（文字列または文字列配列）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CaptionText {
    Single(String),
    Fragments(Vec<String>),
}

impl Default for CaptionText {
    fn default() -> Self {
        CaptionText::Single(String::new())
    }
}

impl CaptionText {
    /// 表示用文字列（配列は半角スペースで連結）
    pub fn joined(&self) -> String {
        match self {
            CaptionText::Single(text) => text.clone(),
            CaptionText::Fragments(parts) => parts.join(" "),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CaptionText::Single(text) => text.is_empty(),
            CaptionText::Fragments(parts) => parts.iter().all(|p| p.is_empty()),
        }
    }
}

/// タイトル＋説明のキャプション
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionEntry {
    pub title: String,
    pub description: CaptionText,
}

/// キャプション値
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CaptionValue {
    Text(String),
    Fragments(Vec<String>),
    Entry(CaptionEntry),
}

impl CaptionValue {
    /// ページ上のテキスト要素に流し込む文字列
    ///
    /// `Entry` はタイトルのみを使う。
    pub fn display_text(&self) -> String {
        match self {
            CaptionValue::Text(text) => text.clone(),
            CaptionValue::Fragments(parts) => parts.join(" "),
            CaptionValue::Entry(entry) => entry.title.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CaptionValue::Text(text) => text.is_empty(),
            CaptionValue::Fragments(parts) => parts.iter().all(|p| p.is_empty()),
            CaptionValue::Entry(entry) => entry.title.is_empty() && entry.description.is_empty(),
        }
    }
}

impl From<&str> for CaptionValue {
    fn from(text: &str) -> Self {
        CaptionValue::Text(text.to_string())
    }
}

/// キャプションストア: セクション名 → 項目キー → 値
///
/// 言語切替のたびに丸ごと作り直す。部分更新はしない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptionStore {
    sections: BTreeMap<String, BTreeMap<String, CaptionValue>>,
}

impl CaptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 値を登録（同じキーは後勝ち）
    pub fn insert(&mut self, section: &str, item: &str, value: CaptionValue) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(item.to_string(), value);
    }

    pub fn get(&self, section: &str, item: &str) -> Option<&CaptionValue> {
        self.sections.get(section).and_then(|items| items.get(item))
    }

    pub fn section(&self, section: &str) -> Option<&BTreeMap<String, CaptionValue>> {
        self.sections.get(section)
    }

    /// 空でない表示文字列を取得
    pub fn text(&self, section: &str, item: &str) -> Option<String> {
        self.get(section, item)
            .map(CaptionValue::display_text)
            .filter(|text| !text.is_empty())
    }

    /// 登録されている項目の総数
    pub fn len(&self) -> usize {
        self.sections.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_value_deserialize_text() {
        let value: CaptionValue = serde_json::from_str(r#""Hello""#).unwrap();
        assert_eq!(value, CaptionValue::Text("Hello".to_string()));
        assert_eq!(value.display_text(), "Hello");
    }

    #[test]
    fn test_caption_value_deserialize_fragments() {
        let value: CaptionValue = serde_json::from_str(r#"["Evening", "glow"]"#).unwrap();
        assert_eq!(value.display_text(), "Evening glow");
    }

    #[test]
    fn test_caption_value_deserialize_entry() {
        let json = r#"{"title": "Sunset", "description": ["Evening", "glow"]}"#;
        let value: CaptionValue = serde_json::from_str(json).unwrap();

        match value {
            CaptionValue::Entry(entry) => {
                assert_eq!(entry.title, "Sunset");
                assert_eq!(entry.description.joined(), "Evening glow");
            }
            other => panic!("Expected Entry, got {:?}", other),
        }
    }

    #[test]
    fn test_caption_entry_missing_description() {
        let json = r#"{"title": "Harbour"}"#;
        let value: CaptionValue = serde_json::from_str(json).unwrap();

        assert_eq!(value.display_text(), "Harbour");
        if let CaptionValue::Entry(entry) = value {
            assert!(entry.description.is_empty());
        } else {
            panic!("Expected Entry");
        }
    }

    #[test]
    fn test_caption_value_is_empty() {
        assert!(CaptionValue::from("").is_empty());
        assert!(CaptionValue::Fragments(vec![]).is_empty());
        assert!(CaptionValue::Entry(CaptionEntry::default()).is_empty());
        assert!(!CaptionValue::from("x").is_empty());
    }

    #[test]
    fn test_store_insert_and_get() {
        let mut store = CaptionStore::new();
        store.insert("home", "title", "Welcome".into());
        store.insert("home", "title", "Welkom".into());
        store.insert("nav", "about", "About".into());

        assert_eq!(store.text("home", "title").as_deref(), Some("Welkom"));
        assert_eq!(store.len(), 2);
        assert!(store.get("home", "missing").is_none());
        assert!(store.get("missing", "title").is_none());
    }

    #[test]
    fn test_store_text_skips_empty() {
        let mut store = CaptionStore::new();
        store.insert("about", "paragraph2", "".into());
        assert!(store.text("about", "paragraph2").is_none());
    }
}
