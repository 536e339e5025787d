//! キャプションの描画モデル
//!
//! キャプションストアから「どの要素に何を書くか」の一覧を作る。
//! DOMには触れないので、ブラウザ無しでテストできる。

use crate::types::CaptionStore;

/// 書き込み先
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// 要素ID
    Id(&'static str),
    /// CSSセレクタ（最初に一致した要素）
    Selector(&'static str),
}

/// 書き込む内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// textContent として設定（マークアップは解釈しない）
    Text(String),
    /// innerHTML として設定
    Html(String),
}

/// 1フィールド分の更新
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdate {
    pub target: Target,
    pub content: Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Text,
    /// メールアドレスを <strong> で囲んでHTMLとして書く
    EmailHtml,
}

struct Field {
    section: &'static str,
    item: &'static str,
    target: Target,
    kind: FieldKind,
}

const fn text(section: &'static str, item: &'static str, id: &'static str) -> Field {
    Field { section, item, target: Target::Id(id), kind: FieldKind::Text }
}

/// 翻訳対象フィールドの一覧
const FIELDS: &[Field] = &[
    text("header", "title", "header-title"),
    text("nav", "home", "nav-home"),
    text("nav", "pictures", "nav-pictures"),
    text("nav", "paintings", "nav-paintings"),
    text("nav", "about", "nav-about"),
    Field {
        section: "home",
        item: "title",
        target: Target::Selector(".home-svg-container figcaption"),
        kind: FieldKind::Text,
    },
    text("home", "description", "home-description"),
    text("about", "title", "about-title"),
    text("about", "paragraph1", "about-p1"),
    text("about", "paragraph2", "about-p2"),
    text("contact", "title", "contact-title"),
    Field {
        section: "contact",
        item: "paragraph1",
        target: Target::Id("contact-p1"),
        kind: FieldKind::EmailHtml,
    },
    text("contact", "paragraph2", "contact-p2"),
    text("pictures", "title", "pictures-title"),
    text("paintings", "title", "paintings-title"),
    text("thanks", "title", "thanks-title"),
    text("thanks", "paragraph1", "thanks-p1"),
    text("thanks", "link", "thanks-link"),
    text("form", "name", "form-name-label"),
    text("form", "email", "form-email-label"),
    text("form", "message", "form-message-label"),
    text("form", "submit", "form-submit"),
];

/// ストアからフィールド更新一覧を作る
///
/// ストアに無い・空の項目は含めない。各フィールドは互いに独立。
pub fn render_fields(store: &CaptionStore, contact_email: &str) -> Vec<FieldUpdate> {
    FIELDS
        .iter()
        .filter_map(|field| {
            let value = store.text(field.section, field.item)?;
            let content = match field.kind {
                FieldKind::Text => Content::Text(value),
                FieldKind::EmailHtml => Content::Html(emphasize_email(&value, contact_email)),
            };
            Some(FieldUpdate { target: field.target, content })
        })
        .collect()
}

/// 最初に現れるメールアドレスを <strong> で囲む
///
/// それ以外の文字はエスケープしない。
pub fn emphasize_email(text: &str, email: &str) -> String {
    if email.is_empty() {
        return text.to_string();
    }
    text.replacen(email, &format!("<strong>{}</strong>", email), 1)
}
