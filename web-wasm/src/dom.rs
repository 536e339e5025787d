//! DOM操作ヘルパー
//!
//! 要素が見つからない場合はエラーにせず何もしない。

use futures::channel::oneshot;
use gloo::events::EventListener;
use portfolio_common::{Content, Error, FieldUpdate, Result, Target};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| Error::Dom("window is not available".into()))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| Error::Dom("document is not available".into()))
}

pub fn element_by_id(id: &str) -> Option<Element> {
    document().ok()?.get_element_by_id(id)
}

/// IDで要素を取得し、指定の型に変換
pub fn typed_element_by_id<T: JsCast>(id: &str) -> Option<T> {
    element_by_id(id)?.dyn_into::<T>().ok()
}

/// セレクタに一致する要素をすべて取得
pub fn query_all(selector: &str) -> Vec<Element> {
    let Ok(document) = document() else {
        return Vec::new();
    };
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// JSの例外値からメッセージを取り出す
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn resolve_target(document: &Document, target: Target) -> Option<Element> {
    match target {
        Target::Id(id) => document.get_element_by_id(id),
        Target::Selector(selector) => document.query_selector(selector).ok().flatten(),
    }
}

/// フィールド更新を適用し、書き込めた件数を返す
///
/// 要素が無いフィールドは読み飛ばす。1件の失敗は他に影響しない。
pub fn apply_field_updates(updates: &[FieldUpdate]) -> Result<usize> {
    let document = document()?;
    let mut applied = 0;

    for update in updates {
        let Some(element) = resolve_target(&document, update.target) else {
            continue;
        };
        match &update.content {
            Content::Text(text) => element.set_text_content(Some(text)),
            Content::Html(html) => element.set_inner_html(html),
        }
        applied += 1;
    }

    Ok(applied)
}

/// DOMContentLoaded を待つ（解析済みなら即時）
pub async fn wait_for_dom_ready() -> Result<()> {
    let document = document()?;
    if document.ready_state() != "loading" {
        return Ok(());
    }

    let (tx, rx) = oneshot::channel::<()>();
    let _listener = EventListener::once(&document, "DOMContentLoaded", move |_| {
        let _ = tx.send(());
    });

    rx.await
        .map_err(|_| Error::Dom("DOMContentLoaded listener was dropped".into()))
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn append(html: &str) -> Element {
        let document = document().unwrap();
        let root = document.create_element("div").unwrap();
        root.set_inner_html(html);
        document.body().unwrap().append_child(&root).unwrap();
        root
    }

    #[wasm_bindgen_test]
    fn wasm_apply_field_updates_skips_missing_elements() {
        let root = append(r#"<h1 id="about-title"></h1><p id="contact-p1"></p>"#);

        let updates = vec![
            FieldUpdate {
                target: Target::Id("about-title"),
                content: Content::Text("<b>About</b>".into()),
            },
            FieldUpdate {
                target: Target::Id("nav-home"),
                content: Content::Text("Home".into()),
            },
            FieldUpdate {
                target: Target::Id("contact-p1"),
                content: Content::Html("Mail <strong>me</strong>".into()),
            },
        ];

        assert_eq!(apply_field_updates(&updates).unwrap(), 2);

        let title = element_by_id("about-title").unwrap();
        assert_eq!(title.text_content().unwrap(), "<b>About</b>");
        assert_eq!(title.child_element_count(), 0);

        let contact = element_by_id("contact-p1").unwrap();
        assert_eq!(contact.inner_html(), "Mail <strong>me</strong>");

        root.remove();
    }

    #[wasm_bindgen_test]
    fn wasm_query_all_collects_elements() {
        let root = append(r#"<a class="probe-link"></a><a class="probe-link"></a>"#);
        assert_eq!(query_all(".probe-link").len(), 2);
        root.remove();
    }

    #[wasm_bindgen_test]
    async fn wasm_dom_ready_resolves() {
        assert!(wait_for_dom_ready().await.is_ok());
    }
}
