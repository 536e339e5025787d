//! ヘッダーコンポーネント
//!
//! 共通ヘッダーのHTML断片を取得して差し込み、メニュー開閉と言語切替を配線する。
//! 取得に失敗した場合はヘッダー無しのまま表示を続ける。

use std::rc::Rc;

use gloo::events::EventListener;
use portfolio_common::{Language, Result};

use crate::api::fetch_text;
use crate::app::App;
use crate::dom;
use crate::listeners::Role;

pub const HEADER_CONTAINER_ID: &str = "header-container";
const HAMBURGER_ID: &str = "hamburger";
const NAV_ID: &str = "site-nav";
const NAV_LINK_SELECTOR: &str = ".site-nav a";
const LANGUAGE_BUTTON_SELECTOR: &str = ".lang-flag";
const MENU_OPEN_CLASS: &str = "show";
const ACTIVE_CLASS: &str = "active";

/// ヘッダー断片を読み込んで配線する
///
/// 差し込み先が無いページでは何もしない。
pub async fn load_header(app: &Rc<App>) -> Result<()> {
    if dom::element_by_id(HEADER_CONTAINER_ID).is_none() {
        return Ok(());
    }

    let html = fetch_text(&app.config().header_url).await?;

    // 取得中にDOMが変わっている可能性があるので取り直す
    if let Some(container) = dom::element_by_id(HEADER_CONTAINER_ID) {
        container.set_inner_html(&html);
        wire_header(app);
    }
    Ok(())
}

/// ヘッダー内の要素にリスナーを付ける
pub fn wire_header(app: &Rc<App>) {
    let mut listeners = app.listeners();
    listeners.clear_header();

    if let (Some(hamburger), Some(nav)) =
        (dom::element_by_id(HAMBURGER_ID), dom::element_by_id(NAV_ID))
    {
        let menu = nav.clone();
        listeners.register(
            Role::Hamburger,
            EventListener::new(&hamburger, "click", move |_| {
                let _ = menu.class_list().toggle(MENU_OPEN_CLASS);
            }),
        );

        for link in dom::query_all(NAV_LINK_SELECTOR) {
            let menu = nav.clone();
            listeners.register(
                Role::NavLink,
                EventListener::new(&link, "click", move |_| {
                    let _ = menu.class_list().remove_1(MENU_OPEN_CLASS);
                }),
            );
        }
    }

    for language in Language::ALL {
        let Some(button) = dom::element_by_id(&language.button_id()) else {
            continue;
        };
        let app = Rc::clone(app);
        listeners.register(
            Role::LanguageButton,
            EventListener::new(&button, "click", move |_| app.set_language(language)),
        );
    }
    drop(listeners);

    mark_active_language(app.language());
}

/// 選択中の言語ボタンだけに active を付ける
pub fn mark_active_language(language: Language) {
    for button in dom::query_all(LANGUAGE_BUTTON_SELECTOR) {
        let _ = button.class_list().remove_1(ACTIVE_CLASS);
    }
    if let Some(button) = dom::element_by_id(&language.button_id()) {
        let _ = button.class_list().add_1(ACTIVE_CLASS);
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use portfolio_common::SiteConfig;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const HEADER: &str = r##"
        <button id="hamburger"></button>
        <nav id="site-nav" class="site-nav"><a id="nav-home" href="#">Home</a></nav>
        <button id="lang-en" class="lang-flag"></button>
        <button id="lang-nl" class="lang-flag"></button>
    "##;

    fn click(id: &str) {
        dom::typed_element_by_id::<web_sys::HtmlElement>(id).unwrap().click();
    }

    fn has_class(id: &str, class: &str) -> bool {
        dom::element_by_id(id).unwrap().class_list().contains(class)
    }

    #[wasm_bindgen_test]
    fn wasm_header_wiring() {
        let document = dom::document().unwrap();
        let container = document.create_element("div").unwrap();
        container.set_id(HEADER_CONTAINER_ID);
        container.set_inner_html(HEADER);
        document.body().unwrap().append_child(&container).unwrap();

        let app = Rc::new(App::new(SiteConfig::default()));
        wire_header(&app);
        assert_eq!(app.listeners().count(Role::LanguageButton), 2);
        assert_eq!(app.listeners().count(Role::NavLink), 1);

        click(HAMBURGER_ID);
        assert!(has_class(NAV_ID, MENU_OPEN_CLASS));
        click("nav-home");
        assert!(!has_class(NAV_ID, MENU_OPEN_CLASS));

        mark_active_language(Language::Nl);
        assert!(has_class("lang-nl", ACTIVE_CLASS));
        assert!(!has_class("lang-en", ACTIVE_CLASS));

        // 再配線しても重複しない
        wire_header(&app);
        assert_eq!(app.listeners().count(Role::LanguageButton), 2);

        container.remove();
    }
}
