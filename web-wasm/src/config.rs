//! ページ埋め込みの設定読込
//!
//! `<script id="site-config" type="application/json">` があればその内容で既定値を上書きする。

use gloo::console;
use portfolio_common::SiteConfig;

use crate::dom;

pub const CONFIG_ELEMENT_ID: &str = "site-config";

/// 設定を読み込む。無い・不正な場合は既定値
pub fn load_site_config() -> SiteConfig {
    let Some(element) = dom::element_by_id(CONFIG_ELEMENT_ID) else {
        return SiteConfig::default();
    };
    let json = element.text_content().unwrap_or_default();

    match SiteConfig::from_json(&json) {
        Ok(config) => config,
        Err(e) => {
            console::warn!(format!("Invalid #{}, using defaults: {}", CONFIG_ELEMENT_ID, e));
            SiteConfig::default()
        }
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use portfolio_common::CaptionFormat;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn with_config_script<F: FnOnce()>(json: &str, f: F) {
        let document = dom::document().unwrap();
        let script = document.create_element("script").unwrap();
        script.set_id(CONFIG_ELEMENT_ID);
        script.set_attribute("type", "application/json").unwrap();
        script.set_text_content(Some(json));
        document.body().unwrap().append_child(&script).unwrap();
        f();
        script.remove();
    }

    #[wasm_bindgen_test]
    fn wasm_defaults_without_script() {
        let config = load_site_config();
        assert_eq!(config.header_url, "components/header.html");
    }

    #[wasm_bindgen_test]
    fn wasm_inline_override() {
        with_config_script(r#"{"captionFormat": "flat"}"#, || {
            assert_eq!(load_site_config().caption_format, CaptionFormat::Flat);
        });
    }

    #[wasm_bindgen_test]
    fn wasm_invalid_script_falls_back() {
        with_config_script("{not json", || {
            assert_eq!(load_site_config().caption_format, CaptionFormat::Structured);
        });
    }
}
