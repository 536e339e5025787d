//! 言語設定の保存（localStorage）
//!
//! 値は言語コードをそのまま保存する（JSONで囲まない）。

use portfolio_common::{Error, PreferenceStore, Result};

use crate::dom::{self, js_error_message};

/// localStorage に保存する言語設定
#[derive(Debug, Clone)]
pub struct LocalPreferenceStore {
    key: String,
}

impl LocalPreferenceStore {
    pub fn new(key: &str) -> Self {
        Self { key: key.to_string() }
    }

    fn storage() -> Result<web_sys::Storage> {
        dom::window()?
            .local_storage()
            .map_err(|e| Error::Storage(js_error_message(&e)))?
            .ok_or_else(|| Error::Storage("localStorage is not available".into()))
    }
}

impl PreferenceStore for LocalPreferenceStore {
    fn load_language(&self) -> Option<String> {
        Self::storage().ok()?.get_item(&self.key).ok().flatten()
    }

    fn save_language(&mut self, code: &str) -> Result<()> {
        Self::storage()?
            .set_item(&self.key, code)
            .map_err(|e| Error::Storage(js_error_message(&e)))
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use portfolio_common::{AppContext, Language};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_language_survives_reload() {
        let key = "portfolio-test-language";
        let mut store = LocalPreferenceStore::new(key);
        store.save_language("en").unwrap();

        let mut context = AppContext::new(store.clone());
        let (_, saved) = context.select_language(Language::Nl);
        assert!(saved.is_ok());

        let reloaded = AppContext::new(LocalPreferenceStore::new(key));
        assert_eq!(reloaded.language(), Language::Nl);
        assert_eq!(store.load_language().as_deref(), Some("nl"));

        LocalPreferenceStore::storage().unwrap().remove_item(key).unwrap();
    }
}
