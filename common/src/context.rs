//! アプリケーションコンテキスト
//!
//! 表示言語・キャプションストア・読込世代番号をまとめて保持する。
//! キャプション読込は「最後に発行した要求が勝つ」。古い世代の応答は破棄する。

use crate::error::Result;
use crate::language::Language;
use crate::types::CaptionStore;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// 言語設定の永続化先
pub trait PreferenceStore {
    fn load_language(&self) -> Option<String>;
    fn save_language(&mut self, code: &str) -> Result<()>;
}

/// メモリ上の保存先
///
/// クローン同士で中身を共有するので、再読込のシミュレーションに使える。
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: Rc<RefCell<HashMap<String, String>>>,
    key: String,
}

impl MemoryPreferenceStore {
    pub fn new(key: &str) -> Self {
        Self {
            values: Rc::default(),
            key: key.to_string(),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load_language(&self) -> Option<String> {
        self.values.borrow().get(&self.key).cloned()
    }

    fn save_language(&mut self, code: &str) -> Result<()> {
        self.values
            .borrow_mut()
            .insert(self.key.clone(), code.to_string());
        Ok(())
    }
}

/// キャプション読込要求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptionRequest {
    pub language: Language,
    pub generation: u64,
}

/// アプリケーションコンテキスト
#[derive(Debug)]
pub struct AppContext<S: PreferenceStore> {
    store: S,
    language: Language,
    captions: CaptionStore,
    generation: u64,
}

impl<S: PreferenceStore> AppContext<S> {
    /// 保存済みの言語設定から初期化（無ければ英語）
    pub fn new(store: S) -> Self {
        let language = Language::from_stored(store.load_language().as_deref());
        Self {
            store,
            language,
            captions: CaptionStore::new(),
            generation: 0,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn captions(&self) -> &CaptionStore {
        &self.captions
    }

    /// 現在の言語で読込要求を発行
    pub fn request_captions(&mut self) -> CaptionRequest {
        self.generation += 1;
        CaptionRequest {
            language: self.language,
            generation: self.generation,
        }
    }

    /// 言語を切り替えて保存し、読込要求を発行
    ///
    /// 保存に失敗しても言語は切り替える（このページ表示中のみ有効）。
    pub fn select_language(&mut self, language: Language) -> (CaptionRequest, Result<()>) {
        self.language = language;
        let saved = self.store.save_language(language.code());
        (self.request_captions(), saved)
    }

    /// 読込結果を反映。最新の要求に対する結果のみ受け付ける
    pub fn accept_captions(&mut self, request: CaptionRequest, captions: CaptionStore) -> bool {
        if request.generation != self.generation {
            return false;
        }
        self.captions = captions;
        true
    }

    /// 要求が最新かどうか
    pub fn is_current(&self, request: CaptionRequest) -> bool {
        request.generation == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_flat;

    #[test]
    fn test_default_language_when_unset() {
        let context = AppContext::new(MemoryPreferenceStore::new("language"));
        assert_eq!(context.language(), Language::En);
    }

    #[test]
    fn test_language_survives_reload() {
        let store = MemoryPreferenceStore::new("language");

        let mut context = AppContext::new(store.clone());
        assert_eq!(context.language(), Language::En);
        let (request, saved) = context.select_language(Language::Nl);
        assert!(saved.is_ok());
        assert_eq!(request.language, Language::Nl);

        // 再読込
        let reloaded = AppContext::new(store.clone());
        assert_eq!(reloaded.language(), Language::Nl);
        assert_eq!(store.load_language().as_deref(), Some("nl"));
    }

    #[test]
    fn test_unknown_stored_value_defaults() {
        let mut store = MemoryPreferenceStore::new("language");
        store.save_language("de").unwrap();
        assert_eq!(AppContext::new(store).language(), Language::En);
    }

    #[test]
    fn test_last_request_wins() {
        let mut context = AppContext::new(MemoryPreferenceStore::new("language"));
        let (first, _) = context.select_language(Language::Nl);
        let (second, _) = context.select_language(Language::En);

        // 新しい要求の応答が先に届く
        assert!(context.accept_captions(second, parse_flat("home.title=Welcome")));
        // 古い要求の応答は破棄
        assert!(!context.is_current(first));
        assert!(!context.accept_captions(first, parse_flat("home.title=Welkom")));

        assert_eq!(context.captions().text("home", "title").as_deref(), Some("Welcome"));
    }

    #[test]
    fn test_accept_replaces_whole_store() {
        let mut context = AppContext::new(MemoryPreferenceStore::new("language"));
        let request = context.request_captions();
        context.accept_captions(request, parse_flat("home.title=Welcome\nnav.home=Home"));

        let request = context.request_captions();
        context.accept_captions(request, parse_flat("nav.home=Start"));

        assert!(context.captions().get("home", "title").is_none());
        assert_eq!(context.captions().len(), 1);
    }

    #[test]
    fn test_save_failure_still_switches() {
        struct FailingStore;
        impl PreferenceStore for FailingStore {
            fn load_language(&self) -> Option<String> {
                None
            }
            fn save_language(&mut self, _code: &str) -> Result<()> {
                Err(crate::error::Error::Storage("quota exceeded".into()))
            }
        }

        let mut context = AppContext::new(FailingStore);
        let (request, saved) = context.select_language(Language::Nl);
        assert!(saved.is_err());
        assert_eq!(request.language, Language::Nl);
        assert_eq!(context.language(), Language::Nl);
    }
}
