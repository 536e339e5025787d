//! イベントリスナー登録簿
//!
//! 要素の役割ごとにリスナーを保持する。破棄すると登録も外れる。

use gloo::events::EventListener;
use std::collections::HashMap;

/// リスナーを付ける要素の役割
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Hamburger,
    NavLink,
    LanguageButton,
    /// document に付ける委譲リスナー（後から追加されたサムネイルも対象）
    Thumbnail,
    ModalClose,
    ModalBackdrop,
    EscapeKey,
    /// モーダル画像の読込完了（1回限り）
    ModalImageLoad,
}

impl Role {
    /// ヘッダー断片に属する役割（ヘッダー再配線時に外す）
    pub fn is_header(&self) -> bool {
        matches!(self, Role::Hamburger | Role::NavLink | Role::LanguageButton)
    }
}

#[derive(Default)]
pub struct ListenerRegistry {
    listeners: HashMap<Role, Vec<EventListener>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, role: Role, listener: EventListener) {
        self.listeners.entry(role).or_default().push(listener);
    }

    /// 既存のリスナーを外してから登録
    pub fn replace(&mut self, role: Role, listener: EventListener) {
        self.clear(role);
        self.register(role, listener);
    }

    /// 役割のリスナーをすべて外し、外した数を返す
    pub fn clear(&mut self, role: Role) -> usize {
        self.listeners.remove(&role).map_or(0, |listeners| listeners.len())
    }

    pub fn clear_header(&mut self) {
        self.listeners.retain(|role, _| !role.is_header());
    }

    pub fn count(&self, role: Role) -> usize {
        self.listeners.get(&role).map_or(0, Vec::len)
    }
}


#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn button() -> web_sys::HtmlElement {
        web_sys::window()
            .unwrap()
            .document()
            .unwrap()
            .create_element("button")
            .unwrap()
            .dyn_into()
            .unwrap()
    }

    #[wasm_bindgen_test]
    fn wasm_clear_detaches_listeners() {
        let target = button();
        let clicks = Rc::new(Cell::new(0));
        let mut registry = ListenerRegistry::new();

        let counter = Rc::clone(&clicks);
        registry.register(
            Role::Hamburger,
            EventListener::new(&target, "click", move |_| counter.set(counter.get() + 1)),
        );
        target.click();
        assert_eq!(clicks.get(), 1);

        registry.clear_header();
        assert_eq!(registry.count(Role::Hamburger), 0);
        target.click();
        assert_eq!(clicks.get(), 1);
    }

    #[wasm_bindgen_test]
    fn wasm_replace_keeps_single_listener() {
        let target = button();
        let mut registry = ListenerRegistry::new();

        for _ in 0..3 {
            registry.replace(
                Role::ModalImageLoad,
                EventListener::once(&target, "load", |_| {}),
            );
        }
        assert_eq!(registry.count(Role::ModalImageLoad), 1);
    }
}
