//! アプリケーションコントローラー
//!
//! 言語・キャプション・モーダル状態・リスナー登録簿を1か所で保持し、
//! ページ読込からの処理順を制御する。
//!
//! 1. DOMContentLoaded を待つ
//! 2. モーダルのリスナーを登録
//! 3. ヘッダー読込 → キャプション読込（並行して）
//! 4. 一定時間待ってからギャラリーを組み立てる

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use gloo::console;
use gloo::timers::future::TimeoutFuture;
use leptos::prelude::*;
use portfolio_common::{
    parse_caption_document, render_fields, AppContext, AverageColorExtractor, CaptionRequest,
    CaptionStore, Language, ModalState, Result, SiteConfig,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlImageElement;

use crate::api::fetch_text;
use crate::color::CanvasColorExtractor;
use crate::components::{gallery, header, modal};
use crate::config::load_site_config;
use crate::dom;
use crate::listeners::ListenerRegistry;
use crate::storage::LocalPreferenceStore;

/// アプリケーション全体の状態
pub struct App {
    config: SiteConfig,
    context: RefCell<AppContext<LocalPreferenceStore>>,
    listeners: RefCell<ListenerRegistry>,
    modal_state: RwSignal<ModalState>,
    color_extractor: Box<dyn AverageColorExtractor<HtmlImageElement>>,
}

impl App {
    pub fn new(config: SiteConfig) -> Self {
        let store = LocalPreferenceStore::new(&config.language_storage_key);
        Self {
            config,
            context: RefCell::new(AppContext::new(store)),
            listeners: RefCell::new(ListenerRegistry::new()),
            modal_state: RwSignal::new(ModalState::default()),
            color_extractor: Box::new(CanvasColorExtractor),
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn language(&self) -> Language {
        self.context.borrow().language()
    }

    pub fn captions(&self) -> Ref<'_, CaptionStore> {
        Ref::map(self.context.borrow(), |context| context.captions())
    }

    pub fn listeners(&self) -> RefMut<'_, ListenerRegistry> {
        self.listeners.borrow_mut()
    }

    pub fn modal_state(&self) -> RwSignal<ModalState> {
        self.modal_state
    }

    pub fn color_extractor(&self) -> &dyn AverageColorExtractor<HtmlImageElement> {
        self.color_extractor.as_ref()
    }

    /// ページ読込後の処理
    pub async fn run(self: Rc<Self>) {
        modal::install(&self);

        spawn_local(Rc::clone(&self).load_header_then_captions());

        TimeoutFuture::new(self.config.gallery_delay_ms).await;
        gallery::load_galleries(&self.config).await;
    }

    async fn load_header_then_captions(self: Rc<Self>) {
        if let Err(e) = header::load_header(&self).await {
            console::error!(format!("Failed to load header: {}", e));
        }

        let request = self.context.borrow_mut().request_captions();
        self.load_captions(request).await;
    }

    /// 言語を切り替え、キャプションを読み直す
    pub fn set_language(self: &Rc<Self>, language: Language) {
        let (request, saved) = self.context.borrow_mut().select_language(language);
        if let Err(e) = saved {
            console::warn!(format!("Failed to save language preference: {}", e));
        }

        header::mark_active_language(language);
        spawn_local(Rc::clone(self).load_captions(request));
    }

    async fn fetch_captions(&self, request: CaptionRequest) -> Result<CaptionStore> {
        let url = self.config.caption_url(request.language);
        let document = fetch_text(url).await?;
        parse_caption_document(self.config.caption_format, &document, request.language)
    }

    /// キャプションを取得してページに反映
    ///
    /// 取得中に新しい要求が出ていれば、この応答は捨てる。
    pub async fn load_captions(self: Rc<Self>, request: CaptionRequest) {
        let store = match self.fetch_captions(request).await {
            Ok(store) => store,
            Err(e) => {
                console::error!(format!("Failed to load captions ({}): {}", request.language, e));
                return;
            }
        };

        if !self.context.borrow_mut().accept_captions(request, store) {
            console::log!(format!(
                "Discarded stale captions ({}, request #{})",
                request.language, request.generation
            ));
            return;
        }

        let updates = render_fields(&self.captions(), &self.config.contact_email);
        if let Err(e) = dom::apply_field_updates(&updates) {
            console::error!(format!("Failed to render captions: {}", e));
        }
    }
}

/// エントリーポイントから呼ばれる起動処理
pub async fn start() {
    if let Err(e) = dom::wait_for_dom_ready().await {
        console::error!(format!("Failed to wait for the document: {}", e));
        return;
    }

    let app = Rc::new(App::new(load_site_config()));
    app.run().await;
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn json_data_url(body: &str) -> String {
        format!("data:application/json,{}", String::from(js_sys::encode_uri_component(body)))
    }

    #[wasm_bindgen_test]
    async fn wasm_captions_load_when_header_is_missing() {
        let document = dom::document().unwrap();
        let root = document.create_element("div").unwrap();
        root.set_inner_html(r#"<div id="header-container"></div><h2 id="about-title"></h2>"#);
        document.body().unwrap().append_child(&root).unwrap();

        let config = SiteConfig {
            header_url: "missing-header-7c1e.html".into(),
            structured_caption_url: json_data_url(r#"{"en": {"about": {"title": "About me"}}}"#),
            language_storage_key: "portfolio-test-header-missing".into(),
            ..SiteConfig::default()
        };
        let app = Rc::new(App::new(config));
        Rc::clone(&app).load_header_then_captions().await;

        let header = dom::element_by_id(header::HEADER_CONTAINER_ID).unwrap();
        assert_eq!(header.inner_html(), "");
        let title = dom::element_by_id("about-title").unwrap();
        assert_eq!(title.text_content().as_deref(), Some("About me"));
        assert_eq!(app.captions().text("about", "title").as_deref(), Some("About me"));

        root.remove();
    }
}
