//! モーダル（ライトボックス）コンポーネント
//!
//! - サムネイルのクリックは document への委譲リスナーで拾う
//! - 閉じる: 閉じるボタン / 背景クリック / Escキー
//! - 画像の読込後、平均色を枠線色にする（失敗時は枠線なし）

use std::rc::Rc;

use gloo::console;
use gloo::events::EventListener;
use leptos::prelude::*;
use portfolio_common::{CaptionView, CloseTrigger, ModalState, ModalView, Thumbnail, ThumbnailClick};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, HtmlImageElement, KeyboardEvent, Node};

use crate::app::App;
use crate::dom;
use crate::listeners::Role;

const MODAL_ID: &str = "modal";
const MODAL_IMAGE_ID: &str = "modal-image";
const MODAL_CAPTION_ID: &str = "modal-caption";
const MODAL_CLOSE_ID: &str = "modal-close";
const VISIBLE_CLASS: &str = "show";

#[component]
pub fn ModalCaption(caption: Memo<Option<CaptionView>>) -> impl IntoView {
    move || {
        caption.get().map(|caption| match caption {
            CaptionView::Structured { title, description } => {
                view! { <CaptionEntry title=title description=description /> }.into_any()
            }
            CaptionView::Plain(html) => {
                view! { <span class="caption-text" inner_html=html></span> }.into_any()
            }
        })
    }
}

/// タイトル＋説明。説明はタイトルのクリックで開閉、ホバーで表示
#[component]
fn CaptionEntry(title: String, description: Option<String>) -> impl IntoView {
    let (expanded, set_expanded) = signal(false);
    let expandable = description.is_some();

    view! {
        <h3
            class="caption-title"
            class:expandable=expandable
            on:click=move |_| {
                if expandable {
                    set_expanded.update(|open| *open = !*open);
                }
            }
            on:mouseenter=move |_| {
                if expandable {
                    set_expanded.set(true);
                }
            }
        >
            {title}
        </h3>
        {description.map(|text| view! {
            <p
                class="caption-description"
                class:show=move || expanded.get()
                hidden=move || !expanded.get()
            >
                {text}
            </p>
        })}
    }
}

#[derive(Clone)]
struct ModalElements {
    modal: HtmlElement,
    image: HtmlImageElement,
    caption: HtmlElement,
}

impl ModalElements {
    fn find() -> Option<Self> {
        Some(Self {
            modal: dom::typed_element_by_id(MODAL_ID)?,
            image: dom::typed_element_by_id(MODAL_IMAGE_ID)?,
            caption: dom::typed_element_by_id(MODAL_CAPTION_ID)?,
        })
    }

    fn apply(&self, view: &ModalView) {
        set_class(&self.modal, VISIBLE_CLASS, view.visible);
        let _ = self.modal.set_attribute("aria-hidden", view.aria_hidden());
        self.image.set_src(&view.image_src);
        self.image.set_alt(&view.image_alt);
        set_class(&self.caption, VISIBLE_CLASS, view.caption_visible());
        self.apply_border(view.border_color.as_deref());
    }

    fn apply_border(&self, color: Option<&str>) {
        let style = HtmlElement::style(&self.image);
        let _ = match color {
            Some(color) => style.set_property("border-color", color),
            None => style.remove_property("border-color").map(|_| ()),
        };
    }

    fn is_backdrop(&self, event: &Event) -> bool {
        let modal: &Node = &self.modal;
        event
            .target()
            .and_then(|target| target.dyn_into::<Node>().ok())
            .is_some_and(|node| node.is_same_node(Some(modal)))
    }
}

fn set_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

/// クリックされた要素がサムネイルなら情報を取り出す
fn thumbnail_click(event: &Event) -> Option<ThumbnailClick> {
    let target: Element = event.target()?.dyn_into().ok()?;
    if !target.class_list().contains(Thumbnail::CLASS) {
        return None;
    }

    let (src, alt) = match target.dyn_ref::<HtmlImageElement>() {
        Some(image) => (image.src(), image.alt()),
        None => (
            target.get_attribute("src").unwrap_or_default(),
            target.get_attribute("alt").unwrap_or_default(),
        ),
    };

    Some(ThumbnailClick {
        src,
        alt,
        file_name: target.get_attribute("data-filename"),
    })
}

/// モーダルのリスナー登録とキャプション欄のマウント
///
/// モーダル要素が揃っていないページでは何もしない。
pub fn install(app: &Rc<App>) {
    let (Some(elements), Ok(document)) = (ModalElements::find(), dom::document()) else {
        return;
    };

    let state = app.modal_state();
    let caption = Memo::new(move |_| state.with(|s| s.caption().cloned()));
    leptos::mount::mount_to(elements.caption.clone(), move || {
        view! { <ModalCaption caption=caption /> }
    })
    .forget();

    let mut listeners = app.listeners();

    let (open_app, open_elements) = (Rc::clone(app), elements.clone());
    listeners.register(
        Role::Thumbnail,
        EventListener::new(&document, "click", move |event| {
            if let Some(click) = thumbnail_click(event) {
                open(&open_app, &open_elements, &click);
            }
        }),
    );

    if let Some(button) = dom::element_by_id(MODAL_CLOSE_ID) {
        let (app, elements) = (Rc::clone(app), elements.clone());
        listeners.register(
            Role::ModalClose,
            EventListener::new(&button, "click", move |_| {
                close(&app, &elements, CloseTrigger::Button);
            }),
        );
    }

    let (backdrop_app, backdrop_elements) = (Rc::clone(app), elements.clone());
    listeners.register(
        Role::ModalBackdrop,
        EventListener::new(&elements.modal, "click", move |event| {
            if backdrop_elements.is_backdrop(event) {
                close(&backdrop_app, &backdrop_elements, CloseTrigger::Backdrop);
            }
        }),
    );

    let (key_app, key_elements) = (Rc::clone(app), elements);
    listeners.register(
        Role::EscapeKey,
        EventListener::new(&document, "keydown", move |event| {
            let trigger = event
                .dyn_ref::<KeyboardEvent>()
                .and_then(|key| CloseTrigger::from_key(&key.key()));
            if let Some(trigger) = trigger {
                close(&key_app, &key_elements, trigger);
            }
        }),
    );
}

fn open(app: &Rc<App>, elements: &ModalElements, click: &ThumbnailClick) {
    let state = app.modal_state();
    state.update(|s| s.open(click, &app.captions()));

    let view = state.with_untracked(ModalState::view);
    elements.apply(&view);
    watch_image_load(app, elements, view.image_src);
}

fn close(app: &App, elements: &ModalElements, trigger: CloseTrigger) {
    // 読込中の画像の完了通知は不要になる
    app.listeners().clear(Role::ModalImageLoad);

    let state = app.modal_state();
    let mut was_open = false;
    state.update(|s| was_open = s.close());
    elements.apply(&state.with_untracked(ModalState::view));

    if was_open {
        console::debug!(format!("Modal closed by {}", trigger));
    }
}

/// 画像の読込完了を待って枠線色を付ける（読込済みなら即時）
fn watch_image_load(app: &Rc<App>, elements: &ModalElements, src: String) {
    let image = &elements.image;
    if image.complete() && image.natural_width() > 0 {
        app.listeners().clear(Role::ModalImageLoad);
        apply_extracted_border(app, elements, &src);
        return;
    }

    let listener = {
        let (app, elements) = (Rc::clone(app), elements.clone());
        EventListener::once(image, "load", move |_| {
            apply_extracted_border(&app, &elements, &src);
        })
    };
    app.listeners().replace(Role::ModalImageLoad, listener);
}

fn apply_extracted_border(app: &App, elements: &ModalElements, src: &str) {
    match app.color_extractor().extract(&elements.image) {
        Ok(color) => {
            let mut applied = false;
            app.modal_state().update(|s| applied = s.apply_border(src, color));
            if applied {
                elements.apply_border(Some(&color.to_hex()));
            }
        }
        Err(e) => console::warn!(format!("Could not extract border color: {}", e)),
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use gloo::timers::future::TimeoutFuture;
    use portfolio_common::SiteConfig;
    use wasm_bindgen_test::*;
    use web_sys::KeyboardEventInit;

    wasm_bindgen_test_configure!(run_in_browser);

    const MARKUP: &str = r#"
        <figure>
            <img class="thumb" src="images/pictures/sunset.jpg" alt="sunset"
                data-filename="sunset.jpg">
        </figure>
        <div id="modal" aria-hidden="true">
            <button id="modal-close">x</button>
            <img id="modal-image" alt="">
            <div id="modal-caption"></div>
        </div>
    "#;

    fn mount_markup() -> Element {
        let document = dom::document().unwrap();
        let root = document.create_element("div").unwrap();
        root.set_inner_html(MARKUP);
        document.body().unwrap().append_child(&root).unwrap();
        root
    }

    fn click_thumbnail(root: &Element) {
        root.query_selector(".thumb")
            .unwrap()
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap()
            .click();
    }

    fn assert_closed() {
        let modal = dom::element_by_id(MODAL_ID).unwrap();
        assert!(!modal.class_list().contains(VISIBLE_CLASS));
        assert_eq!(modal.get_attribute("aria-hidden").as_deref(), Some("true"));
        let caption = dom::element_by_id(MODAL_CAPTION_ID).unwrap();
        assert!(!caption.class_list().contains(VISIBLE_CLASS));
        let image: HtmlImageElement = dom::typed_element_by_id(MODAL_IMAGE_ID).unwrap();
        assert_eq!(image.get_attribute("src").as_deref(), Some(""));
    }

    #[wasm_bindgen_test]
    fn wasm_open_and_close_by_every_trigger() {
        let root = mount_markup();
        let app = Rc::new(App::new(SiteConfig::default()));
        install(&app);

        // 閉じるボタン
        click_thumbnail(&root);
        let modal = dom::typed_element_by_id::<HtmlElement>(MODAL_ID).unwrap();
        assert!(modal.class_list().contains(VISIBLE_CLASS));
        assert_eq!(modal.get_attribute("aria-hidden").as_deref(), Some("false"));
        dom::typed_element_by_id::<HtmlElement>(MODAL_CLOSE_ID).unwrap().click();
        assert_closed();

        // 背景
        click_thumbnail(&root);
        modal.click();
        assert_closed();

        // Escキー
        click_thumbnail(&root);
        let init = KeyboardEventInit::new();
        init.set_key("Escape");
        let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
        dom::document().unwrap().dispatch_event(&event).unwrap();
        assert_closed();

        app.listeners().clear(Role::Thumbnail);
        app.listeners().clear(Role::EscapeKey);
        root.remove();
    }

    #[wasm_bindgen_test]
    fn wasm_click_on_modal_content_keeps_it_open() {
        let root = mount_markup();
        let app = Rc::new(App::new(SiteConfig::default()));
        install(&app);

        click_thumbnail(&root);
        dom::typed_element_by_id::<HtmlElement>(MODAL_IMAGE_ID).unwrap().click();
        assert!(app.modal_state().with_untracked(ModalState::is_open));

        app.listeners().clear(Role::Thumbnail);
        app.listeners().clear(Role::EscapeKey);
        root.remove();
    }

    fn mount_sunset_caption() -> (HtmlElement, HtmlElement, Element) {
        let document = dom::document().unwrap();
        let container: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
        document.body().unwrap().append_child(&container).unwrap();

        let caption = Memo::new(|_| {
            Some(CaptionView::Structured {
                title: "Sunset".into(),
                description: Some("Evening glow".into()),
            })
        });
        leptos::mount::mount_to(container.clone(), move || {
            view! { <ModalCaption caption=caption /> }
        })
        .forget();

        let title: HtmlElement = container
            .query_selector(".caption-title")
            .unwrap()
            .unwrap()
            .dyn_into()
            .unwrap();
        let description = container.query_selector(".caption-description").unwrap().unwrap();
        (container, title, description)
    }

    #[wasm_bindgen_test]
    async fn wasm_structured_caption_toggles_description() {
        let (container, title, description) = mount_sunset_caption();
        assert_eq!(title.text_content().unwrap().trim(), "Sunset");
        assert_eq!(description.text_content().unwrap().trim(), "Evening glow");
        assert!(description.has_attribute("hidden"));

        title.click();
        TimeoutFuture::new(0).await;
        assert!(!description.has_attribute("hidden"));

        title.click();
        TimeoutFuture::new(0).await;
        assert!(description.has_attribute("hidden"));

        container.remove();
    }

    #[wasm_bindgen_test]
    async fn wasm_hovering_title_reveals_description() {
        let (container, title, description) = mount_sunset_caption();
        assert!(description.has_attribute("hidden"));

        let hover = Event::new("mouseenter").unwrap();
        title.dispatch_event(&hover).unwrap();
        TimeoutFuture::new(0).await;
        assert!(!description.has_attribute("hidden"));
        assert!(description.class_list().contains(VISIBLE_CLASS));

        container.remove();
    }
}
