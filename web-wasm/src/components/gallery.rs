//! 写真ギャラリーコンポーネント
//!
//! ファイル名リストを取得し、サムネイルを `<figure><img class="thumb"></figure>` として並べる。
//! 2つのギャラリーは独立して読み込み、片方の失敗はもう片方に影響しない。

use futures::future::join_all;
use gloo::console;
use leptos::prelude::*;
use portfolio_common::{
    build_thumbnails, parse_file_list, GalleryKind, GallerySource, Result, SiteConfig, Thumbnail,
};
use web_sys::HtmlElement;

use crate::api::fetch_text;
use crate::dom;

#[component]
pub fn PhotoGallery(thumbnails: Vec<Thumbnail>) -> impl IntoView {
    thumbnails
        .into_iter()
        .map(|thumb| view! { <PhotoThumbnail thumb=thumb /> })
        .collect_view()
}

#[component]
fn PhotoThumbnail(thumb: Thumbnail) -> impl IntoView {
    view! {
        <figure>
            <img
                class={Thumbnail::CLASS}
                src=thumb.src
                alt=thumb.alt
                loading="lazy"
                crossorigin="anonymous"
                data-filename=thumb.file_name
            />
        </figure>
    }
}

/// ギャラリー1つを読み込み、追加したサムネイル数を返す
///
/// コンテナが無いページでは取得もしない。
pub async fn load_gallery(source: &GallerySource) -> Result<usize> {
    if dom::element_by_id(&source.container_id).is_none() {
        return Ok(0);
    }

    let json = fetch_text(&source.list_url).await?;
    let files = parse_file_list(&json)?;
    let thumbnails = build_thumbnails(&source.directory, &files);
    let count = thumbnails.len();

    if let Some(container) = dom::typed_element_by_id::<HtmlElement>(&source.container_id) {
        leptos::mount::mount_to(container, move || view! { <PhotoGallery thumbnails=thumbnails /> })
            .forget();
    }
    Ok(count)
}

/// 写真・絵画の両ギャラリーを読み込む
pub async fn load_galleries(config: &SiteConfig) {
    let loads = GalleryKind::ALL.map(|kind| async move {
        (kind, load_gallery(config.gallery(kind)).await)
    });

    for (kind, result) in join_all(loads).await {
        match result {
            Ok(0) => {}
            Ok(count) => console::log!(format!("Loaded {} {}", count, kind.section())),
            Err(e) => console::error!(format!("Failed to load {}: {}", kind.section(), e)),
        }
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_gallery_renders_in_list_order() {
        let document = dom::document().unwrap();
        let container: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
        document.body().unwrap().append_child(&container).unwrap();

        let files = vec!["a.jpg".to_string(), "b.png".to_string()];
        let thumbnails = build_thumbnails("images/pictures", &files);
        leptos::mount::mount_to(container.clone(), move || {
            view! { <PhotoGallery thumbnails=thumbnails /> }
        })
        .forget();

        let images = container.query_selector_all("figure > img.thumb").unwrap();
        assert_eq!(images.length(), 2);

        let first: web_sys::Element = images.item(0).unwrap().dyn_into().unwrap();
        assert_eq!(first.get_attribute("alt").as_deref(), Some("a"));
        assert_eq!(first.get_attribute("src").as_deref(), Some("images/pictures/a.jpg"));
        assert_eq!(first.get_attribute("loading").as_deref(), Some("lazy"));
        assert_eq!(first.get_attribute("crossorigin").as_deref(), Some("anonymous"));
        assert_eq!(first.get_attribute("data-filename").as_deref(), Some("a.jpg"));

        let second: web_sys::Element = images.item(1).unwrap().dyn_into().unwrap();
        assert_eq!(second.get_attribute("alt").as_deref(), Some("b"));

        container.remove();
    }

    #[wasm_bindgen_test]
    async fn wasm_missing_container_is_noop() {
        let source = GallerySource {
            container_id: "no-such-gallery".into(),
            directory: "images/none".into(),
            list_url: "images/none/none.json".into(),
        };
        assert_eq!(load_gallery(&source).await.unwrap(), 0);
    }

    #[wasm_bindgen_test]
    async fn wasm_galleries_fail_independently() {
        let document = dom::document().unwrap();
        let root = document.create_element("div").unwrap();
        root.set_inner_html(
            r#"<div id="test-gallery-pictures"></div><div id="test-gallery-paintings"></div>"#,
        );
        document.body().unwrap().append_child(&root).unwrap();

        let paintings_list = js_sys::encode_uri_component(r#"["dunes.jpg", "mill.png"]"#);
        let config = SiteConfig {
            pictures: GallerySource {
                container_id: "test-gallery-pictures".into(),
                directory: "images/pictures".into(),
                list_url: "missing-pictures-3b9d.json".into(),
            },
            paintings: GallerySource {
                container_id: "test-gallery-paintings".into(),
                directory: "images/paintings".into(),
                list_url: format!("data:application/json,{}", String::from(paintings_list)),
            },
            ..SiteConfig::default()
        };
        load_galleries(&config).await;

        let pictures = dom::element_by_id("test-gallery-pictures").unwrap();
        assert_eq!(pictures.query_selector_all("img.thumb").unwrap().length(), 0);

        let paintings = dom::element_by_id("test-gallery-paintings").unwrap();
        let images = paintings.query_selector_all("img.thumb").unwrap();
        assert_eq!(images.length(), 2);
        let first: web_sys::Element = images.item(0).unwrap().dyn_into().unwrap();
        assert_eq!(first.get_attribute("alt").as_deref(), Some("dunes"));
        assert_eq!(first.get_attribute("src").as_deref(), Some("images/paintings/dunes.jpg"));

        root.remove();
    }
}
