//! キャプション・ギャラリー・モーダルの連携テスト
//!
//! 文書のパースからDOM反映内容の算出までを通しで検証

use portfolio_common::{
    build_thumbnails, parse_caption_document, parse_file_list, render_fields, AppContext,
    CaptionFormat, CaptionView, Content, GalleryKind, Language, MemoryPreferenceStore, ModalState,
    SiteConfig, Target, ThumbnailClick,
};

const CAPTIONS: &str = r#"{
    "en": {
        "nav": {"home": "Home", "pictures": "Pictures", "paintings": "Paintings", "about": "About"},
        "contact": {"paragraph1": ["Write to", "eric.greuter@gmail.com", "anytime."]},
        "pictures": {
            "title": "Pictures",
            "sunset": {"title": "Sunset", "description": ["Evening", "glow"]}
        },
        "paintings": {"harbour": "Oil on <i>canvas</i>"}
    },
    "nl": {
        "nav": {"home": "Start", "about": "Over mij"},
        "pictures": {
            "sunset": {"title": "Zonsondergang", "description": ["Avond", "gloed"]}
        }
    }
}"#;

/// 言語切替→再読込→描画→モーダルの一連の流れ
#[test]
fn test_language_switch_renders_dutch() {
    let config = SiteConfig::default();
    let storage = MemoryPreferenceStore::new(&config.language_storage_key);
    let mut context = AppContext::new(storage.clone());

    let (request, saved) = context.select_language(Language::Nl);
    saved.expect("保存失敗");
    let store = parse_caption_document(config.caption_format, CAPTIONS, request.language)
        .expect("パース失敗");
    assert!(context.accept_captions(request, store));

    let updates = render_fields(context.captions(), &config.contact_email);
    assert_eq!(updates.len(), 2);
    assert!(updates.iter().any(|u| u.target == Target::Id("nav-about")
        && u.content == Content::Text("Over mij".into())));

    // 再読込後も nl
    let reloaded = AppContext::new(storage);
    assert_eq!(reloaded.language(), Language::Nl);
}

/// 英語のフィールド描画（配列の連結とメール強調）
#[test]
fn test_english_fields() {
    let config = SiteConfig::default();
    let store =
        parse_caption_document(CaptionFormat::Structured, CAPTIONS, Language::En).expect("パース失敗");
    let updates = render_fields(&store, &config.contact_email);

    let contact = updates
        .iter()
        .find(|u| u.target == Target::Id("contact-p1"))
        .expect("contact-p1 が無い");
    assert_eq!(
        contact.content,
        Content::Html("Write to <strong>eric.greuter@gmail.com</strong> anytime.".into())
    );

    let title = updates
        .iter()
        .find(|u| u.target == Target::Id("pictures-title"))
        .expect("pictures-title が無い");
    assert_eq!(title.content, Content::Text("Pictures".into()));
}

/// ギャラリーのサムネイルからモーダルを開く
#[test]
fn test_gallery_thumbnail_opens_modal() {
    let config = SiteConfig::default();
    let source = config.gallery(GalleryKind::Pictures);
    let files = parse_file_list(r#"["sunset.jpg", "harbour.png"]"#).expect("パース失敗");
    let thumbs = build_thumbnails(&source.directory, &files);
    let store =
        parse_caption_document(CaptionFormat::Structured, CAPTIONS, Language::En).expect("パース失敗");

    let mut modal = ModalState::default();
    let thumb = &thumbs[0];
    modal.open(
        &ThumbnailClick {
            src: thumb.src.clone(),
            alt: thumb.alt.clone(),
            file_name: Some(thumb.file_name.clone()),
        },
        &store,
    );

    let view = modal.view();
    assert_eq!(view.image_src, "images/pictures/sunset.jpg");
    match view.caption {
        Some(CaptionView::Structured { title, description }) => {
            assert_eq!(title, "Sunset");
            assert_eq!(description.as_deref(), Some("Evening glow"));
        }
        other => panic!("Expected structured caption, got {:?}", other),
    }

    // 絵画側のキャプションは旧形式の文字列
    let thumb = &thumbs[1];
    modal.open(
        &ThumbnailClick {
            src: thumb.src.clone(),
            alt: thumb.alt.clone(),
            file_name: Some(thumb.file_name.clone()),
        },
        &store,
    );
    assert_eq!(
        modal.caption(),
        Some(&CaptionView::Plain("Oil on <i>canvas</i>".into()))
    );

    modal.close();
    assert_eq!(modal.view().image_src, "");
}

/// フラット形式（言語ごとのファイル）
#[test]
fn test_flat_format_end_to_end() {
    let json = r#"{"captionFormat": "flat"}"#;
    let config = SiteConfig::from_json(json).expect("設定読込失敗");
    assert_eq!(config.caption_url(Language::Nl), "CAPTIONS_NL.txt");

    let text = "thanks.title=Bedankt!\nthanks.link=Terug\nignored line\n";
    let store = parse_caption_document(config.caption_format, text, Language::Nl).expect("パース失敗");
    let updates = render_fields(&store, &config.contact_email);

    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].target, Target::Id("thanks-title"));
    assert_eq!(updates[1].target, Target::Id("thanks-link"));
}
