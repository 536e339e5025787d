//! Portfolio Site Common Library
//!
//! ブラウザ(WASM)側から使う、DOMに依存しない型と変換処理

pub mod color;
pub mod config;
pub mod context;
pub mod error;
pub mod gallery;
pub mod language;
pub mod modal;
pub mod parser;
pub mod render;
pub mod types;

pub use color::{average_color, AverageColorExtractor, NoColorExtractor, Rgb, RgbaBufferExtractor};
pub use config::{CaptionFormat, GallerySource, SiteConfig};
pub use context::{AppContext, CaptionRequest, MemoryPreferenceStore, PreferenceStore};
pub use error::{Error, Result};
pub use gallery::{
    build_thumbnails, display_key, file_name_from_src, parse_file_list, GalleryKind, Thumbnail,
};
pub use language::Language;
pub use modal::{resolve_caption, CaptionView, CloseTrigger, ModalState, ModalView, ThumbnailClick};
pub use parser::{parse_caption_document, parse_flat, parse_structured, select_language};
pub use render::{render_fields, Content, FieldUpdate, Target};
pub use types::{CaptionEntry, CaptionStore, CaptionText, CaptionValue};
