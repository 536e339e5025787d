//! ライトボックス（モーダル）の状態
//!
//! 状態は Closed / Open の2つ。開いている間に別のサムネイルを開くと上書きする。

use crate::color::Rgb;
use crate::gallery::{display_key, file_name_from_src, GalleryKind};
use crate::types::{CaptionStore, CaptionValue};
use std::fmt;

/// モーダルに表示するキャプション
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptionView {
    /// タイトル＋説明（説明はタイトル操作で開閉）
    Structured {
        title: String,
        description: Option<String>,
    },
    /// 旧形式の文字列（HTMLとしてそのまま表示）
    Plain(String),
}

impl CaptionView {
    fn from_value(value: &CaptionValue) -> Option<Self> {
        if value.is_empty() {
            return None;
        }
        let view = match value {
            CaptionValue::Text(text) => CaptionView::Plain(text.clone()),
            CaptionValue::Fragments(parts) => CaptionView::Plain(parts.join(" ")),
            CaptionValue::Entry(entry) => CaptionView::Structured {
                title: entry.title.clone(),
                description: Some(entry.description.joined()).filter(|d| !d.is_empty()),
            },
        };
        Some(view)
    }

    /// タイトルと説明の両方があるか（説明の開閉が必要か）
    pub fn has_description(&self) -> bool {
        matches!(self, CaptionView::Structured { description: Some(_), .. })
    }
}

/// キャプションを検索（写真 → 絵画の順）
pub fn resolve_caption(store: &CaptionStore, key: &str) -> Option<CaptionView> {
    GalleryKind::ALL
        .iter()
        .find_map(|kind| store.get(kind.section(), key).and_then(CaptionView::from_value))
}

/// クリックされたサムネイルの情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailClick {
    pub src: String,
    pub alt: String,
    /// `data-filename` 属性
    pub file_name: Option<String>,
}

impl ThumbnailClick {
    /// キャプション検索キー
    ///
    /// `data-filename` が無ければ画像URLの末尾から求める。
    pub fn caption_key(&self) -> String {
        let file_name = match self.file_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => file_name_from_src(&self.src),
        };
        display_key(file_name).to_string()
    }
}

/// 閉じる操作の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    Button,
    Backdrop,
    Escape,
}

impl CloseTrigger {
    /// キー入力から判定（"Esc" は旧ブラウザの値）
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Escape" | "Esc" => Some(CloseTrigger::Escape),
            _ => None,
        }
    }
}

impl fmt::Display for CloseTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CloseTrigger::Button => "close button",
            CloseTrigger::Backdrop => "backdrop",
            CloseTrigger::Escape => "escape key",
        };
        f.write_str(name)
    }
}

/// 開いているモーダルの内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenModal {
    pub image_src: String,
    pub image_alt: String,
    pub caption_key: String,
    pub caption: Option<CaptionView>,
    pub border_color: Option<Rgb>,
}

/// モーダル状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open(OpenModal),
}

impl ModalState {
    /// サムネイルで開く（開いていれば上書き）
    pub fn open(&mut self, click: &ThumbnailClick, store: &CaptionStore) {
        let caption_key = click.caption_key();
        let caption = resolve_caption(store, &caption_key);

        *self = ModalState::Open(OpenModal {
            image_src: click.src.clone(),
            image_alt: click.alt.clone(),
            caption_key,
            caption,
            border_color: None,
        });
    }

    /// 閉じる。開いていた場合は true
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        *self = ModalState::Closed;
        was_open
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open(_))
    }

    pub fn caption(&self) -> Option<&CaptionView> {
        match self {
            ModalState::Open(open) => open.caption.as_ref(),
            ModalState::Closed => None,
        }
    }

    /// 抽出した枠線色を反映
    ///
    /// 抽出元の画像がまだ表示中の場合のみ反映し、true を返す。
    pub fn apply_border(&mut self, image_src: &str, color: Rgb) -> bool {
        match self {
            ModalState::Open(open) if open.image_src == image_src => {
                open.border_color = Some(color);
                true
            }
            _ => false,
        }
    }

    /// DOMに反映する内容
    pub fn view(&self) -> ModalView {
        match self {
            ModalState::Closed => ModalView {
                visible: false,
                image_src: String::new(),
                image_alt: String::new(),
                caption: None,
                border_color: None,
            },
            ModalState::Open(open) => ModalView {
                visible: true,
                image_src: open.image_src.clone(),
                image_alt: open.image_alt.clone(),
                caption: open.caption.clone(),
                border_color: open.border_color.map(|c| c.to_hex()),
            },
        }
    }
}

/// モーダルの表示内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub visible: bool,
    pub image_src: String,
    pub image_alt: String,
    pub caption: Option<CaptionView>,
    pub border_color: Option<String>,
}

impl ModalView {
    /// `aria-hidden` 属性の値
    pub fn aria_hidden(&self) -> &'static str {
        if self.visible {
            "false"
        } else {
            "true"
        }
    }

    /// キャプション欄を表示するか
    pub fn caption_visible(&self) -> bool {
        self.caption.is_some()
    }
}
