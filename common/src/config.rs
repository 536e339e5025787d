//! サイト設定
//!
//! 取得先パス・DOMのID・遅延時間などをまとめる。
//! JSONで一部だけ上書きでき、省略した項目は既定値になる。

use crate::error::{Error, Result};
use crate::gallery::GalleryKind;
use crate::language::Language;
use serde::{Deserialize, Serialize};

/// キャプション文書の形式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionFormat {
    /// 言語ごとのテキストファイル（`section.item=value` 形式）
    Flat,
    /// 全言語をまとめたJSON文書
    #[default]
    Structured,
}

/// 言語ごとのフラット形式キャプションファイル
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlatCaptionUrls {
    pub en: String,
    pub nl: String,
}

impl Default for FlatCaptionUrls {
    fn default() -> Self {
        Self {
            en: "CAPTIONS.txt".into(),
            nl: "CAPTIONS_NL.txt".into(),
        }
    }
}

/// ギャラリー1つ分の取得元と描画先
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GallerySource {
    pub container_id: String,
    pub directory: String,
    pub list_url: String,
}

impl GallerySource {
    fn for_kind(kind: GalleryKind) -> Self {
        let section = kind.section();
        Self {
            container_id: format!("gallery-{}", section),
            directory: format!("images/{}", section),
            list_url: format!("images/{0}/{0}.json", section),
        }
    }
}

/// サイト設定
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
    pub header_url: String,
    pub caption_format: CaptionFormat,
    pub structured_caption_url: String,
    pub flat_caption_urls: FlatCaptionUrls,
    pub pictures: GallerySource,
    pub paintings: GallerySource,
    /// キャプション読込後にギャラリーを組み立てるまでの待ち時間
    pub gallery_delay_ms: u32,
    pub language_storage_key: String,
    /// 連絡先段落で強調表示するメールアドレス
    pub contact_email: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            header_url: "components/header.html".into(),
            caption_format: CaptionFormat::default(),
            structured_caption_url: "captions.json".into(),
            flat_caption_urls: FlatCaptionUrls::default(),
            pictures: GallerySource::for_kind(GalleryKind::Pictures),
            paintings: GallerySource::for_kind(GalleryKind::Paintings),
            gallery_delay_ms: 300,
            language_storage_key: "language".into(),
            contact_email: "eric.greuter@gmail.com".into(),
        }
    }
}

impl SiteConfig {
    /// JSON文字列から読み込み（未指定の項目は既定値）
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.language_storage_key.is_empty() {
            return Err(Error::Config("languageStorageKey が空です".into()));
        }
        if self.pictures.container_id == self.paintings.container_id {
            return Err(Error::Config(format!(
                "ギャラリーのコンテナIDが重複しています: {}",
                self.pictures.container_id
            )));
        }
        Ok(())
    }

    /// 指定言語のキャプション文書URL
    pub fn caption_url(&self, language: Language) -> &str {
        match self.caption_format {
            CaptionFormat::Structured => &self.structured_caption_url,
            CaptionFormat::Flat => match language {
                Language::En => &self.flat_caption_urls.en,
                Language::Nl => &self.flat_caption_urls.nl,
            },
        }
    }

    pub fn gallery(&self, kind: GalleryKind) -> &GallerySource {
        match kind {
            GalleryKind::Pictures => &self.pictures,
            GalleryKind::Paintings => &self.paintings,
        }
    }
}
