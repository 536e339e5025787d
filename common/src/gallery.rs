//! ギャラリーの描画モデル
//!
//! ファイル名リスト(JSON配列)からサムネイル一覧を作る。
//! 並び順はリスト順のまま。ソート・重複除去・ページングはしない。

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// ギャラリー種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryKind {
    Pictures,
    Paintings,
}

impl GalleryKind {
    /// キャプション検索の優先順（写真 → 絵画）
    pub const ALL: [GalleryKind; 2] = [GalleryKind::Pictures, GalleryKind::Paintings];

    /// キャプションストア上のセクション名
    pub fn section(&self) -> &'static str {
        match self {
            GalleryKind::Pictures => "pictures",
            GalleryKind::Paintings => "paintings",
        }
    }
}

/// サムネイル1件分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub file_name: String,
    pub src: String,
    pub alt: String,
}

impl Thumbnail {
    /// クリック対象として判定するクラス名
    pub const CLASS: &'static str = "thumb";

    pub fn new(directory: &str, file_name: &str) -> Self {
        let directory = directory.trim_end_matches('/');
        let src = if directory.is_empty() {
            file_name.to_string()
        } else {
            format!("{}/{}", directory, file_name)
        };

        Self {
            file_name: file_name.to_string(),
            src,
            alt: display_key(file_name).to_string(),
        }
    }

    /// キャプション検索キー（拡張子なしのファイル名）
    pub fn caption_key(&self) -> &str {
        display_key(&self.file_name)
    }
}

/// 拡張子を除いたファイル名
///
/// 最後の `.` 以降に1文字以上ある場合のみ除去する（`"a."` はそのまま）。
///
/// # Examples
/// ```
/// use portfolio_common::display_key;
///
/// assert_eq!(display_key("sunset.jpg"), "sunset");
/// assert_eq!(display_key("old.town.png"), "old.town");
/// assert_eq!(display_key("README"), "README");
/// ```
pub fn display_key(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(pos) if pos + 1 < file_name.len() => &file_name[..pos],
        _ => file_name,
    }
}

/// 画像URLからファイル名部分を取り出す
///
/// `data-filename` を持たないサムネイル用。クエリとフラグメントは除去する。
pub fn file_name_from_src(src: &str) -> &str {
    let path = src.split(['?', '#']).next().unwrap_or(src);
    path.rsplit('/').next().unwrap_or(path)
}

/// ファイル名リスト(JSON配列)をパース
pub fn parse_file_list(json: &str) -> Result<Vec<String>> {
    let files: Vec<String> = serde_json::from_str(json.trim())?;
    Ok(files)
}

/// ファイル名リストからサムネイル一覧を作る
pub fn build_thumbnails(directory: &str, files: &[String]) -> Vec<Thumbnail> {
    files
        .iter()
        .map(|file_name| Thumbnail::new(directory, file_name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_build_thumbnails_keeps_order() {
        let files = parse_file_list(r#"["a.jpg","b.png"]"#).unwrap();
        let thumbs = build_thumbnails("images/pictures", &files);

        assert_eq!(thumbs.len(), 2);
        assert_eq!(thumbs[0].alt, "a");
        assert_eq!(thumbs[1].alt, "b");
        assert_eq!(thumbs[0].src, "images/pictures/a.jpg");
        assert_eq!(thumbs[1].src, "images/pictures/b.png");
    }

    #[test]
    fn test_build_thumbnails_keeps_duplicates() {
        let files = vec!["x.jpg".to_string(), "x.jpg".to_string()];
        let thumbs = build_thumbnails("images/paintings/", &files);

        assert_eq!(thumbs.len(), 2);
        assert_eq!(thumbs[0].src, "images/paintings/x.jpg");
    }

    #[test]
    fn test_thumbnail_without_directory() {
        let thumb = Thumbnail::new("", "c.webp");
        assert_eq!(thumb.src, "c.webp");
        assert_eq!(thumb.caption_key(), "c");
    }

    #[test]
    fn test_display_key_edge_cases() {
        assert_eq!(display_key("a."), "a.");
        assert_eq!(display_key(".hidden"), "");
        assert_eq!(display_key("no_ext"), "no_ext");
        assert_eq!(display_key(""), "");
    }

    #[test]
    fn test_file_name_from_src() {
        assert_eq!(
            file_name_from_src("https://example.com/images/pictures/sunset.jpg"),
            "sunset.jpg"
        );
        assert_eq!(file_name_from_src("images/a.png?v=2#top"), "a.png");
        assert_eq!(file_name_from_src("plain.gif"), "plain.gif");
    }

    #[test]
    fn test_parse_file_list_malformed() {
        assert!(matches!(parse_file_list("not json"), Err(Error::Json(_))));
        assert!(parse_file_list(r#"{"files": []}"#).is_err());
        assert!(parse_file_list(r#"["a.jpg", 3]"#).is_err());
    }

    #[test]
    fn test_parse_file_list_empty() {
        assert!(parse_file_list("[]").unwrap().is_empty());
    }

    #[test]
    fn test_gallery_kind_section() {
        assert_eq!(GalleryKind::Pictures.section(), "pictures");
        assert_eq!(GalleryKind::Paintings.section(), "paintings");
    }
}
