//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Fetch error: {url} (HTTP {status})")]
    Fetch { url: String, status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Color extraction failed: {0}")]
    Color(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        let display = format!("{}", error);
        assert!(display.contains("JSON error"));
    }

    #[test]
    fn test_error_display_fetch() {
        let error = Error::Fetch {
            url: "images/pictures/pictures.json".to_string(),
            status: 404,
        };
        assert_eq!(
            format!("{}", error),
            "Fetch error: images/pictures/pictures.json (HTTP 404)"
        );
    }

    #[test]
    fn test_error_display_color() {
        let error = Error::Color("canvas is tainted".to_string());
        assert_eq!(format!("{}", error), "Color extraction failed: canvas is tainted");
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Config("設定が不正です".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Config"));
        assert!(debug.contains("設定が不正です"));
    }
}
