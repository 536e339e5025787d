//! 表示言語
//!
//! サイトは英語とオランダ語の2言語。未設定・未知のコードは英語扱い。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 表示言語
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Nl,
}

impl Language {
    /// 切替ボタンに並ぶ順
    pub const ALL: [Language; 2] = [Language::En, Language::Nl];

    /// 言語コード（"en" / "nl"）
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Nl => "nl",
        }
    }

    /// 言語コードから変換。大文字小文字と前後の空白は無視する
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "nl" => Some(Language::Nl),
            _ => None,
        }
    }

    /// 保存済みの値から復元。無い場合や不正な場合は既定値（英語）
    pub fn from_stored(value: Option<&str>) -> Self {
        value.and_then(Self::from_code).unwrap_or_default()
    }

    /// 言語切替ボタンの要素ID
    pub fn button_id(&self) -> String {
        format!("lang-{}", self.code())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
