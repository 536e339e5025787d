//! 静的ファイルの取得

pub mod fetch;

pub use fetch::fetch_text;
