//! UIコンポーネント

pub mod gallery;
pub mod header;
pub mod modal;
