//! 代表色の抽出
//!
//! 画像のピクセルを間引いてサンプリングし、各チャンネルの平均色を求める。
//! モーダル画像の枠線色に使う装飾用途のため、失敗しても致命的ではない。

use crate::error::{Error, Result};
use std::fmt;

/// 何ピクセルおきにサンプリングするか
pub const SAMPLE_STRIDE_PIXELS: usize = 4;

const BYTES_PER_PIXEL: usize = 4;

/// RGB色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` 形式
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// RGBAバイト列の平均色
///
/// 4ピクセルごと（16バイトごと）に1ピクセルを読み、アルファは無視する。
/// 端数は切り捨て。サンプルが1つも無ければ `None`。
pub fn average_color(rgba: &[u8]) -> Option<Rgb> {
    let (mut r, mut g, mut b, mut count) = (0u64, 0u64, 0u64, 0u64);

    for pixel in rgba
        .chunks_exact(BYTES_PER_PIXEL)
        .step_by(SAMPLE_STRIDE_PIXELS)
    {
        r += u64::from(pixel[0]);
        g += u64::from(pixel[1]);
        b += u64::from(pixel[2]);
        count += 1;
    }

    if count == 0 {
        return None;
    }

    Some(Rgb::new(
        (r / count) as u8,
        (g / count) as u8,
        (b / count) as u8,
    ))
}

/// 平均色抽出の差し替え口
///
/// ブラウザではcanvas実装、ピクセルを読めない環境では [`NoColorExtractor`]。
pub trait AverageColorExtractor<I: ?Sized> {
    fn extract(&self, image: &I) -> Result<Rgb>;
}

/// 常に抽出しない実装
#[derive(Debug, Clone, Copy, Default)]
pub struct NoColorExtractor;

impl<I: ?Sized> AverageColorExtractor<I> for NoColorExtractor {
    fn extract(&self, _image: &I) -> Result<Rgb> {
        Err(Error::Color("pixel access is not available".into()))
    }
}

/// 生のRGBAバイト列から抽出する実装
#[derive(Debug, Clone, Copy, Default)]
pub struct RgbaBufferExtractor;

impl AverageColorExtractor<[u8]> for RgbaBufferExtractor {
    fn extract(&self, image: &[u8]) -> Result<Rgb> {
        average_color(image).ok_or_else(|| Error::Color("image has no pixels".into()))
    }
}
