//! canvas による代表色抽出
//!
//! 画像と同じサイズのcanvasに描画してピクセルを読む。
//! 別オリジン画像で crossorigin が無い場合は getImageData が例外になる。

use portfolio_common::{average_color, AverageColorExtractor, Error, Result, Rgb};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::dom::{self, js_error_message};

fn color_error(value: JsValue) -> Error {
    Error::Color(js_error_message(&value))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CanvasColorExtractor;

impl AverageColorExtractor<HtmlImageElement> for CanvasColorExtractor {
    fn extract(&self, image: &HtmlImageElement) -> Result<Rgb> {
        let (width, height) = (image.natural_width(), image.natural_height());
        if width == 0 || height == 0 {
            return Err(Error::Color("image is not decoded".into()));
        }

        let canvas: HtmlCanvasElement = dom::document()?
            .create_element("canvas")
            .map_err(color_error)?
            .dyn_into()
            .map_err(|_| Error::Dom("canvas element expected".into()))?;
        canvas.set_width(width);
        canvas.set_height(height);

        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(color_error)?
            .ok_or_else(|| Error::Color("2d context is not available".into()))?
            .dyn_into()
            .map_err(|_| Error::Color("2d context has unexpected type".into()))?;

        context
            .draw_image_with_html_image_element(image, 0.0, 0.0)
            .map_err(color_error)?;
        let pixels = context
            .get_image_data(0.0, 0.0, f64::from(width), f64::from(height))
            .map_err(color_error)?
            .data();

        average_color(&pixels.0).ok_or_else(|| Error::Color("image has no pixels".into()))
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_undecoded_image_is_error() {
        let image = HtmlImageElement::new().unwrap();
        let result = CanvasColorExtractor.extract(&image);
        assert!(matches!(result, Err(Error::Color(_))));
    }
}
