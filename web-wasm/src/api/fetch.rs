//! 同一オリジンの静的ファイル取得
//!
//! ヘッダー断片・キャプション文書・ファイル名リストはすべてテキストとして取得し、
//! パースは portfolio_common 側で行う。

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};
use portfolio_common::{Error, Result};

use crate::dom::{self, js_error_message};

fn network_error(value: JsValue) -> Error {
    Error::Network(js_error_message(&value))
}

/// GETでテキストを取得
///
/// 2xx以外のステータスは [`Error::Fetch`]。タイムアウトは設けない。
pub async fn fetch_text(url: &str) -> Result<String> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init(url, &opts).map_err(network_error)?;

    let window = dom::window()?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(network_error)?;
    let resp: Response = resp_value.dyn_into().map_err(network_error)?;

    if !resp.ok() {
        return Err(Error::Fetch {
            url: url.to_string(),
            status: resp.status(),
        });
    }

    let text = JsFuture::from(resp.text().map_err(network_error)?)
        .await
        .map_err(network_error)?;

    text.as_string()
        .ok_or_else(|| Error::Network(format!("{}: response body is not text", url)))
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn wasm_fetch_missing_file_is_error() {
        let result = fetch_text("definitely-missing-file-4f2a.json").await;
        assert!(result.is_err());
    }
}
