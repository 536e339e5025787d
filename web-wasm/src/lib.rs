//! Portfolio Web (Leptos + WASM)

mod api;
mod app;
mod color;
mod components;
mod config;
mod dom;
mod listeners;
mod storage;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_bindgen_futures::spawn_local(app::start());
}
