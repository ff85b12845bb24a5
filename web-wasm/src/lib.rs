//! FoodScan Web App (Leptos + WASM)
//!
//! `trunk build` で `index.html` からビルドする。オフライン用の
//! `service-worker.js` は `index.html` の copy-file で出力先に置かれる。

mod app;
mod components;
pub mod api;
mod config;
mod offline;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    offline::register_service_worker(offline::SERVICE_WORKER_URL);
    leptos::mount::mount_to_body(app::App);
}
