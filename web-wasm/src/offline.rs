//! オフライン用Service Workerの登録

use leptos::task::spawn_local;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

/// `web-wasm/service-worker.js`（ビルド時に出力先へコピーされる）
pub const SERVICE_WORKER_URL: &str = "./service-worker.js";

/// 対応ブラウザでのみ登録する。失敗してもアプリは動作する
pub fn register_service_worker(script_url: &'static str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let navigator = window.navigator();
    let supported = js_sys::Reflect::has(&navigator, &JsValue::from_str("serviceWorker")).unwrap_or(false);
    if !supported {
        gloo::console::log!("service worker unsupported; running online only");
        return;
    }

    let promise = navigator.service_worker().register(script_url);
    spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(_) => gloo::console::log!("service worker registered"),
            Err(e) => gloo::console::warn!("service worker registration failed", e),
        }
    });
}
