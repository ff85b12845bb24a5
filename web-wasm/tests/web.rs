//! ブラウザ上での非同期ユーティリティのテスト
#![cfg(target_arch = "wasm32")]

use foodscan_wasm::api::with_timeout;
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
async fn test_with_timeout_passes_result_through() {
    let result = with_timeout(async { Ok::<_, String>(42) }, 1).await;
    assert_eq!(result, Ok(42));
}

#[wasm_bindgen_test]
async fn test_with_timeout_expires() {
    let slow = async {
        TimeoutFuture::new(3_000).await;
        Ok::<_, String>(())
    };
    let result = with_timeout(slow, 1).await;
    assert_eq!(result, Err("request timed out after 1s".to_string()));
}

#[wasm_bindgen_test]
async fn test_with_timeout_keeps_inner_error() {
    let result = with_timeout(async { Err::<(), _>("HTTP 500".to_string()) }, 1).await;
    assert_eq!(result, Err("HTTP 500".to_string()));
}
