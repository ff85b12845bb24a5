//! チャット（POST JSON）

use super::{post, with_timeout};
use foodscan_common::api::{ChatRequest, ChatResponse};
use wasm_bindgen::JsValue;

pub async fn send_message(url: &str, message: &str, timeout_secs: u64) -> Result<ChatResponse, String> {
    let body = serde_json::to_string(&ChatRequest {
        message: message.to_string(),
    })
    .map_err(|e| e.to_string())?;

    let text = with_timeout(
        post(url, &JsValue::from_str(&body), Some("application/json")),
        timeout_secs,
    )
    .await?;

    serde_json::from_str(&text).map_err(|e| {
        gloo::console::warn!(format!("chat response parse error: {}", e));
        "malformed response".to_string()
    })
}
