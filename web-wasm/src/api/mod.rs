//! 推定サービス連携（fetch API）

pub mod chat;
pub mod macros;

use futures::future::{select, Either};
use gloo::timers::future::TimeoutFuture;
use std::future::Future;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// JsValueをログ用の文字列に
fn js_error(value: JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value))
}

/// 指定秒数で打ち切る
pub async fn with_timeout<T, F>(future: F, secs: u64) -> Result<T, String>
where
    F: Future<Output = Result<T, String>>,
{
    let millis = u32::try_from(secs.saturating_mul(1000)).unwrap_or(u32::MAX);
    let timer = TimeoutFuture::new(millis);
    futures::pin_mut!(future, timer);
    match select(future, timer).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => Err(format!("request timed out after {}s", secs)),
    }
}

/// POSTしてレスポンス本文を返す（2xx以外はエラー）
async fn post(url: &str, body: &JsValue, content_type: Option<&str>) -> Result<String, String> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(body);

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
    if let Some(content_type) = content_type {
        request
            .headers()
            .set("Content-Type", content_type)
            .map_err(js_error)?;
    }

    let window = web_sys::window().ok_or_else(|| "window is unavailable".to_string())?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("network error ({})", js_error(e)))?;
    let resp: Response = resp_value.dyn_into().map_err(js_error)?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    let text = JsFuture::from(resp.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    text.as_string()
        .ok_or_else(|| "malformed response".to_string())
}
