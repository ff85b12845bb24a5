//! 写真の栄養推定（POST multipart）

use super::{js_error, post, with_timeout};
use foodscan_common::api::IMAGE_FIELD;
use foodscan_common::MacrosResponse;
use web_sys::{File, FormData};

/// 写真を送信して推定結果を受け取る
pub async fn analyze_image(url: &str, file: &File, timeout_secs: u64) -> Result<MacrosResponse, String> {
    let form = FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename(IMAGE_FIELD, file, &file.name())
        .map_err(js_error)?;

    // Content-Typeはブラウザがboundary付きで設定する
    let body = with_timeout(post(url, &form.into(), None), timeout_secs).await?;

    MacrosResponse::from_json(&body).map_err(|e| {
        gloo::console::warn!(format!("macros response parse error: {}", e));
        "malformed response".to_string()
    })
}
