//! 推定サービスのHTTPクライアント
//!
//! - analyze_image: 写真をmultipartで送信し、栄養推定を受け取る
//! - chat: テキストを送信し、返信を受け取る

use crate::config::Config;
use crate::error::{FoodScanError, Result};
use foodscan_common::api::{ChatRequest, ChatResponse, Endpoints, IMAGE_FIELD};
use foodscan_common::MacrosResponse;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use std::path::Path;
use std::time::Duration;

pub struct ApiClient {
    http: Client,
    endpoints: Endpoints,
    timeout_seconds: u64,
}

impl ApiClient {
    pub fn new(endpoints: Endpoints, timeout_seconds: u64) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| FoodScanError::ApiCall(format!("HTTPクライアント初期化失敗: {}", e)))?;
        Ok(Self {
            http,
            endpoints,
            timeout_seconds,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.endpoints(), config.timeout_seconds)
    }

    /// 写真ファイルを解析
    pub async fn analyze_image(&self, path: &Path) -> Result<MacrosResponse> {
        if !path.is_file() {
            return Err(FoodScanError::FileNotFound(path.display().to_string()));
        }
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "photo".to_string());
        self.analyze_bytes(bytes, &file_name).await
    }

    /// 画像バイト列を解析
    pub async fn analyze_bytes(&self, bytes: Vec<u8>, file_name: &str) -> Result<MacrosResponse> {
        let mime = image_mime_type(&bytes)?;
        tracing::debug!(file_name, mime, size = bytes.len(), "uploading image");

        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .map_err(|e| FoodScanError::ApiCall(format!("multipart作成失敗: {}", e)))?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let resp = self
            .http
            .post(&self.endpoints.macros_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let body = self.success_body(resp).await?;
        Ok(MacrosResponse::from_json(&body)?)
    }

    /// チャットメッセージを送信
    pub async fn chat(&self, message: &str) -> Result<ChatResponse> {
        let resp = self
            .http
            .post(&self.endpoints.chat_url)
            .json(&ChatRequest {
                message: message.to_string(),
            })
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let body = self.success_body(resp).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn success_body(&self, resp: Response) -> Result<String> {
        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "service returned error status");
            return Err(FoodScanError::ApiStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    fn transport_error(&self, e: reqwest::Error) -> FoodScanError {
        if e.is_timeout() {
            FoodScanError::Timeout(self.timeout_seconds)
        } else {
            FoodScanError::ApiCall(e.to_string())
        }
    }
}

/// 画像形式からMIMEタイプを判定
pub fn image_mime_type(bytes: &[u8]) -> Result<&'static str> {
    image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .map_err(|e| FoodScanError::ImageLoad(format!("画像形式を判定できません: {}", e)))
}
