use thiserror::Error;

#[derive(Error, Debug)]
pub enum FoodScanError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("API呼び出しエラー: {0}")]
    ApiCall(String),

    #[error("APIがエラーを返しました (HTTP {status}): {body}")]
    ApiStatus { status: u16, body: String },

    #[error("{0}秒以内に応答がありませんでした")]
    Timeout(u64),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("対話入力エラー: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Core(#[from] foodscan_common::Error),
}

impl FoodScanError {
    /// チャットログに表示する短い説明
    pub fn short_message(&self) -> String {
        match self {
            FoodScanError::Timeout(secs) => format!("request timed out after {}s", secs),
            FoodScanError::ApiStatus { status, .. } => format!("HTTP {}", status),
            FoodScanError::ApiCall(msg) => format!("network error ({})", msg),
            FoodScanError::JsonParse(_) => "malformed response".to_string(),
            FoodScanError::Core(foodscan_common::Error::Json(_))
            | FoodScanError::Core(foodscan_common::Error::Parse(_)) => "malformed response".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FoodScanError>;
