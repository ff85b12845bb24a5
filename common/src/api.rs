//! 推定サービスとの通信契約
//!
//! - `POST <macros>`: multipart（フィールド名 `image`）→ NutritionEstimate JSON
//! - `POST <chat>`: `{"message": ...}` → `{"reply": ...}`

use serde::{Deserialize, Serialize};

pub const DEFAULT_MACROS_URL: &str = "https://foodscan-macros-backend.onrender.com/macros";
pub const DEFAULT_CHAT_URL: &str = "https://foodscan-macros-backend.onrender.com/chat";

/// multipartの画像フィールド名
pub const IMAGE_FIELD: &str = "image";

/// リクエストのタイムアウト（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub macros_url: String,
    pub chat_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            macros_url: DEFAULT_MACROS_URL.to_string(),
            chat_url: DEFAULT_CHAT_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub reply: Option<String>,
}
