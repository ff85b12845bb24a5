//! ビルド時設定
//!
//! `FOODSCAN_MACROS_URL` / `FOODSCAN_CHAT_URL` をビルド時に指定すると接続先を変更できる。

use foodscan_common::api::{Endpoints, DEFAULT_CHAT_URL, DEFAULT_MACROS_URL, DEFAULT_TIMEOUT_SECS};

pub const TIMEOUT_SECS: u64 = DEFAULT_TIMEOUT_SECS;

pub fn endpoints() -> Endpoints {
    Endpoints {
        macros_url: option_env!("FOODSCAN_MACROS_URL")
            .unwrap_or(DEFAULT_MACROS_URL)
            .to_string(),
        chat_url: option_env!("FOODSCAN_CHAT_URL")
            .unwrap_or(DEFAULT_CHAT_URL)
            .to_string(),
    }
}
