//! エラー型定義

use crate::navigator::{NavEvent, Screen};
use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid transition: {event:?} while on {from:?}")]
    InvalidTransition { from: Screen, event: NavEvent },

    #[error("A request is already in flight")]
    RequestInFlight,

    #[error("No estimate is under review")]
    NoActiveEstimate,
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
