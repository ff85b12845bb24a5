//! 画面遷移
//!
//! Chat / Camera / Processing / Results の4画面のうち常に1つだけが表示される。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Chat,
    Camera,
    Processing,
    Results,
}

impl Screen {
    pub const ALL: [Screen; 4] = [Screen::Chat, Screen::Camera, Screen::Processing, Screen::Results];

    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Chat => "chat",
            Screen::Camera => "camera",
            Screen::Processing => "processing",
            Screen::Results => "results",
        }
    }
}

/// 遷移を起こすイベント
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavEvent {
    OpenCamera,
    Back,
    ImageSelected,
    /// 推定結果（食べ物なしを含む）の到着。自動遷移
    EstimateReceived,
    /// 推定リクエストの失敗・タイムアウト。自動遷移
    RequestFailed,
    Confirm,
    AcknowledgeNoFood,
    Retake,
}

#[derive(Debug, Clone, Default)]
pub struct Navigator {
    current: Screen,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn is_visible(&self, screen: Screen) -> bool {
        self.current == screen
    }

    /// 遷移先を求める（状態は変えない）
    pub fn target(from: Screen, event: NavEvent) -> Option<Screen> {
        use NavEvent::*;
        use Screen::*;
        match (from, event) {
            (Chat, OpenCamera) => Some(Camera),
            (Camera, Back) => Some(Chat),
            (Camera, ImageSelected) => Some(Processing),
            (Processing, EstimateReceived) => Some(Results),
            (Processing, RequestFailed) => Some(Chat),
            (Results, Confirm) | (Results, AcknowledgeNoFood) => Some(Chat),
            (Results, Retake) => Some(Camera),
            _ => None,
        }
    }

    /// 遷移を実行。不正なイベントなら状態は変わらない
    pub fn dispatch(&mut self, event: NavEvent) -> Result<Screen> {
        let from = self.current;
        let to = Self::target(from, event).ok_or(Error::InvalidTransition { from, event })?;
        tracing::debug!(from = from.as_str(), to = to.as_str(), ?event, "screen transition");
        self.current = to;
        Ok(to)
    }
}
