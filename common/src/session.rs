//! 確認中の推定セッション
//!
//! 撮影から確定（または破棄）までの状態を値オブジェクトとして保持する。

use crate::totals::Totals;
use crate::types::{NutritionEstimate, QuantityEstimate};
use serde::{Deserialize, Serialize};

/// 写真の参照（WebではオブジェクトURL、CLIではファイルパス）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// ユーザーが選択した数量（常に1以上）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SelectedQuantity(u32);

impl SelectedQuantity {
    pub const MIN: u32 = 1;

    /// 1未満は1に切り上げ
    pub fn new(value: u32) -> Self {
        Self(value.max(Self::MIN))
    }

    /// 推定の `quantity.value` を四捨五入して初期値にする（なければ1）
    pub fn from_estimate(quantity: &QuantityEstimate) -> Self {
        match quantity.value {
            Some(v) if v.is_finite() && v >= 1.0 => Self::new(v.round().min(f64::from(u32::MAX)) as u32),
            _ => Self(Self::MIN),
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn increment(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    /// 1のときは何もしない。変化したらtrue
    pub fn decrement(&mut self) -> bool {
        if self.0 > Self::MIN {
            self.0 -= 1;
            true
        } else {
            false
        }
    }
}

impl Default for SelectedQuantity {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl std::fmt::Display for SelectedQuantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 推定結果の確認セッション
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSession {
    pub image: ImageRef,
    pub estimate: NutritionEstimate,
    pub quantity: SelectedQuantity,
}

impl ReviewSession {
    /// 新しい推定を読み込む。数量は推定値でリセットされる
    pub fn new(image: ImageRef, estimate: NutritionEstimate) -> Self {
        let quantity = SelectedQuantity::from_estimate(&estimate.quantity);
        Self {
            image,
            estimate,
            quantity,
        }
    }

    pub fn totals(&self) -> Totals {
        Totals::compute(&self.estimate.macros_per_unit, self.quantity.get())
    }

    pub fn increment(&mut self) {
        self.quantity.increment();
    }

    pub fn decrement(&mut self) -> bool {
        self.quantity.decrement()
    }
}
