//! 推定結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - NutritionEstimate: 画像1枚分の栄養推定（/macros のレスポンス）
//! - MacrosResponse: 推定成功 / 食べ物なし の判別結果

use serde::{Deserialize, Deserializer, Serialize};

/// 推定された数量
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantityEstimate {
    /// 個数・倍率（小数もあり得る）
    pub value: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub unit: String,
    /// 1単位あたりのグラム数
    #[serde(deserialize_with = "null_as_default")]
    pub weight_g: f64,
}

/// 1単位あたりの栄養素
///
/// 欠けている値は計算時に0として扱う
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacrosPerUnit {
    pub calories: Option<f64>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub fibre_g: Option<f64>,
}

/// 材料
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ingredient {
    #[serde(deserialize_with = "null_as_default")]
    pub item: String,
    #[serde(deserialize_with = "string_or_number")]
    pub quantity: String,
    /// 0.0〜1.0
    #[serde(deserialize_with = "null_as_default")]
    pub confidence: f64,
}

/// 栄養推定結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionEstimate {
    #[serde(deserialize_with = "null_as_default")]
    pub food: String,
    #[serde(deserialize_with = "null_as_default")]
    pub quantity: QuantityEstimate,
    #[serde(deserialize_with = "null_as_default")]
    pub macros_per_unit: MacrosPerUnit,
    #[serde(deserialize_with = "null_as_default")]
    pub ingredients: Vec<Ingredient>,
    pub notes: Option<String>,
}

/// /macros レスポンスの判別結果
#[derive(Debug, Clone, PartialEq)]
pub enum MacrosResponse {
    /// 食べ物が検出されなかった（エラーではなく通常のデータ状態）
    NoFood { message: String },
    Estimate(NutritionEstimate),
}

/// no_food フラグ判定用の生レスポンス
#[derive(Deserialize)]
struct RawMacrosResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    no_food: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(flatten)]
    estimate: NutritionEstimate,
}

impl MacrosResponse {
    /// JSON文字列からパース（推定値はsanitize済み）
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json.trim())?;
        Self::from_value(value)
    }

    /// serde_json::Value からパース
    pub fn from_value(value: serde_json::Value) -> crate::Result<Self> {
        if !value.is_object() {
            return Err(crate::Error::Parse(
                "macros response is not a JSON object".into(),
            ));
        }
        let raw: RawMacrosResponse = serde_json::from_value(value)?;
        if raw.no_food {
            return Ok(MacrosResponse::NoFood {
                message: raw.message.unwrap_or_default(),
            });
        }
        Ok(MacrosResponse::Estimate(raw.estimate.sanitized()))
    }
}

impl NutritionEstimate {
    /// 空でないメモ
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref().filter(|n| !n.trim().is_empty())
    }

    /// 不変条件（栄養素 >= 0、confidence ∈ [0,1]）を満たすよう補正
    pub fn sanitized(mut self) -> Self {
        let mut clamped = false;
        {
            let m = &mut self.macros_per_unit;
            for field in [
                &mut m.calories,
                &mut m.protein_g,
                &mut m.carbs_g,
                &mut m.fat_g,
                &mut m.fibre_g,
            ] {
                if let Some(v) = field {
                    if !v.is_finite() || *v < 0.0 {
                        *v = 0.0;
                        clamped = true;
                    }
                }
            }
        }
        for ingredient in &mut self.ingredients {
            let c = ingredient.confidence;
            let fixed = if c.is_finite() { c.clamp(0.0, 1.0) } else { 0.0 };
            if fixed != c {
                ingredient.confidence = fixed;
                clamped = true;
            }
        }
        if !self.quantity.weight_g.is_finite() || self.quantity.weight_g < 0.0 {
            self.quantity.weight_g = 0.0;
            clamped = true;
        }
        if clamped {
            tracing::warn!(food = %self.food, "estimate contained out-of-range values; clamped");
        }
        self
    }
}

/// nullは欠損と同じく既定値にする
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 文字列・数値どちらでも受け付ける
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}
