//! 数量に応じた合計値の計算
//!
//! 合計は保存せず、常に `1単位あたり × 数量` で再計算する。

use crate::types::MacrosPerUnit;

/// 表示用の合計値（丸めなし）
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fibre: f64,
}

impl Totals {
    /// 1単位あたりの栄養素に数量を掛ける（欠損値は0）
    pub fn compute(macros: &MacrosPerUnit, quantity: u32) -> Self {
        let q = f64::from(quantity);
        let scale = |v: Option<f64>| v.unwrap_or(0.0) * q;
        Self {
            calories: scale(macros.calories),
            protein: scale(macros.protein_g),
            carbs: scale(macros.carbs_g),
            fat: scale(macros.fat_g),
            fibre: scale(macros.fibre_g),
        }
    }
}

/// カロリー表示（丸めない。104.0 は "104"）
pub fn format_calories(calories: f64) -> String {
    format!("{}", calories)
}

/// 小数1桁表示（表示専用）
pub fn format_one_decimal(value: f64) -> String {
    format!("{:.1}", value)
}

/// 信頼度をパーセント整数に
pub fn confidence_percent(confidence: f64) -> u32 {
    (confidence.clamp(0.0, 1.0) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn apple() -> MacrosPerUnit {
        MacrosPerUnit {
            calories: Some(52.0),
            protein_g: Some(0.3),
            carbs_g: Some(14.0),
            fat_g: Some(0.2),
            fibre_g: Some(2.4),
        }
    }

    #[test]
    fn test_apple_two_units() {
        let totals = Totals::compute(&apple(), 2);
        assert_eq!(format_calories(totals.calories), "104");
        assert_eq!(format_one_decimal(totals.fibre), "4.8");
        assert_eq!(format_one_decimal(totals.carbs), "28.0");
    }

    #[test]
    fn test_missing_fields_are_zero() {
        let macros = MacrosPerUnit {
            calories: Some(80.0),
            ..Default::default()
        };
        let totals = Totals::compute(&macros, 3);
        assert_eq!(totals.calories, 240.0);
        assert_eq!(totals.protein, 0.0);
        assert_eq!(totals.fibre, 0.0);
    }

    #[test]
    fn test_full_precision_kept() {
        let macros = MacrosPerUnit {
            protein_g: Some(0.15),
            ..Default::default()
        };
        let totals = Totals::compute(&macros, 3);
        assert!((totals.protein - 0.45).abs() < 1e-12);
    }

    #[test]
    fn test_format_calories_fraction() {
        assert_eq!(format_calories(104.5), "104.5");
        assert_eq!(format_calories(0.0), "0");
    }

    #[test]
    fn test_confidence_percent() {
        assert_eq!(confidence_percent(0.93), 93);
        assert_eq!(confidence_percent(0.555), 56);
        assert_eq!(confidence_percent(1.0), 100);
        assert_eq!(confidence_percent(0.0), 0);
    }

    proptest! {
        #[test]
        fn prop_totals_scale_linearly(
            m in 0.0f64..10_000.0,
            q in 1u32..1_000,
        ) {
            let macros = MacrosPerUnit {
                calories: Some(m),
                protein_g: Some(m),
                carbs_g: Some(m),
                fat_g: Some(m),
                fibre_g: Some(m),
            };
            let totals = Totals::compute(&macros, q);
            let expected = m * f64::from(q);
            prop_assert_eq!(totals.calories, expected);
            let shown: f64 = format_one_decimal(totals.protein).parse().unwrap();
            prop_assert!((shown - expected).abs() <= 0.05 + 1e-9);
        }
    }
}
