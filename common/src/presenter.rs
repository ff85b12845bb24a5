//! 推定結果画面の表示内容
//!
//! UIに依存しない描画命令（`ResultsView`）を生成する。
//! 実際の描画はWeb/CLIそれぞれのアダプタが行う。

use crate::session::{ImageRef, ReviewSession};
use crate::totals::{confidence_percent, format_calories, format_one_decimal};
use crate::types::Ingredient;

pub const NO_FOOD_TITLE: &str = "No food detected";
pub const NO_FOOD_PLACEHOLDER: &str = "Image unclear.";

/// 材料リストの1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientLine {
    pub text: String,
    /// エラー表示（赤字）
    pub flagged: bool,
}

impl IngredientLine {
    pub fn from_ingredient(ingredient: &Ingredient) -> Self {
        Self {
            text: format!(
                "{} — {} ({}%)",
                ingredient.item,
                ingredient.quantity,
                confidence_percent(ingredient.confidence)
            ),
            flagged: false,
        }
    }

    pub fn flagged(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            flagged: true,
        }
    }
}

pub fn ingredient_lines(ingredients: &[Ingredient]) -> Vec<IngredientLine> {
    ingredients.iter().map(IngredientLine::from_ingredient).collect()
}

/// 結果画面で可能な操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsAction {
    Increment,
    Decrement,
    Confirm,
    Retake,
    Acknowledge,
}

/// 結果画面の描画内容
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    NoFoodDetected {
        image: ImageRef,
        title: String,
        ingredients: Vec<IngredientLine>,
        notes: String,
    },
    EstimateShown {
        image: ImageRef,
        title: String,
        quantity: u32,
        quantity_line: String,
        calories_line: String,
        macros_line: String,
        fibre_line: String,
        ingredients: Vec<IngredientLine>,
    },
}

impl ResultsView {
    /// 食べ物が検出されなかった場合
    pub fn no_food(image: ImageRef, message: &str) -> Self {
        ResultsView::NoFoodDetected {
            image,
            title: NO_FOOD_TITLE.to_string(),
            ingredients: vec![IngredientLine::flagged(NO_FOOD_PLACEHOLDER)],
            notes: message.to_string(),
        }
    }

    /// 現在の数量で推定結果を描画
    pub fn estimate(session: &ReviewSession) -> Self {
        let q = session.quantity.get();
        let estimate = &session.estimate;
        let totals = session.totals();
        ResultsView::EstimateShown {
            image: session.image.clone(),
            title: estimate.food.clone(),
            quantity: q,
            quantity_line: format!(
                "{} × {} ({}g total)",
                q,
                estimate.quantity.unit,
                estimate.quantity.weight_g * f64::from(q)
            ),
            calories_line: format!("{} kcal", format_calories(totals.calories)),
            macros_line: format!(
                "Protein: {}g • Carbs: {}g • Fat: {}g",
                format_one_decimal(totals.protein),
                format_one_decimal(totals.carbs),
                format_one_decimal(totals.fat)
            ),
            fibre_line: format!("Fibre: {}g", format_one_decimal(totals.fibre)),
            ingredients: ingredient_lines(&estimate.ingredients),
        }
    }

    pub fn image(&self) -> &ImageRef {
        match self {
            ResultsView::NoFoodDetected { image, .. } | ResultsView::EstimateShown { image, .. } => image,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ResultsView::NoFoodDetected { title, .. } | ResultsView::EstimateShown { title, .. } => title,
        }
    }

    pub fn ingredients(&self) -> &[IngredientLine] {
        match self {
            ResultsView::NoFoodDetected { ingredients, .. }
            | ResultsView::EstimateShown { ingredients, .. } => ingredients,
        }
    }

    /// 数量ボタンは推定表示時のみ有効
    pub fn actions(&self) -> &'static [ResultsAction] {
        match self {
            ResultsView::NoFoodDetected { .. } => &[ResultsAction::Acknowledge],
            ResultsView::EstimateShown { .. } => &[
                ResultsAction::Decrement,
                ResultsAction::Increment,
                ResultsAction::Confirm,
                ResultsAction::Retake,
            ],
        }
    }

    pub fn allows(&self, action: ResultsAction) -> bool {
        self.actions().contains(&action)
    }
}
