//! ターミナル描画
//!
//! 共通ライブラリの描画命令（ResultsView / TranscriptEntry）をテキスト行に変換する。

use foodscan_common::{Entry, IngredientLine, Placement, ResultsAction, ResultsView, TranscriptEntry};

const USER_INDENT: &str = "                    ";

fn ingredient_block(lines: &[IngredientLine], indent: &str) -> Vec<String> {
    lines
        .iter()
        .map(|line| {
            if line.flagged {
                format!("{}  ! {}", indent, line.text)
            } else {
                format!("{}  - {}", indent, line.text)
            }
        })
        .collect()
}

/// 結果画面
pub fn results_lines(view: &ResultsView) -> Vec<String> {
    let mut lines = vec![format!("📷 {}", view.image()), format!("■ {}", view.title())];
    match view {
        ResultsView::NoFoodDetected { ingredients, notes, .. } => {
            lines.extend(ingredient_block(ingredients, ""));
            if !notes.is_empty() {
                lines.push(notes.clone());
            }
        }
        ResultsView::EstimateShown {
            quantity_line,
            calories_line,
            macros_line,
            fibre_line,
            ingredients,
            ..
        } => {
            lines.push(quantity_line.clone());
            lines.push(calories_line.clone());
            lines.push(macros_line.clone());
            lines.push(fibre_line.clone());
            if !ingredients.is_empty() {
                lines.push("Ingredients".to_string());
                lines.extend(ingredient_block(ingredients, ""));
            }
        }
    }
    lines
}

pub fn action_label(action: ResultsAction) -> &'static str {
    match action {
        ResultsAction::Increment => "+1",
        ResultsAction::Decrement => "-1",
        ResultsAction::Confirm => "Confirm",
        ResultsAction::Retake => "Retake",
        ResultsAction::Acknowledge => "OK",
    }
}

/// チャットログの1エントリ
pub fn entry_lines(entry: &TranscriptEntry) -> Vec<String> {
    let indent = match entry.entry.placement() {
        Placement::User => USER_INDENT,
        Placement::Bot => "",
    };
    match &entry.entry {
        Entry::UserText(text) => vec![format!("{}you: {}", indent, text)],
        Entry::BotText(text) => vec![format!("bot: {}", text)],
        Entry::Image(image) => vec![format!("{}[photo] {}", indent, image)],
        Entry::Notes(notes) => vec![format!("note: {}", notes)],
        Entry::Error(message) => vec![format!("error: {}", message)],
        Entry::Thinking => vec![format!("bot: {}", foodscan_common::transcript::THINKING_TEXT)],
        Entry::FoodCard(card) => {
            let mut lines = vec![
                format!("┌ {}", card.food),
                format!("│ {}", card.quantity_line),
                format!("│ {}", card.calories_line),
                format!("│ {}", card.macros_line),
            ];
            if !card.ingredients.is_empty() {
                lines.push("│ Ingredients".to_string());
                lines.extend(ingredient_block(&card.ingredients, "│"));
            }
            lines.push("└".to_string());
            lines
        }
    }
}

pub fn transcript_lines(entries: &[TranscriptEntry]) -> Vec<String> {
    entries.iter().flat_map(entry_lines).collect()
}
