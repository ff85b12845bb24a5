//! チャットログ（追記専用）
//!
//! エントリは追記のみ。例外は「Thinking…」プレースホルダで、
//! 返信到着時または失敗時に一度だけ削除される。

use crate::presenter::{ingredient_lines, IngredientLine};
use crate::session::{ImageRef, SelectedQuantity};
use crate::totals::{format_calories, format_one_decimal, Totals};
use crate::types::NutritionEstimate;

pub const FALLBACK_REPLY: &str = "I didn't understand that.";
pub const THINKING_TEXT: &str = "Thinking…";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

/// 吹き出しの配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// ユーザー側（右寄せ）
    User,
    /// ボット側（左寄せ）
    Bot,
}

/// 確定済みの食事カード
#[derive(Debug, Clone, PartialEq)]
pub struct FoodCard {
    pub image: ImageRef,
    pub food: String,
    pub quantity_line: String,
    pub calories_line: String,
    pub macros_line: String,
    pub ingredients: Vec<IngredientLine>,
}

impl FoodCard {
    pub fn new(estimate: &NutritionEstimate, image: &ImageRef, quantity: SelectedQuantity) -> Self {
        let q = quantity.get();
        let totals = Totals::compute(&estimate.macros_per_unit, q);
        Self {
            image: image.clone(),
            food: estimate.food.clone(),
            quantity_line: format!("Quantity: {} × {}", q, estimate.quantity.unit),
            calories_line: format!("{} kcal", format_calories(totals.calories)),
            macros_line: format!(
                "P: {}g | C: {}g | F: {}g | Fibre: {}g",
                format_one_decimal(totals.protein),
                format_one_decimal(totals.carbs),
                format_one_decimal(totals.fat),
                format_one_decimal(totals.fibre)
            ),
            ingredients: ingredient_lines(&estimate.ingredients),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    UserText(String),
    BotText(String),
    Image(ImageRef),
    FoodCard(FoodCard),
    Notes(String),
    /// 通信失敗などをボット側に表示
    Error(String),
    Thinking,
}

impl Entry {
    pub fn placement(&self) -> Placement {
        match self {
            Entry::UserText(_) | Entry::Image(_) => Placement::User,
            _ => Placement::Bot,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Entry::UserText(_) => "user",
            Entry::BotText(_) => "bot",
            Entry::Image(_) => "image",
            Entry::FoodCard(_) => "food-card",
            Entry::Notes(_) => "notes",
            Entry::Error(_) => "error",
            Entry::Thinking => "thinking",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub id: EntryId,
    pub entry: Entry,
}

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    next_id: u64,
    revision: u64,
    scroll_target: Option<EntryId>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 変更のたびに増える。アダプタはこれを見てスクロールする
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// 最後に追記されたエントリ
    pub fn scroll_target(&self) -> Option<EntryId> {
        self.scroll_target
    }

    pub fn has_thinking(&self) -> bool {
        self.entries.iter().any(|e| e.entry == Entry::Thinking)
    }

    fn append(&mut self, entry: Entry) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push(TranscriptEntry { id, entry });
        self.revision += 1;
        self.scroll_target = Some(id);
        id
    }

    /// ユーザー発言をそのまま追記
    pub fn log_user_text(&mut self, text: &str) -> EntryId {
        self.append(Entry::UserText(text.to_string()))
    }

    /// ボット返信を追記。空なら定型文
    pub fn log_bot_reply(&mut self, reply: Option<&str>) -> EntryId {
        let text = match reply {
            Some(r) if !r.trim().is_empty() => r.to_string(),
            _ => FALLBACK_REPLY.to_string(),
        };
        self.append(Entry::BotText(text))
    }

    pub fn log_error(&mut self, message: &str) -> EntryId {
        self.append(Entry::Error(message.to_string()))
    }

    /// プレースホルダは同時に1つまで
    pub fn log_thinking(&mut self) -> EntryId {
        if let Some(existing) = self.entries.iter().find(|e| e.entry == Entry::Thinking) {
            return existing.id;
        }
        self.append(Entry::Thinking)
    }

    /// プレースホルダを削除。なければ何もしない
    pub fn clear_thinking(&mut self) -> bool {
        let Some(pos) = self.entries.iter().position(|e| e.entry == Entry::Thinking) else {
            return false;
        };
        self.entries.remove(pos);
        self.revision += 1;
        self.scroll_target = self.entries.last().map(|e| e.id);
        true
    }

    /// 確定した推定を追記: 画像 → 食事カード → (メモ)
    ///
    /// 追記したエントリ数を返す
    pub fn log_confirmed_estimate(
        &mut self,
        estimate: &NutritionEstimate,
        image: &ImageRef,
        quantity: SelectedQuantity,
    ) -> usize {
        let card = FoodCard::new(estimate, image, quantity);
        self.append(Entry::Image(image.clone()));
        self.append(Entry::FoodCard(card));
        match estimate.notes() {
            Some(notes) => {
                self.append(Entry::Notes(notes.to_string()));
                3
            }
            None => 2,
        }
    }
}
