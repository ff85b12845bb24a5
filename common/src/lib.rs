//! FoodScan Common Library
//!
//! CLIとWeb(WASM)で共有される型と、推定確認・チャット記録のロジック。
//! I/Oは持たない。

pub mod types;
pub mod error;
pub mod api;
pub mod totals;
pub mod session;
pub mod gate;
pub mod presenter;
pub mod transcript;
pub mod navigator;
pub mod processing;
pub mod controller;

pub use types::{Ingredient, MacrosPerUnit, MacrosResponse, NutritionEstimate, QuantityEstimate};
pub use error::{Error, Result};
pub use api::{ChatRequest, ChatResponse, Endpoints};
pub use totals::Totals;
pub use session::{ImageRef, ReviewSession, SelectedQuantity};
pub use gate::{RequestGate, RequestToken};
pub use presenter::{IngredientLine, ResultsAction, ResultsView};
pub use transcript::{Entry, EntryId, FoodCard, Placement, Transcript, TranscriptEntry};
pub use navigator::{NavEvent, Navigator, Screen};
pub use processing::ProcessingTicker;
pub use controller::{ChatSubmission, FoodScan, Review};
