//! FoodScan CLI
//!
//! 推定サービスとの通信とターミナル描画。状態遷移は foodscan_common に任せる。

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod processing;
pub mod render;
pub mod session;
