//! 解析中スピナー
//!
//! 推定リクエストの完了を待つ間、解析ステップの文言を順番に表示する。

use foodscan_common::processing::STEP_INTERVAL_MS;
use foodscan_common::FoodScan;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;

pub async fn show_processing<F>(app: &mut FoodScan, future: F) -> F::Output
where
    F: Future,
{
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.enable_steady_tick(Duration::from_millis(100));
    bar.set_message(app.processing_text());

    let mut interval = tokio::time::interval(Duration::from_millis(STEP_INTERVAL_MS));
    // 最初のtickは即時
    interval.tick().await;

    tokio::pin!(future);
    let output = loop {
        tokio::select! {
            output = &mut future => break output,
            _ = interval.tick() => bar.set_message(app.advance_processing()),
        }
    };

    bar.finish_and_clear();
    output
}
