//! 対話式の食事記録
//!
//! チャット画面では自由入力（`/photo` でカメラ、`/quit` で終了）、
//! カメラ画面では写真のパスを入力し、結果画面では数量調整・確定・撮り直しを選ぶ。

use crate::client::ApiClient;
use crate::error::Result;
use crate::processing::show_processing;
use crate::render::{action_label, entry_lines, results_lines};
use dialoguer::{Input, Select};
use foodscan_common::{
    EntryId, FoodScan, ImageRef, MacrosResponse, RequestToken, ResultsAction, Review, Screen,
};
use std::path::Path;

/// 入力行の解釈
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    Quit,
    OpenCamera,
    Message(String),
}

impl ChatInput {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "/quit" | "/q" | "/exit" => ChatInput::Quit,
            "/photo" | "/camera" | "/p" => ChatInput::OpenCamera,
            _ => ChatInput::Message(line.to_string()),
        }
    }
}

/// 未表示のエントリを出力する
#[derive(Debug, Default)]
pub struct TranscriptPrinter {
    last_printed: Option<EntryId>,
}

impl TranscriptPrinter {
    pub fn pending_lines(&mut self, app: &FoodScan) -> Vec<String> {
        let mut lines = Vec::new();
        for entry in app.transcript().entries() {
            if self.last_printed.is_some_and(|last| entry.id <= last) {
                continue;
            }
            lines.extend(entry_lines(entry));
            self.last_printed = Some(entry.id);
        }
        lines
    }

    pub fn flush(&mut self, app: &FoodScan) {
        for line in self.pending_lines(app) {
            println!("{}", line);
        }
    }
}

/// 数量を指定値に合わせる
pub fn set_quantity(app: &mut FoodScan, target: u32) {
    let Some(Review::Estimate(session)) = app.review() else {
        return;
    };
    let mut now = session.quantity.get();
    let target = target.max(1);
    while now < target && app.increment() {
        now += 1;
    }
    while now > target && app.decrement() {
        now -= 1;
    }
}

/// 結果画面の操作を適用
pub fn apply_action(app: &mut FoodScan, action: ResultsAction) -> Result<()> {
    match action {
        ResultsAction::Increment => {
            app.increment();
        }
        ResultsAction::Decrement => {
            app.decrement();
        }
        ResultsAction::Confirm => {
            app.confirm()?;
        }
        ResultsAction::Retake => {
            app.retake()?;
        }
        ResultsAction::Acknowledge => {
            app.acknowledge_no_food()?;
        }
    }
    Ok(())
}

/// 結果画面を抜けるまで操作を受け付ける
///
/// `auto_confirm` の場合は選択せずに確定（食べ物なしなら確認）する
pub fn review_results(app: &mut FoodScan, auto_confirm: bool) -> Result<()> {
    while app.screen() == Screen::Results {
        let Some(view) = app.results_view() else {
            break;
        };
        println!();
        for line in results_lines(&view) {
            println!("{}", line);
        }

        let action = if auto_confirm {
            if view.allows(ResultsAction::Confirm) {
                ResultsAction::Confirm
            } else {
                ResultsAction::Acknowledge
            }
        } else {
            let actions = view.actions();
            let labels: Vec<&str> = actions.iter().map(|a| action_label(*a)).collect();
            let default = actions
                .iter()
                .position(|a| matches!(a, ResultsAction::Confirm | ResultsAction::Acknowledge))
                .unwrap_or(0);
            let index = Select::new()
                .with_prompt("操作を選択")
                .items(&labels)
                .default(default)
                .interact()?;
            actions[index]
        };
        apply_action(app, action)?;
    }
    Ok(())
}

/// 推定リクエストの結果を反映
///
/// 失敗はチャットログにエラーとして残し、呼び出し側にも返す
pub fn apply_scan_result(app: &mut FoodScan, token: RequestToken, result: Result<MacrosResponse>) -> Result<()> {
    match result {
        Ok(response) => {
            app.receive_estimate(token, response);
            Ok(())
        }
        Err(e) => {
            tracing::warn!(error = %e, "image analysis failed");
            app.scan_failed(token, &e.short_message());
            Err(e)
        }
    }
}

/// 写真を送信して推定結果を反映
pub async fn scan_photo(app: &mut FoodScan, client: &ApiClient, path: &Path) -> Result<()> {
    let token = app.submit_image(ImageRef::new(path.display().to_string()))?;
    let result = show_processing(app, client.analyze_image(path)).await;
    apply_scan_result(app, token, result)
}

/// チャットを1往復
pub async fn chat_once(app: &mut FoodScan, client: &ApiClient, text: &str, printer: &mut TranscriptPrinter) {
    let Some(submission) = app.send_chat(text) else {
        return;
    };
    printer.flush(app);
    match client.chat(&submission.message).await {
        Ok(response) => {
            app.receive_reply(submission.token, response.reply.as_deref());
        }
        Err(e) => {
            tracing::warn!(error = %e, "chat request failed");
            app.chat_failed(submission.token, &e.short_message());
        }
    }
}

pub async fn run_session(client: &ApiClient) -> Result<()> {
    let mut app = FoodScan::new();
    let mut printer = TranscriptPrinter::default();

    println!("🍽  foodscan - /photo で撮影, /quit で終了\n");

    loop {
        match app.screen() {
            Screen::Chat => {
                let line: String = Input::new()
                    .with_prompt("you")
                    .allow_empty(true)
                    .interact_text()?;
                match ChatInput::parse(&line) {
                    ChatInput::Quit => break,
                    ChatInput::OpenCamera => {
                        app.open_camera()?;
                    }
                    ChatInput::Message(text) => {
                        chat_once(&mut app, client, &text, &mut printer).await;
                    }
                }
            }
            Screen::Camera => {
                let line: String = Input::new()
                    .with_prompt("photo path (空で戻る)")
                    .allow_empty(true)
                    .interact_text()?;
                let path = line.trim();
                if path.is_empty() {
                    app.close_camera()?;
                } else {
                    // 失敗はチャットログに出るのでセッションは続ける
                    if let Err(e) = scan_photo(&mut app, client, Path::new(path)).await {
                        tracing::debug!(error = %e, "scan did not produce an estimate");
                    }
                }
            }
            Screen::Results => review_results(&mut app, false)?,
            Screen::Processing => {
                // 送信は待ち合わせるのでここには来ない
                tracing::warn!("processing screen left without a response");
                break;
            }
        }
        printer.flush(&app);
    }

    Ok(())
}
