//! メインアプリケーションコンポーネント
//!
//! 状態はすべて `FoodScan` が持つ。各画面は表示と操作の受け渡しだけを行う。

use leptos::prelude::*;
use leptos::task::spawn_local;
use foodscan_common::processing::STEP_INTERVAL_MS;
use foodscan_common::{FoodScan, ImageRef, Screen};
use std::time::Duration;
use crate::api;
use crate::components::{
    header::Header,
    chat_screen::ChatScreen,
    camera_screen::CameraScreen,
    processing_screen::ProcessingScreen,
    results_screen::ResultsScreen,
};
use crate::config;

/// アプリケーション全体の状態
pub type AppState = RwSignal<FoodScan>;

/// 写真を送信し、応答が来るまで解析ステップ表示を進める
pub fn submit_photo(app: AppState, file: web_sys::File) {
    let url = match web_sys::Url::create_object_url_with_blob(&file) {
        Ok(url) => url,
        Err(e) => {
            gloo::console::error!("failed to create preview url", e);
            return;
        }
    };

    let submitted = app.try_update(|a| a.submit_image(ImageRef::new(url)));
    let token = match submitted {
        Some(Ok(token)) => token,
        Some(Err(e)) => {
            gloo::console::warn!(format!("image submission rejected: {}", e));
            return;
        }
        None => return,
    };

    let ticker = set_interval_with_handle(
        move || app.update(|a| {
            a.advance_processing();
        }),
        Duration::from_millis(STEP_INTERVAL_MS),
    )
    .ok();

    spawn_local(async move {
        let endpoints = config::endpoints();
        let result = api::macros::analyze_image(&endpoints.macros_url, &file, config::TIMEOUT_SECS).await;
        if let Some(ticker) = ticker {
            ticker.clear();
        }
        app.update(|a| match result {
            Ok(response) => {
                if !a.receive_estimate(token, response) {
                    gloo::console::warn!("stale estimate discarded");
                }
            }
            Err(message) => {
                gloo::console::error!(format!("image analysis failed: {}", message));
                a.scan_failed(token, &message);
            }
        });
    });
}

/// メッセージを送信し、返信をチャットに追記
pub fn submit_chat(app: AppState, text: String) -> bool {
    let Some(submission) = app.try_update(|a| a.send_chat(&text)).flatten() else {
        return false;
    };

    spawn_local(async move {
        let endpoints = config::endpoints();
        let result =
            api::chat::send_message(&endpoints.chat_url, &submission.message, config::TIMEOUT_SECS).await;
        app.update(|a| match result {
            Ok(response) => {
                a.receive_reply(submission.token, response.reply.as_deref());
            }
            Err(message) => {
                gloo::console::error!(format!("chat request failed: {}", message));
                a.chat_failed(submission.token, &message);
            }
        });
    });
    true
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let app: AppState = RwSignal::new(FoodScan::new());
    let screen = Memo::new(move |_| app.with(|a| a.screen()));

    view! {
        <div class="container">
            <Header app=app />
            <section id="screen-chat" class="screen" class:hidden=move || screen.get() != Screen::Chat>
                <ChatScreen app=app />
            </section>
            <section id="screen-camera" class="screen" class:hidden=move || screen.get() != Screen::Camera>
                <CameraScreen app=app />
            </section>
            <section id="screen-processing" class="screen" class:hidden=move || screen.get() != Screen::Processing>
                <ProcessingScreen app=app />
            </section>
            <section id="screen-results" class="screen" class:hidden=move || screen.get() != Screen::Results>
                <ResultsScreen app=app />
            </section>
        </div>
    }
}
