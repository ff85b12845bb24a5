//! 解析中画面コンポーネント

use leptos::prelude::*;
use crate::app::AppState;

#[component]
pub fn ProcessingScreen(app: AppState) -> impl IntoView {
    let image = move || {
        app.with(|a| a.processing_image().map(|image| image.as_str().to_string()))
            .unwrap_or_default()
    };
    let text = move || app.with(|a| a.processing_text());

    view! {
        <div class="processing-screen">
            <img id="processingImage" class="processing-image" src=image alt="" />
            <div class="spinner" />
            <p id="processingText" class="processing-text">{text}</p>
        </div>
    }
}
