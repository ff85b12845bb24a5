//! ヘッダーコンポーネント

use leptos::prelude::*;
use foodscan_common::Screen;
use crate::app::AppState;

fn subtitle(screen: Screen) -> &'static str {
    match screen {
        Screen::Chat => "Meal journal",
        Screen::Camera => "New photo",
        Screen::Processing => "Analyzing",
        Screen::Results => "Review estimate",
    }
}

#[component]
pub fn Header(app: AppState) -> impl IntoView {
    let screen = Memo::new(move |_| app.with(|a| a.screen()));

    view! {
        <header class="header">
            <h1>"FoodScan"</h1>
            <p class="subtitle" data-screen=move || screen.get().as_str()>
                {move || subtitle(screen.get())}
            </p>
        </header>
    }
}
