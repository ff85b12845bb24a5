//! 推定結果画面コンポーネント
//!
//! 表示内容は `ResultsView` をそのまま描画する。数量ボタンは推定表示時のみ。

use leptos::prelude::*;
use foodscan_common::{IngredientLine, ResultsView};
use crate::app::AppState;
use crate::components::transcript_view::ingredient_class;

fn ingredient_list(lines: Vec<IngredientLine>) -> impl IntoView {
    view! {
        <ul id="result-ingredients">
            {lines
                .into_iter()
                .map(|line| view! { <li class=ingredient_class(&line)>{line.text.clone()}</li> })
                .collect_view()}
        </ul>
    }
}

fn log_error<T>(result: Option<foodscan_common::Result<T>>) {
    if let Some(Err(e)) = result {
        gloo::console::warn!(e.to_string());
    }
}

#[component]
pub fn ResultsScreen(app: AppState) -> impl IntoView {
    let view_state = Memo::new(move |_| app.with(|a| a.results_view()));

    let on_minus = move |_: web_sys::MouseEvent| {
        app.update(|a| {
            a.decrement();
        })
    };
    let on_plus = move |_: web_sys::MouseEvent| {
        app.update(|a| {
            a.increment();
        })
    };
    let on_confirm = move |_: web_sys::MouseEvent| log_error(app.try_update(|a| a.confirm()));
    let on_retake = move |_: web_sys::MouseEvent| log_error(app.try_update(|a| a.retake()));
    let on_acknowledge = move |_: web_sys::MouseEvent| log_error(app.try_update(|a| a.acknowledge_no_food()));

    move || {
        view_state.get().map(|results| match results {
            ResultsView::NoFoodDetected { image, title, ingredients, notes } => view! {
                <div class="results">
                    <img id="resultImg" src=image.as_str().to_string() class="result-image" alt="" />
                    <h2 id="result-title">{title}</h2>
                    {ingredient_list(ingredients)}
                    <p id="result-notes" class="text-muted">{notes}</p>
                    <div class="result-actions">
                        <button class="btn btn-primary" id="confirmBtn" on:click=on_acknowledge>
                            "OK"
                        </button>
                    </div>
                </div>
            }
            .into_any(),
            ResultsView::EstimateShown {
                image,
                title,
                quantity,
                quantity_line,
                calories_line,
                macros_line,
                fibre_line,
                ingredients,
            } => view! {
                <div class="results">
                    <img id="resultImg" src=image.as_str().to_string() class="result-image" alt="" />
                    <h2 id="result-title">{title}</h2>
                    <div class="quantity-controls">
                        <button class="btn btn-small btn-secondary" id="qtyMinus" disabled={quantity <= 1} on:click=on_minus>
                            "−"
                        </button>
                        <span id="qtyValue">{quantity}</span>
                        <button class="btn btn-small btn-secondary" id="qtyPlus" on:click=on_plus>
                            "+"
                        </button>
                    </div>
                    <p id="result-quantity" class="text-muted">{quantity_line}</p>
                    <p id="result-cal" class="calories">{calories_line}</p>
                    <p id="result-macros">{macros_line}</p>
                    <p id="result-fibre">{fibre_line}</p>
                    <p class="font-semibold">"Ingredients"</p>
                    {ingredient_list(ingredients)}
                    <div class="result-actions">
                        <button class="btn btn-tertiary" id="retakeBtn" on:click=on_retake>
                            "Retake"
                        </button>
                        <button class="btn btn-primary" id="confirmBtn" on:click=on_confirm>
                            "Confirm"
                        </button>
                    </div>
                </div>
            }
            .into_any(),
        })
    }
}
