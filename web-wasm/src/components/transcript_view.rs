//! チャットログ表示コンポーネント

use leptos::prelude::*;
use leptos::html::Div;
use foodscan_common::transcript::THINKING_TEXT;
use foodscan_common::{Entry, IngredientLine, Placement, TranscriptEntry};
use crate::app::AppState;

/// エントリ種別ごとのCSSクラス
pub fn bubble_class(entry: &Entry) -> String {
    let side = match entry.placement() {
        Placement::User => "self-end",
        Placement::Bot => "self-start",
    };
    format!("bubble bubble-{} {}", entry.kind(), side)
}

pub fn ingredient_class(line: &IngredientLine) -> &'static str {
    if line.flagged {
        "ingredient flagged"
    } else {
        "ingredient"
    }
}

#[component]
pub fn TranscriptView(app: AppState) -> impl IntoView {
    let container = NodeRef::<Div>::new();
    let revision = Memo::new(move |_| app.with(|a| a.transcript().revision()));

    // 追記のたびに最新エントリまでスクロール
    Effect::new(move |_| {
        revision.track();
        if let Some(el) = container.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    view! {
        <div id="chat-container" class="chat-container" node_ref=container>
            <For
                each=move || app.with(|a| a.transcript().entries().to_vec())
                key=|entry| entry.id
                children=move |entry| view! { <Bubble entry=entry /> }
            />
        </div>
    }
}

#[component]
fn Bubble(entry: TranscriptEntry) -> impl IntoView {
    let class = bubble_class(&entry.entry);
    let body = match entry.entry {
        Entry::UserText(text) | Entry::BotText(text) | Entry::Notes(text) | Entry::Error(text) => {
            view! { <p>{text}</p> }.into_any()
        }
        Entry::Thinking => view! { <p class="italic">{THINKING_TEXT}</p> }.into_any(),
        Entry::Image(image) => view! {
            <img src=image.as_str().to_string() class="thumb" alt="meal photo" />
        }
        .into_any(),
        Entry::FoodCard(card) => view! {
            <div class="food-card">
                <img src=card.image.as_str().to_string() class="thumb-small" alt=card.food.clone() />
                <div class="food-card-body">
                    <p class="font-bold">{card.food}</p>
                    <p class="text-muted">{card.quantity_line}</p>
                    <p>{card.calories_line}</p>
                    <p class="text-muted">{card.macros_line}</p>
                    <p class="font-semibold">"Ingredients"</p>
                    <ul>
                        {card.ingredients
                            .into_iter()
                            .map(|line| view! { <li class=ingredient_class(&line)>{line.text.clone()}</li> })
                            .collect_view()}
                    </ul>
                </div>
            </div>
        }
        .into_any(),
    };

    view! { <div class=class>{body}</div> }
}
