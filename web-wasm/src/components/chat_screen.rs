//! チャット画面コンポーネント

use leptos::prelude::*;
use crate::app::{submit_chat, AppState};
use crate::components::transcript_view::TranscriptView;

#[component]
pub fn ChatScreen(app: AppState) -> impl IntoView {
    let (draft, set_draft) = signal(String::new());
    let is_chatting = Memo::new(move |_| app.with(|a| a.is_chatting()));

    let send = move || {
        if submit_chat(app, draft.get_untracked()) {
            set_draft.set(String::new());
        }
    };

    view! {
        <TranscriptView app=app />
        <div class="chat-input">
            <button
                class="btn btn-secondary"
                id="openCameraBtn"
                on:click=move |_| {
                    if let Err(e) = app.try_update(|a| a.open_camera()).transpose() {
                        gloo::console::warn!(e.to_string());
                    }
                }
            >
                "📷"
            </button>
            <input
                type="text"
                id="chatInput"
                placeholder="Ask about your meals…"
                prop:value=move || draft.get()
                on:input=move |ev| set_draft.set(event_target_value(&ev))
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    if ev.key() == "Enter" {
                        send();
                    }
                }
            />
            <button
                class="btn btn-primary"
                id="sendBtn"
                disabled=move || is_chatting.get()
                on:click=move |_| send()
            >
                "Send"
            </button>
        </div>
    }
}
