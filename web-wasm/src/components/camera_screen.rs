//! カメラ画面コンポーネント
//!
//! シャッターで非表示のファイル入力（capture付き）を開き、選択された写真を送信する。

use leptos::prelude::*;
use leptos::html::Input;
use crate::app::{submit_photo, AppState};

#[component]
pub fn CameraScreen(app: AppState) -> impl IntoView {
    let camera_input = NodeRef::<Input>::new();
    let is_scanning = Memo::new(move |_| app.with(|a| a.is_scanning()));

    let on_back = move |_: web_sys::MouseEvent| {
        if let Err(e) = app.try_update(|a| a.close_camera()).transpose() {
            gloo::console::warn!(e.to_string());
        }
    };

    let on_shutter = move |_: web_sys::MouseEvent| {
        if let Some(input) = camera_input.get() {
            input.click();
        }
    };

    let on_change = move |ev: web_sys::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        let file = input.files().and_then(|files| files.get(0));
        // 同じ写真を再選択してもchangeが発火するように
        input.set_value("");
        if let Some(file) = file {
            submit_photo(app, file);
        }
    };

    view! {
        <div class="camera-screen">
            <button class="btn btn-tertiary" id="cameraBackBtn" on:click=on_back>
                "← Back"
            </button>
            <div class="camera-viewfinder">
                <div class="upload-icon">"📷"</div>
                <p class="text-muted">"Take a photo of your meal"</p>
            </div>
            <input
                type="file"
                id="cameraInput"
                accept="image/*"
                capture="environment"
                class="hidden"
                node_ref=camera_input
                on:change=on_change
            />
            <button
                class="btn btn-primary shutter"
                id="cameraShutter"
                disabled=move || is_scanning.get()
                on:click=on_shutter
            >
                "●"
            </button>
        </div>
    }
}
