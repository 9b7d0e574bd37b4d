use dioxus::prelude::*;

use crate::api::ApiError;
use crate::gui::styles::theme::{get_button_class, get_error_class};

/// 閉じられるエラー表示
#[component]
pub fn ErrorBanner(error: Option<ApiError>, on_dismiss: EventHandler<()>) -> Element {
    let Some(error) = error else {
        return rsx! {};
    };

    let message = match error.status() {
        Some(401) | Some(403) => "権限がありません。再ログインしてください。".to_string(),
        _ => error.to_string(),
    };

    rsx! {
        div {
            class: get_error_class(error.kind()),
            span { "⚠️ {message}" }
            button {
                class: get_button_class("secondary", false),
                onclick: move |_| on_dismiss.call(()),
                "閉じる"
            }
        }
    }
}
