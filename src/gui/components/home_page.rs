use dioxus::prelude::*;

use crate::gui::app_context::AppContext;
use crate::gui::styles::theme::CssClasses;
use crate::routes::Route;

/// ホーム画面
#[component]
pub fn HomePage() -> Element {
    let ctx = use_context::<AppContext>();
    let mut route = use_context::<Signal<Route>>();
    let username = ctx.session.username().unwrap_or_else(|| "admin".to_string());

    rsx! {
        div {
            class: CssClasses::CARD,

            div {
                class: CssClasses::CARD_HEADER,
                h2 { "👋 ようこそ、{username} さん" }
            }

            p { "カンファレンス管理コンソールです。上のタブから各画面を開いてください。" }

            div {
                class: CssClasses::BTN_GROUP,
                button {
                    class: "btn btn-primary",
                    onclick: move |_| route.set(Route::Keynotes),
                    "🎤 キーノート"
                }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| route.set(Route::Conferences),
                    "🏛️ カンファレンス"
                }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| route.set(Route::Analytics),
                    "📊 分析"
                }
            }
        }
    }
}
