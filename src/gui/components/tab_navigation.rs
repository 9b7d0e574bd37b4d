use dioxus::prelude::*;

use crate::gui::styles::theme::CssClasses;
use crate::routes::Route;

fn tab_icon(route: &Route) -> &'static str {
    match route {
        Route::Home => "🏠",
        Route::Keynotes => "🎤",
        Route::Conferences | Route::ConferenceDetails(_) => "🏛️",
        Route::Analytics => "📊",
        _ => "",
    }
}

/// タブナビゲーションコンポーネント
#[component]
pub fn TabNavigation(active: Route, on_navigate: EventHandler<Route>) -> Element {
    // 詳細画面ではカンファレンスタブを選択状態にする
    let active_tab = match active {
        Route::ConferenceDetails(_) => Route::Conferences,
        other => other,
    };

    rsx! {
        nav {
            class: CssClasses::TAB_NAVIGATION,

            for tab in Route::navigation() {
                button {
                    key: "{tab}",
                    class: if tab == active_tab { "tab-button active" } else { CssClasses::TAB_BUTTON },
                    onclick: {
                        let tab = tab.clone();
                        move |_| on_navigate.call(tab.clone())
                    },
                    span { style: "margin-right: 8px;", "{tab_icon(&tab)}" }
                    span { "{tab.title()}" }
                }
            }
        }
    }
}
