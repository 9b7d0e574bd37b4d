use dioxus::prelude::*;

use crate::auth::SessionStatus;
use crate::gui::{
    app_context::AppContext,
    components::{
        AnalyticsPage, ConferenceDetailsPage, ConferencesPage, HomePage, KeynotesPage, LoginPage,
        TabNavigation,
    },
    styles::theme::{get_button_class, get_embedded_css, CssClasses},
};
use crate::routes::{guard, Route};

/// セッション確認の間隔
const KEEP_ALIVE_CHECK: std::time::Duration = std::time::Duration::from_secs(30);
/// この秒数以内に期限が切れるならリフレッシュする
const KEEP_ALIVE_MARGIN_SECS: i64 = 60;

/// メインウィンドウコンポーネント
///
/// 要求されたルートは保持したまま、描画時にガードを通す。
/// 未ログインでもルートは書き換えないので、ログイン後は要求された画面が表示される。
#[component]
pub fn MainWindow() -> Element {
    let ctx = use_context::<AppContext>();
    let mut route = use_context_provider(|| Signal::new(Route::Home));
    let mut session_status = use_context_provider(|| Signal::new(ctx.session.status()));

    // 保存済みセッションの復元（起動時に一度だけ）
    let mut restoring = use_signal(|| ctx.config.auth.remember_session);
    use_hook(|| {
        if ctx.config.auth.remember_session {
            let auth = ctx.auth.clone();
            spawn(async move {
                let status = auth.restore().await;
                tracing::info!(status = ?status, "🔑 Session restore finished");
                session_status.set(status);
                restoring.set(false);
            });
        }
    });

    // 期限切れ前にトークンを更新し、更新できなければログイン画面へ
    use_hook(|| {
        let auth = ctx.auth.clone();
        spawn(async move {
            loop {
                tokio::time::sleep(KEEP_ALIVE_CHECK).await;
                let status = auth.keep_alive(chrono::Duration::seconds(KEEP_ALIVE_MARGIN_SECS)).await;
                if *session_status.peek() != status {
                    tracing::info!(status = ?status, "🔑 Session status changed");
                    session_status.set(status);
                }
            }
        });
    });

    // 読み取りで再描画を購読する
    let _ = session_status.read();
    let requested = route.read().clone();
    let rendered = guard(requested.clone(), &ctx.session);
    let authenticated = ctx.session.is_authenticated();
    let username = ctx.session.username();

    tracing::debug!(requested = %requested, rendered = %rendered, "🖥️ MainWindow: Rendering");

    let on_logout = {
        let auth = ctx.auth.clone();
        move |_| {
            let auth = auth.clone();
            spawn(async move {
                auth.logout().await;
                session_status.set(SessionStatus::Anonymous);
                route.set(Route::Home);
            });
        }
    };

    rsx! {
        // CSSスタイルをdocument headに注入
        document::Style {
            {get_embedded_css()}
        }

        div {
            class: CssClasses::MAIN_WINDOW,

            // ヘッダー
            div {
                class: CssClasses::APP_HEADER,
                h1 { class: CssClasses::APP_TITLE, "🎟️ Confdesk" }

                if authenticated {
                    div {
                        class: CssClasses::APP_USER,
                        if let Some(name) = username {
                            span { "👤 {name}" }
                        }
                        button {
                            class: get_button_class("secondary", false),
                            onclick: on_logout,
                            "ログアウト"
                        }
                    }
                }
            }

            if authenticated {
                TabNavigation {
                    active: rendered.clone(),
                    on_navigate: move |next: Route| route.set(next),
                }
            }

            div {
                class: CssClasses::MAIN_CONTENT,
                match rendered {
                    // ログイン済みでログイン画面を要求された場合はホームへ
                    Route::Login if authenticated => rsx! { HomePage {} },
                    Route::Login if restoring() => rsx! {
                        div { class: CssClasses::EMPTY_STATE, "セッションを復元中..." }
                    },
                    Route::Login => rsx! { LoginPage {} },
                    Route::Home => rsx! { HomePage {} },
                    Route::Keynotes => rsx! { KeynotesPage {} },
                    Route::Conferences => rsx! { ConferencesPage {} },
                    Route::ConferenceDetails(id) => rsx! {
                        ConferenceDetailsPage { key: "{id}", conference_id: id.clone() }
                    },
                    Route::Analytics => rsx! { AnalyticsPage {} },
                    Route::NotFound(path) => rsx! {
                        div {
                            class: CssClasses::CARD,
                            h2 { "ページが見つかりません" }
                            p { "{path}" }
                        }
                    },
                }
            }
        }
    }
}
