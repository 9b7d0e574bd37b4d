//! ログイン画面

use dioxus::prelude::*;

use crate::auth::{AuthError, Credentials, SessionStatus};
use crate::gui::app_context::AppContext;
use crate::gui::styles::theme::{get_button_class, CssClasses};

/// ログイン画面
///
/// 成功したらセッション状態のシグナルを更新する。ガードで弾かれた画面はそのまま表示される。
#[component]
pub fn LoginPage() -> Element {
    let ctx = use_context::<AppContext>();
    let mut session_status = use_context::<Signal<SessionStatus>>();

    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut is_submitting = use_signal(|| false);
    let mut error_message = use_signal(|| None::<String>);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if *is_submitting.read() {
            return;
        }

        let auth = ctx.auth.clone();
        let credentials = Credentials {
            username: username.read().trim().to_string(),
            password: password.read().clone(),
        };

        spawn(async move {
            is_submitting.set(true);
            error_message.set(None);

            match auth.login(&credentials).await {
                Ok(()) => {
                    password.set(String::new());
                    session_status.set(SessionStatus::Active);
                }
                Err(AuthError::InvalidCredentials) => {
                    error_message.set(Some("ユーザー名またはパスワードが正しくありません".to_string()));
                }
                Err(e) => {
                    error_message.set(Some(format!("ログインに失敗しました: {}", e)));
                }
            }

            is_submitting.set(false);
        });
    };

    rsx! {
        div {
            class: CssClasses::CARD,
            style: "max-width: 420px; margin: 40px auto;",

            div {
                class: CssClasses::CARD_HEADER,
                h2 { "🔒 ログイン" }
            }

            form {
                onsubmit: on_submit,

                div {
                    class: CssClasses::FORM_GROUP,
                    label { class: CssClasses::FORM_LABEL, "ユーザー名" }
                    input {
                        class: CssClasses::FORM_INPUT,
                        r#type: "text",
                        autofocus: true,
                        value: "{username}",
                        oninput: move |evt| username.set(evt.value()),
                    }
                }

                div {
                    class: CssClasses::FORM_GROUP,
                    style: "margin-top: 12px;",
                    label { class: CssClasses::FORM_LABEL, "パスワード" }
                    input {
                        class: CssClasses::FORM_INPUT,
                        r#type: "password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }

                if let Some(message) = error_message.read().as_ref() {
                    div {
                        class: CssClasses::ERROR_BANNER,
                        style: "margin-top: 12px;",
                        "{message}"
                    }
                }

                div {
                    class: CssClasses::BTN_GROUP,
                    button {
                        class: get_button_class("primary", *is_submitting.read()),
                        r#type: "submit",
                        disabled: *is_submitting.read(),
                        if *is_submitting.read() { "ログイン中..." } else { "ログイン" }
                    }
                }
            }
        }
    }
}
