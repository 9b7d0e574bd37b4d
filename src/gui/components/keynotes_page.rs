//! キーノート管理画面（一覧＋フォーム）

use dioxus::prelude::*;

use crate::api::{CrudResource, KeynoteService};
use crate::gui::app_context::AppContext;
use crate::gui::components::ErrorBanner;
use crate::gui::hooks::use_crud_controller;
use crate::gui::styles::theme::{get_button_class, CssClasses};
use crate::models::KeynoteDraft;

#[component]
pub fn KeynotesPage() -> Element {
    let ctx = use_context::<AppContext>();
    let (controller, state) = use_crud_controller(ctx.keynotes.clone());

    // フォームの入力値（開くたびにコントローラーの初期値で上書き）
    let mut fields = use_signal(KeynoteDraft::default);
    let mut is_saving = use_signal(|| false);

    let snapshot = state.read().clone();

    let on_toggle = {
        let controller = controller.clone();
        move |_| {
            controller.toggle_form();
            fields.set(controller.form_seed());
        }
    };

    let on_submit = {
        let controller = controller.clone();
        move |_| {
            let controller = controller.clone();
            let draft = fields.read().clone();
            spawn(async move {
                is_saving.set(true);
                if let Ok(id) = controller.save(draft).await {
                    tracing::debug!(keynote_id = %id, "💾 Keynote form saved");
                }
                is_saving.set(false);
            });
        }
    };

    let on_cancel = {
        let controller = controller.clone();
        move |_| controller.cancel()
    };

    let on_dismiss = {
        let controller = controller.clone();
        move |_| controller.dismiss_error()
    };

    rsx! {
        div {
            class: CssClasses::CARD,

            div {
                class: CssClasses::CARD_HEADER,
                h2 { "🎤 キーノート" }
                button {
                    class: get_button_class(if snapshot.form_visible { "secondary" } else { "primary" }, false),
                    onclick: on_toggle,
                    if snapshot.form_visible { "キャンセル" } else { "＋ 追加" }
                }
            }

            ErrorBanner { error: snapshot.last_error.clone(), on_dismiss: on_dismiss }

            if snapshot.form_visible {
                KeynoteForm {
                    fields: fields,
                    editing: snapshot.is_editing(),
                    is_saving: *is_saving.read(),
                    on_submit: on_submit,
                    on_cancel: on_cancel,
                }
            }

            if snapshot.collection.is_empty() {
                div { class: CssClasses::EMPTY_STATE, "キーノートはまだありません" }
            } else {
                table {
                    class: CssClasses::DATA_TABLE,
                    thead {
                        tr {
                            th { "ID" }
                            th { "氏名" }
                            th { "メール" }
                            th { "役割" }
                            th { "" }
                        }
                    }
                    tbody {
                        for keynote in snapshot.collection.iter().cloned() {
                            tr {
                                key: "{keynote.keynote_id}",
                                td { "{keynote.keynote_id}" }
                                td { "{keynote.full_name()}" }
                                td { "{keynote.email}" }
                                td { "{keynote.keynote_function}" }
                                td {
                                    div {
                                        class: CssClasses::BTN_GROUP,
                                        style: "margin-top: 0;",
                                        button {
                                            class: get_button_class("warning", false),
                                            onclick: {
                                                let controller = controller.clone();
                                                let keynote = keynote.clone();
                                                move |_| {
                                                    fields.set(KeynoteService::draft_of(&keynote));
                                                    controller.begin_edit(keynote.clone());
                                                }
                                            },
                                            "編集"
                                        }
                                        button {
                                            class: get_button_class("danger", false),
                                            onclick: {
                                                let controller = controller.clone();
                                                let id = keynote.keynote_id.clone();
                                                move |_| {
                                                    let controller = controller.clone();
                                                    let id = id.clone();
                                                    spawn(async move {
                                                        let _ = controller.delete(&id).await;
                                                    });
                                                }
                                            },
                                            "削除"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// キーノート入力フォーム
#[component]
fn KeynoteForm(
    mut fields: Signal<KeynoteDraft>,
    editing: bool,
    is_saving: bool,
    on_submit: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let draft = fields.read().clone();

    rsx! {
        form {
            class: CssClasses::FORM_PANEL,
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                on_submit.call(());
            },

            div {
                class: CssClasses::FORM_GRID,

                div {
                    class: CssClasses::FORM_GROUP,
                    label { class: CssClasses::FORM_LABEL, "名" }
                    input {
                        class: CssClasses::FORM_INPUT,
                        value: "{draft.first_name}",
                        oninput: move |evt| fields.write().first_name = evt.value(),
                    }
                }
                div {
                    class: CssClasses::FORM_GROUP,
                    label { class: CssClasses::FORM_LABEL, "姓" }
                    input {
                        class: CssClasses::FORM_INPUT,
                        value: "{draft.last_name}",
                        oninput: move |evt| fields.write().last_name = evt.value(),
                    }
                }
                div {
                    class: CssClasses::FORM_GROUP,
                    label { class: CssClasses::FORM_LABEL, "メール" }
                    input {
                        class: CssClasses::FORM_INPUT,
                        r#type: "email",
                        value: "{draft.email}",
                        oninput: move |evt| fields.write().email = evt.value(),
                    }
                }
                div {
                    class: CssClasses::FORM_GROUP,
                    label { class: CssClasses::FORM_LABEL, "役割" }
                    input {
                        class: CssClasses::FORM_INPUT,
                        value: "{draft.keynote_function}",
                        oninput: move |evt| fields.write().keynote_function = evt.value(),
                    }
                }
            }

            div {
                class: CssClasses::BTN_GROUP,
                button {
                    class: get_button_class("primary", is_saving),
                    r#type: "submit",
                    disabled: is_saving,
                    if editing { "更新" } else { "作成" }
                }
                button {
                    class: get_button_class("secondary", false),
                    r#type: "button",
                    onclick: move |_| on_cancel.call(()),
                    "キャンセル"
                }
            }
        }
    }
}
