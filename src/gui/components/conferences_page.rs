//! カンファレンス管理画面（一覧＋フォーム）

use dioxus::prelude::*;

use crate::api::{CrudResource, ConferenceService};
use crate::gui::app_context::AppContext;
use crate::gui::components::ErrorBanner;
use crate::gui::hooks::use_crud_controller;
use crate::gui::styles::theme::{get_button_class, CssClasses};
use crate::models::{
    format_local_datetime, parse_local_datetime, ConferenceDraft, ConferenceType, Keynote, KeynoteId,
};
use crate::routes::Route;

#[component]
pub fn ConferencesPage() -> Element {
    let ctx = use_context::<AppContext>();
    let mut route = use_context::<Signal<Route>>();
    let (controller, state) = use_crud_controller(ctx.conferences.clone());

    // キーノートの選択肢
    let keynote_service = ctx.keynotes.clone();
    let keynotes = use_resource(move || {
        let service = keynote_service.clone();
        async move { service.list().await }
    });

    let mut fields = use_signal(ConferenceDraft::default);
    let mut is_saving = use_signal(|| false);

    let snapshot = state.read().clone();
    let keynote_options: Vec<Keynote> = match &*keynotes.read() {
        Some(Ok(list)) => list.clone(),
        _ => Vec::new(),
    };

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
                    tracing::debug!(conference_id = %id, "💾 Conference form saved");
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
                h2 { "🏛️ カンファレンス" }
                button {
                    class: get_button_class(if snapshot.form_visible { "secondary" } else { "primary" }, false),
                    onclick: on_toggle,
                    if snapshot.form_visible { "キャンセル" } else { "＋ 追加" }
                }
            }

            ErrorBanner { error: snapshot.last_error.clone(), on_dismiss: on_dismiss }

            if snapshot.form_visible {
                ConferenceForm {
                    fields: fields,
                    keynotes: keynote_options.clone(),
                    editing: snapshot.is_editing(),
                    is_saving: *is_saving.read(),
                    on_submit: on_submit,
                    on_cancel: on_cancel,
                }
            }

            if snapshot.collection.is_empty() {
                div { class: CssClasses::EMPTY_STATE, "カンファレンスはまだありません" }
            } else {
                table {
                    class: CssClasses::DATA_TABLE,
                    thead {
                        tr {
                            th { "タイトル" }
                            th { "種別" }
                            th { "日時" }
                            th { "時間（分）" }
                            th { "参加登録" }
                            th { "スコア" }
                            th { "キーノート" }
                            th { "" }
                        }
                    }
                    tbody {
                        for conference in snapshot.collection.iter().cloned() {
                            tr {
                                key: "{conference.conference_id}",
                                td { "{conference.title}" }
                                td { "{conference.conference_type.label()}" }
                                td { "{format_local_datetime(conference.date.as_ref())}" }
                                td { "{conference.duration}" }
                                td { "{conference.registered_count}" }
                                td { "{conference.score}" }
                                td { "{keynote_label(&keynote_options, conference.keynote_id.as_ref())}" }
                                td {
                                    div {
                                        class: CssClasses::BTN_GROUP,
                                        style: "margin-top: 0;",
                                        button {
                                            class: get_button_class("primary", false),
                                            onclick: {
                                                let id = conference.conference_id.clone();
                                                move |_| route.set(Route::ConferenceDetails(id.clone()))
                                            },
                                            "詳細"
                                        }
                                        button {
                                            class: get_button_class("warning", false),
                                            onclick: {
                                                let controller = controller.clone();
                                                let conference = conference.clone();
                                                move |_| {
                                                    fields.set(ConferenceService::draft_of(&conference));
                                                    controller.begin_edit(conference.clone());
                                                }
                                            },
                                            "編集"
                                        }
                                        button {
                                            class: get_button_class("danger", false),
                                            onclick: {
                                                let controller = controller.clone();
                                                let id = conference.conference_id.clone();
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

/// 一覧に表示するキーノート名（見つからなければID）
fn keynote_label(keynotes: &[Keynote], id: Option<&KeynoteId>) -> String {
    let Some(id) = id else {
        return "-".to_string();
    };
    keynotes
        .iter()
        .find(|k| &k.keynote_id == id)
        .map(|k| k.full_name())
        .unwrap_or_else(|| id.to_string())
}

/// カンファレンス入力フォーム
#[component]
fn ConferenceForm(
    mut fields: Signal<ConferenceDraft>,
    keynotes: Vec<Keynote>,
    editing: bool,
    is_saving: bool,
    on_submit: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let draft = fields.read().clone();
    let date_value = format_local_datetime(draft.date.as_ref());
    let selected_keynote = draft
        .keynote_id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_default();

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
                    label { class: CssClasses::FORM_LABEL, "タイトル" }
                    input {
                        class: CssClasses::FORM_INPUT,
                        value: "{draft.title}",
                        oninput: move |evt| fields.write().title = evt.value(),
                    }
                }
                div {
                    class: CssClasses::FORM_GROUP,
                    label { class: CssClasses::FORM_LABEL, "種別" }
                    select {
                        class: CssClasses::FORM_INPUT,
                        value: "{draft.conference_type.as_str()}",
                        onchange: move |evt| {
                            if let Some(kind) = ConferenceType::from_wire(&evt.value()) {
                                fields.write().conference_type = kind;
                            }
                        },
                        for kind in ConferenceType::ALL {
                            option {
                                key: "{kind.as_str()}",
                                value: kind.as_str(),
                                selected: kind == draft.conference_type,
                                "{kind.label()}"
                            }
                        }
                    }
                }
                div {
                    class: CssClasses::FORM_GROUP,
                    label { class: CssClasses::FORM_LABEL, "日時" }
                    input {
                        class: CssClasses::FORM_INPUT,
                        r#type: "datetime-local",
                        value: "{date_value}",
                        oninput: move |evt| fields.write().date = parse_local_datetime(&evt.value()),
                    }
                }
                div {
                    class: CssClasses::FORM_GROUP,
                    label { class: CssClasses::FORM_LABEL, "時間（分）" }
                    input {
                        class: CssClasses::FORM_INPUT,
                        r#type: "number",
                        min: "0",
                        value: "{draft.duration}",
                        oninput: move |evt| fields.write().duration = evt.value().parse().unwrap_or(0),
                    }
                }
                div {
                    class: CssClasses::FORM_GROUP,
                    label { class: CssClasses::FORM_LABEL, "参加登録数" }
                    input {
                        class: CssClasses::FORM_INPUT,
                        r#type: "number",
                        min: "0",
                        value: "{draft.registered_count}",
                        oninput: move |evt| fields.write().registered_count = evt.value().parse().unwrap_or(0),
                    }
                }
                div {
                    class: CssClasses::FORM_GROUP,
                    label { class: CssClasses::FORM_LABEL, "スコア" }
                    input {
                        class: CssClasses::FORM_INPUT,
                        r#type: "number",
                        step: "0.1",
                        value: "{draft.score}",
                        oninput: move |evt| fields.write().score = evt.value().parse().unwrap_or(0.0),
                    }
                }
                div {
                    class: CssClasses::FORM_GROUP,
                    label { class: CssClasses::FORM_LABEL, "キーノート" }
                    select {
                        class: CssClasses::FORM_INPUT,
                        value: "{selected_keynote}",
                        onchange: move |evt| {
                            let value = evt.value();
                            fields.write().keynote_id = if value.is_empty() { None } else { Some(KeynoteId::new(value)) };
                        },
                        option { value: "", selected: selected_keynote.is_empty(), "選択してください" }
                        for keynote in keynotes.iter() {
                            option {
                                key: "{keynote.keynote_id}",
                                value: "{keynote.keynote_id}",
                                selected: keynote.keynote_id.as_str() == selected_keynote,
                                "{keynote.full_name()}"
                            }
                        }
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
