//! カンファレンス詳細（レビュー投稿・一覧）

use dioxus::prelude::*;

use crate::gui::app_context::AppContext;
use crate::gui::components::ErrorBanner;
use crate::gui::hooks::use_watch;
use crate::gui::styles::theme::{get_button_class, star_rating, CssClasses};
use crate::models::{format_local_datetime, Conference, ConferenceId, ReviewDraft};
use crate::routes::Route;
use crate::state::ConferenceDetail;

#[component]
pub fn ConferenceDetailsPage(conference_id: ConferenceId) -> Element {
    let ctx = use_context::<AppContext>();
    let mut route = use_context::<Signal<Route>>();

    let detail = use_hook(|| ConferenceDetail::new(ctx.conferences.clone(), conference_id.clone()));
    let state = use_watch({
        let detail = detail.clone();
        move || detail.subscribe()
    });

    use_hook({
        let detail = detail.clone();
        move || {
            spawn(async move {
                let _ = detail.load().await;
            });
        }
    });

    let mut review = use_signal(ReviewDraft::default);
    let mut is_submitting = use_signal(|| false);

    let snapshot = state.read().clone();

    let on_submit = {
        let detail = detail.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            if *is_submitting.read() {
                return;
            }
            let detail = detail.clone();
            let draft = review.read().clone();
            spawn(async move {
                is_submitting.set(true);
                if detail.add_review(&draft).await.is_ok() {
                    review.set(ReviewDraft::default());
                }
                is_submitting.set(false);
            });
        }
    };

    let on_dismiss = {
        let detail = detail.clone();
        move |_| detail.dismiss_error()
    };

    rsx! {
        div {
            class: CssClasses::CARD,

            div {
                class: CssClasses::CARD_HEADER,
                h2 { "🏛️ カンファレンス詳細" }
                button {
                    class: get_button_class("secondary", false),
                    onclick: move |_| route.set(Route::Conferences),
                    "← 一覧へ戻る"
                }
            }

            ErrorBanner { error: snapshot.last_error.clone(), on_dismiss: on_dismiss }

            match snapshot.conference.clone() {
                Some(conference) => rsx! { ConferenceSummary { conference: conference } },
                None if snapshot.loading => rsx! { div { class: CssClasses::EMPTY_STATE, "読み込み中..." } },
                None => rsx! { div { class: CssClasses::EMPTY_STATE, "カンファレンスが見つかりません" } },
            }
        }

        div {
            class: CssClasses::CARD,

            div {
                class: CssClasses::CARD_HEADER,
                h2 { "⭐ レビューを書く" }
            }

            form {
                onsubmit: on_submit,

                div {
                    class: CssClasses::FORM_GROUP,
                    label { class: CssClasses::FORM_LABEL, "評価" }
                    select {
                        class: CssClasses::FORM_INPUT,
                        value: "{review.read().stars}",
                        onchange: move |evt| {
                            if let Ok(stars) = evt.value().parse() {
                                review.write().stars = stars;
                            }
                        },
                        for stars in (ReviewDraft::MIN_STARS..=ReviewDraft::MAX_STARS).rev() {
                            option {
                                key: "{stars}",
                                value: "{stars}",
                                selected: stars == review.read().stars,
                                "{star_rating(stars)}"
                            }
                        }
                    }
                }

                div {
                    class: CssClasses::FORM_GROUP,
                    style: "margin-top: 12px;",
                    label { class: CssClasses::FORM_LABEL, "コメント" }
                    textarea {
                        class: CssClasses::FORM_INPUT,
                        rows: "3",
                        value: "{review.read().text}",
                        oninput: move |evt| review.write().text = evt.value(),
                    }
                }

                div {
                    class: CssClasses::BTN_GROUP,
                    button {
                        class: get_button_class("primary", *is_submitting.read()),
                        r#type: "submit",
                        disabled: *is_submitting.read(),
                        "投稿"
                    }
                }
            }
        }
    }
}

#[component]
fn ConferenceSummary(conference: Conference) -> Element {
    rsx! {
        table {
            class: CssClasses::DATA_TABLE,
            tbody {
                tr { th { "タイトル" } td { "{conference.title}" } }
                tr { th { "種別" } td { "{conference.conference_type.label()}" } }
                tr { th { "日時" } td { "{format_local_datetime(conference.date.as_ref())}" } }
                tr { th { "時間（分）" } td { "{conference.duration}" } }
                tr { th { "参加登録" } td { "{conference.registered_count}" } }
                tr { th { "スコア" } td { "{conference.score}" } }
            }
        }

        h3 { "レビュー（{conference.reviews.len()}件）" }

        if conference.reviews.is_empty() {
            div { class: CssClasses::EMPTY_STATE, "レビューはまだありません" }
        } else {
            ul {
                class: CssClasses::REVIEW_LIST,
                for review in conference.reviews.iter() {
                    li {
                        key: "{review.review_id}",
                        class: CssClasses::REVIEW_ITEM,
                        div {
                            span { class: CssClasses::REVIEW_STARS, "{star_rating(review.stars)}" }
                            span {
                                style: "margin-left: 12px; color: #95a5a6; font-size: 0.85rem;",
                                "{format_local_datetime(review.date.as_ref())}"
                            }
                        }
                        p { style: "margin: 6px 0 0 0;", "{review.text}" }
                    }
                }
            }
        }
    }
}
