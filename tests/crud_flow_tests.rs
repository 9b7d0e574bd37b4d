//! 一覧・フォーム画面の状態遷移テスト
//!
//! メモリ上のバックエンドに対して、作成・更新・削除のたびに
//! 一覧がサーバーの内容に追従することを確認する。

mod support;

use std::sync::Arc;

use confdesk::api::{ConferenceService, ErrorKind, HttpMethod, KeynoteService};
use confdesk::models::{ConferenceDraft, ConferenceType, KeynoteDraft, KeynoteId};
use confdesk::state::CrudController;
use support::{active_session, ada_lovelace, FakeBackend};

fn keynote_controller(backend: &Arc<FakeBackend>) -> CrudController<KeynoteService> {
    let client = backend.client(active_session());
    CrudController::new(Arc::new(KeynoteService::new(client)))
}

#[cfg(test)]
mod keynote_flow_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_posts_form_fields_and_reloads() {
        let backend = FakeBackend::new();
        let controller = keynote_controller(&backend);
        controller.load().await.unwrap();
        assert!(controller.snapshot().collection.is_empty());

        controller.begin_create();
        assert!(controller.snapshot().form_visible);
        assert_eq!(controller.form_seed(), KeynoteDraft::default());

        let id = controller.save(ada_lovelace()).await.unwrap();

        let posts = backend.requests_to(HttpMethod::POST, "/keynotes/commands/create");
        assert_eq!(posts.len(), 1);
        assert_eq!(
            posts[0].body,
            Some(serde_json::json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@x.org",
                "keynoteFunction": "Speaker"
            }))
        );

        let state = controller.snapshot();
        assert!(!state.form_visible);
        assert!(state.editing.is_none());
        assert_eq!(state.collection.len(), 1);
        assert_eq!(state.collection[0].keynote_id, id);
        assert_eq!(state.collection[0].full_name(), "Ada Lovelace");

        // 作成後に一覧を取り直している
        let last = backend.requests().last().cloned().unwrap();
        assert_eq!(last.method, HttpMethod::GET);
        assert_eq!(last.path, "/keynotes/queries/all");
    }

    #[tokio::test]
    async fn test_update_targets_edited_entity() {
        let backend = FakeBackend::new();
        let id = backend.seed_keynote(ada_lovelace());
        let controller = keynote_controller(&backend);
        controller.load().await.unwrap();

        let entity = controller.snapshot().collection[0].clone();
        controller.begin_edit(entity);
        assert!(controller.snapshot().is_editing());

        let mut fields = controller.form_seed();
        assert_eq!(fields, ada_lovelace());
        fields.keynote_function = "Chair".to_string();

        // 更新のレスポンスボディは空なので、編集中のIDが返る
        let updated = controller.save(fields).await.unwrap();
        assert_eq!(updated, id);

        let puts = backend.requests_to(HttpMethod::PUT, &format!("/keynotes/commands/update/{}", id));
        assert_eq!(puts.len(), 1);

        let state = controller.snapshot();
        assert!(!state.form_visible);
        assert_eq!(state.collection.len(), 1);
        assert_eq!(state.collection[0].keynote_function, "Chair");
        assert!(backend
            .requests_to(HttpMethod::POST, "/keynotes/commands/create")
            .is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let backend = FakeBackend::new();
        let first = backend.seed_keynote(ada_lovelace());
        let second = backend.seed_keynote(KeynoteDraft {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@x.org".to_string(),
            keynote_function: "Chair".to_string(),
        });
        let controller = keynote_controller(&backend);
        controller.load().await.unwrap();
        assert_eq!(controller.snapshot().collection.len(), 2);

        let deleted = controller.delete(&first).await.unwrap();
        assert_eq!(deleted, first);

        let state = controller.snapshot();
        assert_eq!(state.collection.len(), 1);
        assert_eq!(state.collection[0].keynote_id, second);
    }

    #[tokio::test]
    async fn test_repeated_delete_surfaces_server_error() {
        let backend = FakeBackend::new();
        let id = backend.seed_keynote(ada_lovelace());
        let controller = keynote_controller(&backend);
        controller.load().await.unwrap();

        controller.delete(&id).await.unwrap();
        let requests_before = backend.request_count();

        let error = controller.delete(&id).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Server);

        // 失敗した削除のあとは再取得しない
        assert_eq!(backend.request_count(), requests_before + 1);
        let state = controller.snapshot();
        assert!(state.collection.is_empty());
        assert_eq!(state.last_error, Some(error));

        controller.dismiss_error();
        assert!(controller.snapshot().last_error.is_none());
    }

    #[tokio::test]
    async fn test_failed_save_keeps_form_open() {
        let backend = FakeBackend::new();
        let controller = keynote_controller(&backend);
        controller.load().await.unwrap();
        controller.begin_create();

        backend.fail_next_with_status(400, "email must be valid");
        let error = controller.save(ada_lovelace()).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Validation);

        let state = controller.snapshot();
        assert!(state.form_visible);
        assert!(state.collection.is_empty());
        assert_eq!(state.last_error.map(|e| e.kind()), Some(ErrorKind::Validation));
        assert!(backend.keynotes().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_on_load_keeps_previous_rows() {
        let backend = FakeBackend::new();
        backend.seed_keynote(ada_lovelace());
        let controller = keynote_controller(&backend);
        controller.load().await.unwrap();

        backend.fail_next_with_transport();
        let error = controller.load().await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Transport);

        let state = controller.snapshot();
        assert_eq!(state.collection.len(), 1);
        assert!(state.last_error.is_some());
    }

    #[tokio::test]
    async fn test_cancel_sends_nothing() {
        let backend = FakeBackend::new();
        let controller = keynote_controller(&backend);

        controller.toggle_form();
        assert!(controller.snapshot().form_visible);
        controller.toggle_form();
        assert!(!controller.snapshot().form_visible);

        controller.begin_edit(confdesk::models::Keynote {
            keynote_id: KeynoteId::new("k9"),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@x.org".to_string(),
            keynote_function: "Speaker".to_string(),
        });
        controller.cancel();

        let state = controller.snapshot();
        assert!(!state.form_visible);
        assert!(state.editing.is_none());
        assert_eq!(backend.request_count(), 0);
    }
}

#[cfg(test)]
mod conference_flow_tests {
    use super::*;

    fn rust_conf(keynote_id: KeynoteId) -> ConferenceDraft {
        ConferenceDraft {
            title: "RustConf".to_string(),
            conference_type: ConferenceType::Commercial,
            date: confdesk::models::parse_local_datetime("2024-09-10T09:00"),
            duration: 90,
            registered_count: 120,
            score: 4.5,
            keynote_id: Some(keynote_id),
        }
    }

    #[tokio::test]
    async fn test_conference_create_and_update() {
        let backend = FakeBackend::new();
        let keynote = backend.seed_keynote(ada_lovelace());
        let client = backend.client(active_session());
        let controller = CrudController::new(Arc::new(ConferenceService::new(client)));
        controller.load().await.unwrap();

        // 作成時はJSON文字列で返るIDも受け付ける
        let id = controller.save(rust_conf(keynote.clone())).await.unwrap();
        let state = controller.snapshot();
        assert_eq!(state.collection.len(), 1);
        assert_eq!(state.collection[0].conference_id, id);
        assert_eq!(state.collection[0].keynote_id, Some(keynote.clone()));

        let posted = backend.requests_to(HttpMethod::POST, "/conferences/commands/create");
        let body = posted[0].body.clone().unwrap();
        assert_eq!(body["type"], "COMMERCIAL");
        assert_eq!(body["registeredCount"], 120);
        assert!(body.get("conferenceId").is_none());

        controller.begin_edit(state.collection[0].clone());
        let mut fields = controller.form_seed();
        fields.title = "RustConf 2024".to_string();
        controller.save(fields).await.unwrap();

        let state = controller.snapshot();
        assert_eq!(state.collection[0].title, "RustConf 2024");
        assert_eq!(state.collection[0].duration, 90);
    }

    #[tokio::test]
    async fn test_conference_with_unknown_keynote_is_rejected() {
        let backend = FakeBackend::new();
        let client = backend.client(active_session());
        let controller = CrudController::new(Arc::new(ConferenceService::new(client)));
        controller.begin_create();

        let error = controller
            .save(rust_conf(KeynoteId::new("missing")))
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert!(controller.snapshot().form_visible);
    }
}
