//! カンファレンス詳細・レビュー投稿のテスト

mod support;

use std::sync::Arc;

use confdesk::api::{ConferenceService, ErrorKind, HttpMethod};
use confdesk::models::{ConferenceDraft, ConferenceId, ConferenceType, ReviewDraft, ReviewId};
use confdesk::state::ConferenceDetail;
use support::{active_session, ada_lovelace, FakeBackend};

fn seeded_detail(backend: &Arc<FakeBackend>) -> ConferenceDetail {
    let keynote = backend.seed_keynote(ada_lovelace());
    let id = backend.seed_conference_with_id(
        "c1",
        ConferenceDraft {
            title: "RustConf".to_string(),
            conference_type: ConferenceType::Academic,
            date: None,
            duration: 60,
            registered_count: 40,
            score: 4.0,
            keynote_id: Some(keynote),
        },
    );
    let service = Arc::new(ConferenceService::new(backend.client(active_session())));
    ConferenceDetail::new(service, id)
}

#[cfg(test)]
mod review_tests {
    use super::*;

    #[tokio::test]
    async fn test_load_fetches_single_conference() {
        let backend = FakeBackend::new();
        let detail = seeded_detail(&backend);

        detail.load().await.unwrap();

        let gets = backend.requests_to(HttpMethod::GET, "/conferences/queries/c1");
        assert_eq!(gets.len(), 1);

        let state = detail.snapshot();
        assert!(!state.loading);
        let conference = state.conference.unwrap();
        assert_eq!(conference.title, "RustConf");
        assert!(conference.reviews.is_empty());
    }

    #[tokio::test]
    async fn test_add_review_posts_and_reloads() {
        let backend = FakeBackend::new();
        let detail = seeded_detail(&backend);
        detail.load().await.unwrap();

        let review = ReviewDraft {
            text: "Great talk".to_string(),
            stars: 5,
        };
        // ボディなしの200でも成功として扱う
        let review_id = detail.add_review(&review).await.unwrap();
        assert_eq!(review_id, None);

        let posts = backend.requests_to(HttpMethod::POST, "/conferences/commands/c1/reviews");
        assert_eq!(posts.len(), 1);
        assert_eq!(
            posts[0].body,
            Some(serde_json::json!({"text": "Great talk", "stars": 5}))
        );
        assert!(posts[0].bearer.is_some());

        // 投稿後に詳細を取り直している
        assert_eq!(backend.requests_to(HttpMethod::GET, "/conferences/queries/c1").len(), 2);

        let state = detail.snapshot();
        assert!(state.last_error.is_none());
        let conference = state.conference.unwrap();
        assert_eq!(conference.reviews.len(), 1);
        assert_eq!(conference.reviews[0].review_id, ReviewId::new("r2"));
        assert_eq!(conference.reviews[0].text, "Great talk");
        assert_eq!(conference.reviews[0].stars, 5);
    }

    #[tokio::test]
    async fn test_add_review_accepts_null_or_identity_reply() {
        let backend = FakeBackend::new();
        let detail = seeded_detail(&backend);

        backend.fail_next_with_status(200, "null");
        assert_eq!(detail.add_review(&ReviewDraft::default()).await.unwrap(), None);

        backend.fail_next_with_status(200, "\"r-42\"");
        assert_eq!(
            detail.add_review(&ReviewDraft::default()).await.unwrap(),
            Some(ReviewId::new("r-42"))
        );

        // どちらの場合も再取得している
        assert_eq!(backend.requests_to(HttpMethod::GET, "/conferences/queries/c1").len(), 2);
        assert!(detail.snapshot().last_error.is_none());
    }

    #[tokio::test]
    async fn test_failed_review_keeps_displayed_reviews() {
        let backend = FakeBackend::new();
        let detail = seeded_detail(&backend);
        detail
            .add_review(&ReviewDraft {
                text: "Solid".to_string(),
                stars: 4,
            })
            .await
            .unwrap();
        let before = detail.snapshot().conference.unwrap().reviews;
        assert_eq!(before.len(), 1);

        backend.fail_next_with_status(500, "boom");
        let error = detail.add_review(&ReviewDraft::default()).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Server);

        let state = detail.snapshot();
        assert_eq!(state.conference.unwrap().reviews, before);
        assert_eq!(state.last_error, Some(error));
    }

    #[tokio::test]
    async fn test_missing_conference_records_error() {
        let backend = FakeBackend::new();
        let service = Arc::new(ConferenceService::new(backend.client(active_session())));
        let detail = ConferenceDetail::new(service, ConferenceId::new("nope"));

        let error = detail.load().await.unwrap_err();
        assert_eq!(error.status(), Some(404));

        let state = detail.snapshot();
        assert!(state.conference.is_none());
        assert!(!state.loading);
        assert!(state.last_error.is_some());

        detail.dismiss_error();
        assert!(detail.snapshot().last_error.is_none());
    }
}
