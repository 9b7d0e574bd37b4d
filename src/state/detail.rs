//! カンファレンス詳細画面の状態管理

use std::sync::Arc;
use tokio::sync::watch;

use crate::api::{ApiError, ApiResult, ConferenceService};
use crate::models::{Conference, ConferenceId, ReviewDraft, ReviewId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailState {
    /// 最後に取得したカンファレンス（レビュー込み）
    pub conference: Option<Conference>,
    pub loading: bool,
    pub last_error: Option<ApiError>,
}

/// カンファレンス詳細とレビュー投稿
#[derive(Clone)]
pub struct ConferenceDetail {
    service: Arc<ConferenceService>,
    conference_id: ConferenceId,
    state: Arc<watch::Sender<DetailState>>,
}

impl ConferenceDetail {
    pub fn new(service: Arc<ConferenceService>, conference_id: ConferenceId) -> Self {
        let (state, _) = watch::channel(DetailState::default());
        Self {
            service,
            conference_id,
            state: Arc::new(state),
        }
    }

    pub fn conference_id(&self) -> &ConferenceId {
        &self.conference_id
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> DetailState {
        self.state.borrow().clone()
    }

    /// サーバーから取得し直す
    pub async fn load(&self) -> ApiResult<()> {
        self.state.send_modify(|state| state.loading = true);

        match self.service.get_by_id(&self.conference_id).await {
            Ok(conference) => {
                tracing::debug!(
                    conference_id = %self.conference_id,
                    reviews = conference.reviews.len(),
                    "📋 Conference details loaded"
                );
                self.state.send_modify(|state| {
                    state.conference = Some(conference);
                    state.loading = false;
                    state.last_error = None;
                });
                Ok(())
            }
            Err(e) => {
                tracing::warn!(conference_id = %self.conference_id, "❌ Failed to load conference: {}", e);
                let recorded = e.clone();
                self.state.send_modify(|state| {
                    state.loading = false;
                    state.last_error = Some(recorded);
                });
                Err(e)
            }
        }
    }

    /// レビューを投稿し、成功したら詳細を取得し直す
    ///
    /// 2xxなら成功（IDが返らなくても再取得する）。
    /// 失敗時は表示中のレビュー一覧を変えない。
    pub async fn add_review(&self, review: &ReviewDraft) -> ApiResult<Option<ReviewId>> {
        match self.service.add_review(&self.conference_id, review).await {
            Ok(id) => {
                let _ = self.load().await;
                Ok(id)
            }
            Err(e) => {
                let recorded = e.clone();
                self.state.send_modify(|state| state.last_error = Some(recorded));
                Err(e)
            }
        }
    }

    pub fn dismiss_error(&self) {
        self.state.send_modify(|state| state.last_error = None);
    }
}
