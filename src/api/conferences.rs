use async_trait::async_trait;

use super::client::{path_segment, ApiClient};
use super::error::ApiResult;
use super::resource::CrudResource;
use crate::models::{Conference, ConferenceDraft, ConferenceId, ReviewDraft, ReviewId};

pub const LIST_PATH: &str = "/conferences/queries/all";
pub const CREATE_PATH: &str = "/conferences/commands/create";

pub fn detail_path(id: &ConferenceId) -> String {
    format!("/conferences/queries/{}", path_segment(id.as_str()))
}

pub fn update_path(id: &ConferenceId) -> String {
    format!("/conferences/commands/update/{}", path_segment(id.as_str()))
}

pub fn delete_path(id: &ConferenceId) -> String {
    format!("/conferences/commands/delete/{}", path_segment(id.as_str()))
}

pub fn reviews_path(id: &ConferenceId) -> String {
    format!("/conferences/commands/{}/reviews", path_segment(id.as_str()))
}

/// カンファレンスAPI（レビュー投稿を含む）
#[derive(Debug, Clone)]
pub struct ConferenceService {
    client: ApiClient,
}

impl ConferenceService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ApiResult<Vec<Conference>> {
        self.client.get(LIST_PATH).await
    }

    pub async fn get_by_id(&self, id: &ConferenceId) -> ApiResult<Conference> {
        self.client.get(&detail_path(id)).await
    }

    pub async fn create(&self, draft: &ConferenceDraft) -> ApiResult<ConferenceId> {
        let id = self.client.post_for_identity(CREATE_PATH, draft).await?;
        tracing::info!(conference_id = %id, "🏛️ Conference created");
        Ok(ConferenceId(id))
    }

    pub async fn update(&self, id: &ConferenceId, draft: &ConferenceDraft) -> ApiResult<ConferenceId> {
        let id = self
            .client
            .put_for_identity(&update_path(id), draft, id.as_str())
            .await?;
        Ok(ConferenceId(id))
    }

    pub async fn delete(&self, id: &ConferenceId) -> ApiResult<ConferenceId> {
        let id = self
            .client
            .delete_for_identity(&delete_path(id), id.as_str())
            .await?;
        tracing::info!(conference_id = %id, "🗑️ Conference deleted");
        Ok(ConferenceId(id))
    }

    /// レビューを投稿（追記のみ。編集・削除はない）
    ///
    /// バックエンドは通常ボディなしで応答するため、IDは返らないことがある。
    pub async fn add_review(
        &self,
        conference_id: &ConferenceId,
        review: &ReviewDraft,
    ) -> ApiResult<Option<ReviewId>> {
        let id = self
            .client
            .post_accepting_empty(&reviews_path(conference_id), review)
            .await?
            .map(ReviewId);
        tracing::info!(
            conference_id = %conference_id,
            review_id = id.as_ref().map(|id| id.0.as_str()).unwrap_or("-"),
            "⭐ Review added"
        );
        Ok(id)
    }
}

#[async_trait]
impl CrudResource for ConferenceService {
    type Entity = Conference;
    type Id = ConferenceId;
    type Draft = ConferenceDraft;

    const NAME: &'static str = "conference";

    fn entity_id(entity: &Conference) -> ConferenceId {
        entity.conference_id.clone()
    }

    fn draft_of(entity: &Conference) -> ConferenceDraft {
        ConferenceDraft::from(entity)
    }

    async fn list(&self) -> ApiResult<Vec<Conference>> {
        ConferenceService::list(self).await
    }

    async fn create(&self, draft: &ConferenceDraft) -> ApiResult<ConferenceId> {
        ConferenceService::create(self, draft).await
    }

    async fn update(&self, id: &ConferenceId, draft: &ConferenceDraft) -> ApiResult<ConferenceId> {
        ConferenceService::update(self, id, draft).await
    }

    async fn delete(&self, id: &ConferenceId) -> ApiResult<ConferenceId> {
        ConferenceService::delete(self, id).await
    }
}
