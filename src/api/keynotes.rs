use async_trait::async_trait;

use super::client::{path_segment, ApiClient};
use super::error::ApiResult;
use super::resource::CrudResource;
use crate::models::{Keynote, KeynoteDraft, KeynoteId};

pub const LIST_PATH: &str = "/keynotes/queries/all";
pub const CREATE_PATH: &str = "/keynotes/commands/create";

pub fn update_path(id: &KeynoteId) -> String {
    format!("/keynotes/commands/update/{}", path_segment(id.as_str()))
}

pub fn delete_path(id: &KeynoteId) -> String {
    format!("/keynotes/commands/delete/{}", path_segment(id.as_str()))
}

/// キーノートAPI
#[derive(Debug, Clone)]
pub struct KeynoteService {
    client: ApiClient,
}

impl KeynoteService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ApiResult<Vec<Keynote>> {
        self.client.get(LIST_PATH).await
    }

    pub async fn create(&self, draft: &KeynoteDraft) -> ApiResult<KeynoteId> {
        let id = self.client.post_for_identity(CREATE_PATH, draft).await?;
        tracing::info!(keynote_id = %id, "🎤 Keynote created");
        Ok(KeynoteId(id))
    }

    pub async fn update(&self, id: &KeynoteId, draft: &KeynoteDraft) -> ApiResult<KeynoteId> {
        let id = self
            .client
            .put_for_identity(&update_path(id), draft, id.as_str())
            .await?;
        Ok(KeynoteId(id))
    }

    pub async fn delete(&self, id: &KeynoteId) -> ApiResult<KeynoteId> {
        let id = self
            .client
            .delete_for_identity(&delete_path(id), id.as_str())
            .await?;
        tracing::info!(keynote_id = %id, "🗑️ Keynote deleted");
        Ok(KeynoteId(id))
    }
}

#[async_trait]
impl CrudResource for KeynoteService {
    type Entity = Keynote;
    type Id = KeynoteId;
    type Draft = KeynoteDraft;

    const NAME: &'static str = "keynote";

    fn entity_id(entity: &Keynote) -> KeynoteId {
        entity.keynote_id.clone()
    }

    fn draft_of(entity: &Keynote) -> KeynoteDraft {
        KeynoteDraft::from(entity)
    }

    async fn list(&self) -> ApiResult<Vec<Keynote>> {
        KeynoteService::list(self).await
    }

    async fn create(&self, draft: &KeynoteDraft) -> ApiResult<KeynoteId> {
        KeynoteService::create(self, draft).await
    }

    async fn update(&self, id: &KeynoteId, draft: &KeynoteDraft) -> ApiResult<KeynoteId> {
        KeynoteService::update(self, id, draft).await
    }

    async fn delete(&self, id: &KeynoteId) -> ApiResult<KeynoteId> {
        KeynoteService::delete(self, id).await
    }
}
