//! 一覧＋フォーム画面が扱うリソースの共通インターフェース

use async_trait::async_trait;
use std::fmt::Display;

use super::error::ApiResult;

/// CRUD操作を持つリモートリソース
///
/// 各操作はHTTP呼び出し1回に対応し、キャッシュ・リトライは行わない。
#[async_trait]
pub trait CrudResource: Send + Sync + 'static {
    type Entity: Clone + Send + Sync + 'static;
    type Id: Clone + Display + Send + Sync + 'static;
    type Draft: Clone + Default + Send + Sync + 'static;

    /// ログ用のリソース名
    const NAME: &'static str;

    fn entity_id(entity: &Self::Entity) -> Self::Id;

    /// 編集フォームの初期値
    fn draft_of(entity: &Self::Entity) -> Self::Draft;

    async fn list(&self) -> ApiResult<Vec<Self::Entity>>;

    async fn create(&self, draft: &Self::Draft) -> ApiResult<Self::Id>;

    async fn update(&self, id: &Self::Id, draft: &Self::Draft) -> ApiResult<Self::Id>;

    async fn delete(&self, id: &Self::Id) -> ApiResult<Self::Id>;
}
