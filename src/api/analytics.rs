use async_trait::async_trait;

use super::client::ApiClient;
use super::error::ApiResult;
use crate::models::ReviewStats;

pub const WINDOW_PATH: &str = "/analytics/reviews/window";

/// 分析スナップショットの取得元
#[async_trait]
pub trait SnapshotSource: Send + Sync + 'static {
    async fn fetch_snapshot(&self) -> ApiResult<Vec<ReviewStats>>;
}

/// 分析API
#[derive(Debug, Clone)]
pub struct AnalyticsService {
    client: ApiClient,
}

impl AnalyticsService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// 直近の時間窓ごとのレビュー集計
    pub async fn get_snapshot(&self) -> ApiResult<Vec<ReviewStats>> {
        self.client.get(WINDOW_PATH).await
    }
}

#[async_trait]
impl SnapshotSource for AnalyticsService {
    async fn fetch_snapshot(&self) -> ApiResult<Vec<ReviewStats>> {
        self.get_snapshot().await
    }
}
