//! アプリケーションコンテキスト
//!
//! 起動時に一度だけ組み立て、`LaunchBuilder::with_context` で全コンポーネントへ渡す。
//! グローバル変数は使わない。

use std::sync::Arc;

use crate::api::{AnalyticsService, ApiClient, ConferenceService, KeynoteService};
use crate::auth::{AuthManager, Session};
use crate::config::AppConfig;

/// 画面から使うサービス一式
#[derive(Clone)]
pub struct AppContext {
    pub session: Arc<Session>,
    pub auth: AuthManager,
    pub keynotes: Arc<KeynoteService>,
    pub conferences: Arc<ConferenceService>,
    pub analytics: Arc<AnalyticsService>,
    pub config: Arc<AppConfig>,
}

impl AppContext {
    /// 同じセッションを共有するAPIクライアントからサービスを組み立てる
    pub fn new(client: ApiClient, auth: AuthManager, config: AppConfig) -> Self {
        Self {
            session: client.session().clone(),
            auth,
            keynotes: Arc::new(KeynoteService::new(client.clone())),
            conferences: Arc::new(ConferenceService::new(client.clone())),
            analytics: Arc::new(AnalyticsService::new(client)),
            config: Arc::new(config),
        }
    }
}
