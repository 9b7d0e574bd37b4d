pub mod analytics; // 分析スナップショット
pub mod client; // 認証付きAPIクライアント
pub mod conferences; // カンファレンス・レビュー
pub mod error;
pub mod keynotes;
pub mod resource; // CRUDリソース共通トレイト
pub mod transport; // HTTP送信層

pub use analytics::{AnalyticsService, SnapshotSource};
pub use client::{decode_identity, ApiClient};
pub use conferences::ConferenceService;
pub use error::{ApiError, ApiResult, ErrorKind};
pub use keynotes::KeynoteService;
pub use resource::CrudResource;
pub use transport::{ApiRequest, HttpMethod, RawResponse, ReqwestTransport, Transport};
