//! 画面の状態管理（GUIに依存しない）
//!
//! - `crud`: 一覧＋フォーム画面（キーノート・カンファレンス）
//! - `detail`: カンファレンス詳細とレビュー投稿
//! - `poller`: 分析データの定期取得

pub mod crud;
pub mod detail;
pub mod poller;

pub use crud::{CrudController, ListFormState};
pub use detail::{ConferenceDetail, DetailState};
pub use poller::{AnalyticsPoller, AnalyticsState, PollerHandle, PollerState, DEFAULT_POLL_INTERVAL};
