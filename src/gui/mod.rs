// Core modules
pub mod app_context; // サービス一式のコンテキスト

// Dioxus UI components
pub mod components;
pub mod hooks; // watchチャンネル連携フック
pub mod styles;

pub use app_context::AppContext;
pub use components::MainWindow;
