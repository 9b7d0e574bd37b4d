// Dioxus GUI Components Module

pub mod analytics_page; // レビュー分析（定期取得）
pub mod conference_details; // カンファレンス詳細・レビュー
pub mod conferences_page;
pub mod error_banner;
pub mod home_page;
pub mod keynotes_page;
pub mod login_page;
pub mod main_window;
pub mod tab_navigation;

// Re-exports for convenience
pub use analytics_page::AnalyticsPage;
pub use conference_details::ConferenceDetailsPage;
pub use conferences_page::ConferencesPage;
pub use error_banner::ErrorBanner;
pub use home_page::HomePage;
pub use keynotes_page::KeynotesPage;
pub use login_page::LoginPage;
pub use main_window::MainWindow;
pub use tab_navigation::TabNavigation;
