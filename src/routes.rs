//! 画面ルートとルートガード

use derive_more::Display;

use crate::auth::Session;
use crate::models::ConferenceId;

/// 画面ルート
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub enum Route {
    #[display("/login")]
    Login,
    #[display("/")]
    Home,
    #[display("/keynotes")]
    Keynotes,
    #[display("/conferences")]
    Conferences,
    #[display("/conferences/{_0}")]
    ConferenceDetails(ConferenceId),
    #[display("/analytics")]
    Analytics,
    #[display("{_0}")]
    NotFound(String),
}

impl Route {
    /// パスからルートを解決する（末尾 `/` は無視）
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["keynotes"] => Route::Keynotes,
            ["conferences"] => Route::Conferences,
            ["conferences", id] => match urlencoding::decode(id) {
                Ok(id) => Route::ConferenceDetails(ConferenceId::new(id.into_owned())),
                Err(_) => Route::NotFound(trimmed.to_string()),
            },
            ["analytics"] => Route::Analytics,
            _ => Route::NotFound(trimmed.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::ConferenceDetails(id) => {
                format!("/conferences/{}", urlencoding::encode(id.as_str()))
            }
            other => other.to_string(),
        }
    }

    /// ログインが必要か
    pub fn requires_session(&self) -> bool {
        !matches!(self, Route::Login)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Home => "Home",
            Route::Keynotes => "Keynotes",
            Route::Conferences => "Conferences",
            Route::ConferenceDetails(_) => "Conference Details",
            Route::Analytics => "Analytics",
            Route::NotFound(_) => "Not Found",
        }
    }

    /// タブに表示するルート
    pub fn navigation() -> [Route; 4] {
        [Route::Home, Route::Keynotes, Route::Conferences, Route::Analytics]
    }
}

/// ルートガード
///
/// 有効なセッションがなければ（未ログイン・期限切れを区別せず）ログイン画面へ。
pub fn guard(requested: Route, session: &Session) -> Route {
    if requested.requires_session() && !session.is_authenticated() {
        tracing::debug!(requested = %requested, "🔒 Redirecting to login");
        return Route::Login;
    }
    requested
}
