//! 認証セッション
//!
//! アプリ起動時に一度だけ生成し、`Arc<Session>` として API クライアント・
//! ルートガード・画面へ明示的に渡す。

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// IDプロバイダーから受け取ったトークン一式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionTokens {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub refresh_expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub username: Option<String>,
}

impl SessionTokens {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// リフレッシュトークンがまだ使えるか
    pub fn can_refresh_at(&self, now: DateTime<Utc>) -> bool {
        match (&self.refresh_token, self.refresh_expires_at) {
            (Some(_), Some(deadline)) => now < deadline,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }
}

/// セッション状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Anonymous,
    Active,
    Expired,
}

/// 認証セッション
#[derive(Debug, Default)]
pub struct Session {
    tokens: RwLock<Option<SessionTokens>>,
}

impl Session {
    /// 未ログインのセッション
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_tokens(tokens: SessionTokens) -> Self {
        Self {
            tokens: RwLock::new(Some(tokens)),
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status_at(Utc::now())
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> SessionStatus {
        match self.tokens.read().as_ref() {
            None => SessionStatus::Anonymous,
            Some(tokens) if tokens.is_expired_at(now) => SessionStatus::Expired,
            Some(_) => SessionStatus::Active,
        }
    }

    /// 有効なアクセストークンを保持しているか（期限切れは未認証扱い）
    pub fn is_authenticated(&self) -> bool {
        self.status() == SessionStatus::Active
    }

    /// Bearer ヘッダーに載せるトークン。認証済みのときのみ返す。
    pub fn bearer_token(&self) -> Option<String> {
        let now = Utc::now();
        self.tokens
            .read()
            .as_ref()
            .filter(|tokens| !tokens.is_expired_at(now))
            .map(|tokens| tokens.access_token.clone())
    }

    pub fn username(&self) -> Option<String> {
        self.tokens
            .read()
            .as_ref()
            .and_then(|tokens| tokens.username.clone())
    }

    pub fn tokens(&self) -> Option<SessionTokens> {
        self.tokens.read().clone()
    }

    /// ログイン・リフレッシュ成功時にトークンを差し替える
    pub fn establish(&self, tokens: SessionTokens) {
        tracing::debug!(
            username = tokens.username.as_deref().unwrap_or("-"),
            expires_at = %tokens.expires_at,
            "🔐 Session established"
        );
        *self.tokens.write() = Some(tokens);
    }

    /// セッションを破棄し、保持していたトークンを返す
    pub fn clear(&self) -> Option<SessionTokens> {
        self.tokens.write().take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn tokens_expiring_in(seconds: i64) -> SessionTokens {
        SessionTokens {
            access_token: "access".to_string(),
            refresh_token: Some("refresh".to_string()),
            expires_at: Utc::now() + Duration::seconds(seconds),
            refresh_expires_at: None,
            username: Some("admin".to_string()),
        }
    }

    #[test]
    fn test_anonymous_session() {
        let session = Session::anonymous();
        assert_eq!(session.status(), SessionStatus::Anonymous);
        assert!(!session.is_authenticated());
        assert!(session.bearer_token().is_none());
        assert!(session.username().is_none());
    }

    #[test]
    fn test_active_session_exposes_token() {
        let session = Session::with_tokens(tokens_expiring_in(300));
        assert_eq!(session.status(), SessionStatus::Active);
        assert!(session.is_authenticated());
        assert_eq!(session.bearer_token().as_deref(), Some("access"));
        assert_eq!(session.username().as_deref(), Some("admin"));
    }

    #[test]
    fn test_expired_session_is_not_authenticated() {
        let session = Session::with_tokens(tokens_expiring_in(-5));
        assert_eq!(session.status(), SessionStatus::Expired);
        assert!(!session.is_authenticated());
        assert!(session.bearer_token().is_none());
    }

    #[test]
    fn test_establish_and_clear() {
        let session = Session::anonymous();
        session.establish(tokens_expiring_in(60));
        assert!(session.is_authenticated());

        let cleared = session.clear();
        assert!(cleared.is_some());
        assert_eq!(session.status(), SessionStatus::Anonymous);
        assert!(session.clear().is_none());
    }

    #[test]
    fn test_refresh_window() {
        let now = Utc::now();
        let mut tokens = tokens_expiring_in(-10);
        assert!(tokens.can_refresh_at(now));

        tokens.refresh_expires_at = Some(now - Duration::seconds(1));
        assert!(!tokens.can_refresh_at(now));

        tokens.refresh_token = None;
        tokens.refresh_expires_at = None;
        assert!(!tokens.can_refresh_at(now));
    }
}
