//! ログイン・ログアウト・セッション復元のテスト

use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use tempfile::TempDir;

use confdesk::auth::{
    AuthError, AuthManager, AuthResult, CredentialStore, Credentials, IdentityProvider, Session,
    SessionStatus, SessionTokens,
};

fn tokens_for(username: &str, access_token: &str, lifetime: Duration) -> SessionTokens {
    SessionTokens {
        access_token: access_token.to_string(),
        refresh_token: Some(format!("{}-refresh", access_token)),
        expires_at: Utc::now() + lifetime,
        refresh_expires_at: None,
        username: Some(username.to_string()),
    }
}

/// 固定のパスワードだけを受け付けるIDプロバイダー
#[derive(Default)]
struct FakeProvider {
    refreshed: Mutex<Vec<String>>,
    logged_out: Mutex<Vec<String>>,
    fail_logout: bool,
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    async fn login(&self, credentials: &Credentials) -> AuthResult<SessionTokens> {
        if credentials.password != "secret" {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(tokens_for(&credentials.username, "fresh-token", Duration::minutes(5)))
    }

    async fn refresh(&self, refresh_token: &str) -> AuthResult<SessionTokens> {
        self.refreshed.lock().push(refresh_token.to_string());
        let mut tokens = tokens_for("ignored", "refreshed-token", Duration::minutes(5));
        tokens.username = None;
        Ok(tokens)
    }

    async fn logout(&self, tokens: &SessionTokens) -> AuthResult<()> {
        self.logged_out.lock().push(tokens.access_token.clone());
        if self.fail_logout {
            return Err(AuthError::Network("connection refused".into()));
        }
        Ok(())
    }
}

struct Fixture {
    _dir: TempDir,
    store: CredentialStore,
    session: Arc<Session>,
    provider: Arc<FakeProvider>,
    auth: AuthManager,
}

fn fixture(provider: FakeProvider) -> Fixture {
    let dir = TempDir::new().unwrap();
    let store = CredentialStore::new(dir.path());
    let session = Arc::new(Session::anonymous());
    let provider = Arc::new(provider);
    let auth = AuthManager::new(session.clone(), provider.clone()).with_store(store.clone());
    Fixture {
        _dir: dir,
        store,
        session,
        provider,
        auth,
    }
}

#[cfg(test)]
mod login_tests {
    use super::*;

    #[tokio::test]
    async fn test_login_establishes_and_saves_session() {
        let f = fixture(FakeProvider::default());
        assert_eq!(f.session.status(), SessionStatus::Anonymous);

        f.auth.login(&Credentials::new("admin", "secret")).await.unwrap();

        assert_eq!(f.session.status(), SessionStatus::Active);
        assert_eq!(f.session.bearer_token().as_deref(), Some("fresh-token"));
        assert_eq!(f.session.username().as_deref(), Some("admin"));
        assert_eq!(f.store.load().unwrap().access_token, "fresh-token");
    }

    #[tokio::test]
    async fn test_wrong_password_leaves_session_anonymous() {
        let f = fixture(FakeProvider::default());

        let error = f.auth.login(&Credentials::new("admin", "nope")).await.unwrap_err();

        assert!(matches!(error, AuthError::InvalidCredentials));
        assert_eq!(f.session.status(), SessionStatus::Anonymous);
        assert!(!f.store.exists());
    }

    #[tokio::test]
    async fn test_logout_clears_session_even_if_provider_fails() {
        let f = fixture(FakeProvider {
            fail_logout: true,
            ..FakeProvider::default()
        });
        f.auth.login(&Credentials::new("admin", "secret")).await.unwrap();
        assert!(f.store.exists());

        f.auth.logout().await;

        assert_eq!(f.session.status(), SessionStatus::Anonymous);
        assert!(f.session.bearer_token().is_none());
        assert!(!f.store.exists());
        assert_eq!(f.provider.logged_out.lock().as_slice(), ["fresh-token".to_string()]);
    }
}

#[cfg(test)]
mod restore_tests {
    use super::*;

    #[tokio::test]
    async fn test_restore_valid_saved_session() {
        let f = fixture(FakeProvider::default());
        f.store
            .save(&tokens_for("admin", "saved-token", Duration::minutes(10)))
            .unwrap();

        assert_eq!(f.auth.restore().await, SessionStatus::Active);
        assert_eq!(f.session.bearer_token().as_deref(), Some("saved-token"));
        assert!(f.provider.refreshed.lock().is_empty());
    }

    #[tokio::test]
    async fn test_restore_refreshes_expired_session() {
        let f = fixture(FakeProvider::default());
        f.store
            .save(&tokens_for("admin", "old-token", Duration::minutes(-1)))
            .unwrap();

        assert_eq!(f.auth.restore().await, SessionStatus::Active);
        assert_eq!(f.session.bearer_token().as_deref(), Some("refreshed-token"));
        // リフレッシュ結果にユーザー名がなければ元の値を引き継ぐ
        assert_eq!(f.session.username().as_deref(), Some("admin"));
        assert_eq!(f.provider.refreshed.lock().as_slice(), ["old-token-refresh".to_string()]);
        assert_eq!(f.store.load().unwrap().access_token, "refreshed-token");
    }

    #[tokio::test]
    async fn test_restore_discards_unrefreshable_session() {
        let f = fixture(FakeProvider::default());
        let mut stale = tokens_for("admin", "old-token", Duration::minutes(-1));
        stale.refresh_token = None;
        f.store.save(&stale).unwrap();

        assert_eq!(f.auth.restore().await, SessionStatus::Anonymous);
        assert!(!f.store.exists());
        assert!(f.session.bearer_token().is_none());
    }

    #[tokio::test]
    async fn test_restore_without_saved_session() {
        let f = fixture(FakeProvider::default());
        assert_eq!(f.auth.restore().await, SessionStatus::Anonymous);
    }
}

#[cfg(test)]
mod refresh_tests {
    use super::*;

    #[tokio::test]
    async fn test_refresh_replaces_tokens_and_saves() {
        let f = fixture(FakeProvider::default());
        f.auth.login(&Credentials::new("admin", "secret")).await.unwrap();

        f.auth.refresh().await.unwrap();

        assert_eq!(f.session.bearer_token().as_deref(), Some("refreshed-token"));
        assert_eq!(f.session.username().as_deref(), Some("admin"));
        assert_eq!(f.provider.refreshed.lock().as_slice(), ["fresh-token-refresh".to_string()]);
        assert_eq!(f.store.load().unwrap().access_token, "refreshed-token");
    }

    #[tokio::test]
    async fn test_refresh_without_session_fails() {
        let f = fixture(FakeProvider::default());

        let error = f.auth.refresh().await.unwrap_err();

        assert!(matches!(error, AuthError::NoRefreshToken));
        assert!(f.provider.refreshed.lock().is_empty());
    }

    #[tokio::test]
    async fn test_keep_alive_leaves_fresh_session_alone() {
        let f = fixture(FakeProvider::default());
        f.auth.login(&Credentials::new("admin", "secret")).await.unwrap();

        let status = f.auth.keep_alive(Duration::seconds(60)).await;

        assert_eq!(status, SessionStatus::Active);
        assert_eq!(f.session.bearer_token().as_deref(), Some("fresh-token"));
        assert!(f.provider.refreshed.lock().is_empty());
    }

    #[tokio::test]
    async fn test_keep_alive_refreshes_expiring_session() {
        let f = fixture(FakeProvider::default());
        f.session
            .establish(tokens_for("admin", "expiring-token", Duration::seconds(30)));

        let status = f.auth.keep_alive(Duration::seconds(60)).await;

        assert_eq!(status, SessionStatus::Active);
        assert_eq!(f.session.bearer_token().as_deref(), Some("refreshed-token"));
        assert_eq!(
            f.provider.refreshed.lock().as_slice(),
            ["expiring-token-refresh".to_string()]
        );
    }

    #[tokio::test]
    async fn test_keep_alive_reports_expired_when_refresh_impossible() {
        let f = fixture(FakeProvider::default());
        let mut stale = tokens_for("admin", "old-token", Duration::minutes(-1));
        stale.refresh_token = None;
        f.session.establish(stale);

        assert_eq!(f.auth.keep_alive(Duration::seconds(60)).await, SessionStatus::Expired);
        assert!(f.session.bearer_token().is_none());
    }

    #[tokio::test]
    async fn test_keep_alive_without_session() {
        let f = fixture(FakeProvider::default());
        assert_eq!(f.auth.keep_alive(Duration::seconds(60)).await, SessionStatus::Anonymous);
    }
}
