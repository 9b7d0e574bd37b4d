//! 認証モジュール
//!
//! 管理画面へのアクセスに必要なセッションを管理します。
//!
//! ## 機能
//!
//! - セッション（Bearerトークン）の保持
//! - OpenID Connect プロバイダーへのログイン・リフレッシュ・ログアウト
//! - セッションの保存・復元

pub mod credential_store;
pub mod provider;
pub mod session;
pub mod token;

pub use credential_store::CredentialStore;
pub use provider::{Credentials, IdentityProvider, OidcProvider};
pub use session::{Session, SessionStatus, SessionTokens};

use chrono::{Duration, Utc};
use std::sync::Arc;

/// 認証関連のエラー型
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// ユーザー名またはパスワードの誤り
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// IDプロバイダーがエラーを返した
    #[error("Identity provider error (HTTP {status}): {body}")]
    Provider { status: u16, body: String },

    /// IDプロバイダーに到達できない
    #[error("Identity provider unreachable: {0}")]
    Network(String),

    /// トークンの形式不正
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// リフレッシュトークンがない
    #[error("No refresh token available")]
    NoRefreshToken,

    /// 保存済みセッションの読み込みエラー
    #[error("Failed to load credentials: {0}")]
    LoadError(String),

    /// I/Oエラー
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML解析エラー
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOMLシリアライズエラー
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// セッション・IDプロバイダー・保存先をまとめて扱う
#[derive(Clone)]
pub struct AuthManager {
    session: Arc<Session>,
    provider: Arc<dyn IdentityProvider>,
    store: Option<CredentialStore>,
}

impl AuthManager {
    pub fn new(session: Arc<Session>, provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            session,
            provider,
            store: None,
        }
    }

    /// セッションをファイルに保存する
    pub fn with_store(mut self, store: CredentialStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// ログイン
    pub async fn login(&self, credentials: &Credentials) -> AuthResult<()> {
        let tokens = self.provider.login(credentials).await.map_err(|e| {
            tracing::warn!(username = %credentials.username, "❌ Login failed: {}", e);
            e
        })?;

        self.persist(&tokens);
        self.session.establish(tokens);
        tracing::info!(username = %credentials.username, "✅ Logged in");
        Ok(())
    }

    /// ログアウト
    ///
    /// プロバイダー側のログアウトに失敗してもローカルのセッションは破棄する。
    pub async fn logout(&self) {
        if let Some(tokens) = self.session.clear() {
            if let Err(e) = self.provider.logout(&tokens).await {
                tracing::warn!("Identity provider logout failed: {}", e);
            }
        }

        if let Some(store) = &self.store {
            if let Err(e) = store.delete() {
                tracing::warn!("Failed to delete stored credentials: {}", e);
            }
        }

        tracing::info!("👋 Logged out");
    }

    /// 保存済みセッションを復元
    ///
    /// アクセストークンが期限切れでもリフレッシュできれば一度だけ更新する。
    pub async fn restore(&self) -> SessionStatus {
        let Some(store) = &self.store else {
            return self.session.status();
        };

        if !store.exists() {
            tracing::debug!(path = %store.path().display(), "No saved session");
            return self.session.status();
        }

        let stored = match store.load() {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::debug!("No saved session: {}", e);
                return self.session.status();
            }
        };

        let now = Utc::now();
        if !stored.is_expired_at(now) {
            self.session.establish(stored);
            tracing::info!("🔄 Restored saved session");
            return SessionStatus::Active;
        }

        match self.refresh_tokens(&stored).await {
            Ok(tokens) => {
                self.persist(&tokens);
                self.session.establish(tokens);
                tracing::info!("🔄 Refreshed saved session");
                SessionStatus::Active
            }
            Err(e) => {
                tracing::info!("Saved session could not be refreshed: {}", e);
                if let Err(e) = store.delete() {
                    tracing::warn!("Failed to delete stale credentials: {}", e);
                }
                self.session.status()
            }
        }
    }

    /// 現在のセッションをリフレッシュ
    pub async fn refresh(&self) -> AuthResult<()> {
        let current = self.session.tokens().ok_or(AuthError::NoRefreshToken)?;
        let tokens = self.refresh_tokens(&current).await?;
        self.persist(&tokens);
        self.session.establish(tokens);
        Ok(())
    }

    /// 期限切れ間近（`margin` 以内）または期限切れならリフレッシュする
    ///
    /// 画面側から定期的に呼ぶ。リフレッシュできなければ現在の状態を返すので、
    /// ルートガードがログイン画面へ切り替える。
    pub async fn keep_alive(&self, margin: Duration) -> SessionStatus {
        let Some(tokens) = self.session.tokens() else {
            return SessionStatus::Anonymous;
        };
        if tokens.expires_at - margin > Utc::now() {
            return SessionStatus::Active;
        }

        match self.refresh().await {
            Ok(()) => {
                tracing::debug!("🔄 Session refreshed before expiry");
                SessionStatus::Active
            }
            Err(e) => {
                tracing::info!("Session could not be refreshed: {}", e);
                self.session.status()
            }
        }
    }

    async fn refresh_tokens(&self, tokens: &SessionTokens) -> AuthResult<SessionTokens> {
        if !tokens.can_refresh_at(Utc::now()) {
            return Err(AuthError::NoRefreshToken);
        }
        let refresh_token = tokens
            .refresh_token
            .as_deref()
            .ok_or(AuthError::NoRefreshToken)?;

        let mut refreshed = self.provider.refresh(refresh_token).await?;
        if refreshed.username.is_none() {
            refreshed.username = tokens.username.clone();
        }
        Ok(refreshed)
    }

    fn persist(&self, tokens: &SessionTokens) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save(tokens) {
                tracing::warn!("Failed to save credentials: {}", e);
            }
        }
    }
}
