//! IDプロバイダー連携
//!
//! OpenID Connect（Keycloak レルム）のトークンエンドポイントに対して
//! パスワードグラント・リフレッシュグラント・ログアウトを行う。

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use super::session::SessionTokens;
use super::token::decode_claims;
use super::{AuthError, AuthResult};

/// ログイン資格情報
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// IDプロバイダーのインターフェース
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> AuthResult<SessionTokens>;

    async fn refresh(&self, refresh_token: &str) -> AuthResult<SessionTokens>;

    async fn logout(&self, tokens: &SessionTokens) -> AuthResult<()>;
}

/// トークンエンドポイントのレスポンス
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub refresh_expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: String,
}

impl TokenResponse {
    /// セッション用トークンへ変換
    ///
    /// 有効期限はJWTの `exp` を優先し、なければ `expires_in` から算出する。
    pub fn into_tokens(
        self,
        now: DateTime<Utc>,
        fallback_username: Option<&str>,
    ) -> AuthResult<SessionTokens> {
        let claims = decode_claims(&self.access_token)?;

        let expires_at = claims
            .expires_at()
            .unwrap_or_else(|| now + Duration::seconds(self.expires_in));
        let refresh_expires_at = self
            .refresh_expires_in
            .filter(|secs| *secs > 0)
            .map(|secs| now + Duration::seconds(secs));
        let username = claims
            .preferred_username
            .or_else(|| fallback_username.map(str::to_string));

        Ok(SessionTokens {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            refresh_expires_at,
            username,
        })
    }
}

/// OpenID Connect プロバイダー
#[derive(Debug, Clone)]
pub struct OidcProvider {
    http_client: reqwest::Client,
    issuer_url: String,
    client_id: String,
}

impl OidcProvider {
    pub fn new(issuer_url: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            issuer_url: issuer_url.into().trim_end_matches('/').to_string(),
            client_id: client_id.into(),
        }
    }

    pub fn token_endpoint(&self) -> String {
        format!("{}/protocol/openid-connect/token", self.issuer_url)
    }

    pub fn logout_endpoint(&self) -> String {
        format!("{}/protocol/openid-connect/logout", self.issuer_url)
    }

    async fn request_tokens(
        &self,
        form: &[(&str, &str)],
        fallback_username: Option<&str>,
    ) -> AuthResult<SessionTokens> {
        let endpoint = self.token_endpoint();
        tracing::debug!("🔑 Requesting tokens from {}", endpoint);

        let response = self
            .http_client
            .post(&endpoint)
            .form(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("❌ Identity provider unreachable: {}", e);
                AuthError::Network(e.to_string())
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(classify_failure(status, body));
        }

        let token_response: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| AuthError::MalformedToken(format!("invalid token response: {}", e)))?;

        token_response.into_tokens(Utc::now(), fallback_username)
    }
}

/// トークンエンドポイントのエラーを分類
///
/// Keycloak は資格情報の誤りを `invalid_grant` で返す。
pub fn classify_failure(status: u16, body: String) -> AuthError {
    let error_code = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error)
        .unwrap_or_default();

    if matches!(status, 400 | 401) && error_code == "invalid_grant" {
        AuthError::InvalidCredentials
    } else {
        AuthError::Provider { status, body }
    }
}

#[async_trait]
impl IdentityProvider for OidcProvider {
    async fn login(&self, credentials: &Credentials) -> AuthResult<SessionTokens> {
        let form = [
            ("grant_type", "password"),
            ("client_id", self.client_id.as_str()),
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
            ("scope", "openid"),
        ];

        self.request_tokens(&form, Some(&credentials.username)).await
    }

    async fn refresh(&self, refresh_token: &str) -> AuthResult<SessionTokens> {
        let form = [
            ("grant_type", "refresh_token"),
            ("client_id", self.client_id.as_str()),
            ("refresh_token", refresh_token),
        ];

        self.request_tokens(&form, None).await
    }

    async fn logout(&self, tokens: &SessionTokens) -> AuthResult<()> {
        let Some(refresh_token) = tokens.refresh_token.as_deref() else {
            return Ok(());
        };

        let form = [
            ("client_id", self.client_id.as_str()),
            ("refresh_token", refresh_token),
        ];

        let response = self
            .http_client
            .post(self.logout_endpoint())
            .form(&form)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Provider { status, body });
        }

        Ok(())
    }
}
