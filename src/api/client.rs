//! 認証付きAPIクライアント
//!
//! セッションが有効ならBearerトークンを付与して送信し、2xx以外のステータス・
//! デコード失敗をすべて `ApiError` として呼び出し元へ返す。リトライはしない。

use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;

use super::error::{ApiError, ApiResult};
use super::transport::{ApiRequest, HttpMethod, RawResponse, ReqwestTransport, Transport};
use crate::auth::Session;

/// 認証付きAPIクライアント
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Arc<Session>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("authenticated", &self.session.is_authenticated())
            .finish()
    }
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, session: Arc<Session>) -> Self {
        Self { transport, session }
    }

    /// reqwest を使うクライアントを作成
    pub fn connect(base_url: &str, timeout: Duration, session: Arc<Session>) -> ApiResult<Self> {
        let transport = ReqwestTransport::new(base_url, timeout)?;
        tracing::info!("🌐 API client targeting {}", transport.base_url());
        Ok(Self::new(Arc::new(transport), session))
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// リクエストを送信し、2xxのレスポンスのみを返す
    pub async fn dispatch(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ApiResult<RawResponse> {
        let bearer = self.session.bearer_token();

        tracing::debug!(
            method = %method,
            path = %path,
            authenticated = bearer.is_some(),
            "📡 API request"
        );

        let request = ApiRequest {
            method,
            path: path.to_string(),
            bearer,
            body,
        };

        let response = self.transport.execute(request).await.map_err(|e| {
            tracing::warn!(method = %method, path = %path, "❌ API transport failure: {}", e);
            e
        })?;

        if !response.is_success() {
            tracing::warn!(
                method = %method,
                path = %path,
                status = response.status,
                "❌ API request failed"
            );
            return Err(ApiError::from_status(response.status, response.body));
        }

        tracing::debug!(
            method = %method,
            path = %path,
            status = response.status,
            response_size_bytes = response.body.len(),
            "📨 API response"
        );

        Ok(response)
    }

    /// GETしてJSONをデコード
    pub async fn get<T>(&self, path: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self.dispatch(HttpMethod::GET, path, None).await?;
        serde_json::from_str(&response.body).map_err(|e| {
            tracing::error!(path = %path, "❌ Failed to parse JSON response: {}", e);
            tracing::debug!(
                "🔍 Response text preview: {}",
                response.body.chars().take(200).collect::<String>()
            );
            ApiError::from(e)
        })
    }

    /// POSTし、サーバーが返した識別子を受け取る
    pub async fn post_for_identity<B>(&self, path: &str, body: &B) -> ApiResult<String>
    where
        B: Serialize + ?Sized,
    {
        let body = encode_body(body)?;
        let response = self.dispatch(HttpMethod::POST, path, Some(body)).await?;
        decode_identity(&response.body)?.ok_or_else(|| {
            ApiError::Decode(format!("empty identity in response to POST {}", path))
        })
    }

    /// POSTし、2xxなら成功とする
    ///
    /// 戻り値を返さないコマンド（空ボディ・`null`）は `None`。
    pub async fn post_accepting_empty<B>(&self, path: &str, body: &B) -> ApiResult<Option<String>>
    where
        B: Serialize + ?Sized,
    {
        let body = encode_body(body)?;
        let response = self.dispatch(HttpMethod::POST, path, Some(body)).await?;
        decode_identity(&response.body)
    }

    /// PUTし、識別子を受け取る（空のボディなら `fallback`）
    pub async fn put_for_identity<B>(&self, path: &str, body: &B, fallback: &str) -> ApiResult<String>
    where
        B: Serialize + ?Sized,
    {
        let body = encode_body(body)?;
        let response = self.dispatch(HttpMethod::PUT, path, Some(body)).await?;
        Ok(decode_identity(&response.body)?.unwrap_or_else(|| fallback.to_string()))
    }

    /// DELETEし、識別子を受け取る（空のボディなら `fallback`）
    pub async fn delete_for_identity(&self, path: &str, fallback: &str) -> ApiResult<String> {
        let response = self.dispatch(HttpMethod::DELETE, path, None).await?;
        Ok(decode_identity(&response.body)?.unwrap_or_else(|| fallback.to_string()))
    }
}

fn encode_body<B>(body: &B) -> ApiResult<serde_json::Value>
where
    B: Serialize + ?Sized,
{
    serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))
}

/// コマンド系エンドポイントのレスポンスから識別子を取り出す
///
/// 素のテキスト・JSON文字列のどちらでも受け付ける。空ボディと `null` は `None`。
pub fn decode_identity(body: &str) -> ApiResult<Option<String>> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }

    if trimmed.starts_with('"') {
        let value: String = serde_json::from_str(trimmed)?;
        return Ok(Some(value).filter(|v| !v.is_empty()));
    }

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return Err(ApiError::Decode(format!(
            "expected identity string, got structured body: {}",
            trimmed.chars().take(80).collect::<String>()
        )));
    }

    Ok(Some(trimmed.to_string()))
}

/// パスに埋め込むID
pub(crate) fn path_segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}
