//! アクセストークン（JWT）のクレーム読み取り
//!
//! 署名検証はゲートウェイが行うため、ここではペイロードのデコードのみ。

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{AuthError, AuthResult};

/// 表示・有効期限判定に使うクレーム
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub preferred_username: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }
}

/// JWTのペイロード部をデコード
pub fn decode_claims(token: &str) -> AuthResult<TokenClaims> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| AuthError::MalformedToken("missing payload segment".into()))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| AuthError::MalformedToken(format!("invalid base64: {}", e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| AuthError::MalformedToken(format!("invalid claims: {}", e)))
}

#[cfg(test)]
pub(crate) fn encode_test_token(claims: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{}.{}.signature", header, payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_claims() {
        let token = encode_test_token(serde_json::json!({
            "sub": "user-1",
            "preferred_username": "ada",
            "exp": 1_900_000_000
        }));

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.preferred_username.as_deref(), Some("ada"));
        assert_eq!(claims.sub.as_deref(), Some("user-1"));
        assert_eq!(claims.expires_at().unwrap().timestamp(), 1_900_000_000);
    }

    #[test]
    fn test_decode_claims_rejects_garbage() {
        assert!(matches!(
            decode_claims("not-a-jwt"),
            Err(AuthError::MalformedToken(_))
        ));
        assert!(matches!(
            decode_claims("a.!!!.c"),
            Err(AuthError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_missing_claims_are_none() {
        let token = encode_test_token(serde_json::json!({}));
        let claims = decode_claims(&token).unwrap();
        assert!(claims.preferred_username.is_none());
        assert!(claims.expires_at().is_none());
    }
}
