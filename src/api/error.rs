//! APIエラー

/// エラー種別（画面側で表示を切り替えるための分類）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// レスポンスを受け取れなかった
    Transport,
    /// 401/403
    Authorization,
    /// その他の4xx（入力不正・競合）
    Validation,
    /// 5xx
    Server,
    /// リクエスト/レスポンスのエンコード・デコード失敗
    Codec,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Not authorized (HTTP {status})")]
    Unauthorized { status: u16 },
    #[error("Request rejected (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("Server error (HTTP {status}): {body}")]
    Server { status: u16, body: String },
    #[error("Failed to decode response: {0}")]
    Decode(String),
    #[error("Failed to encode request body: {0}")]
    Encode(String),
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// 2xx以外のステータスをエラーへ変換
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => ApiError::Unauthorized { status },
            400..=499 => ApiError::Rejected { status, body },
            _ => ApiError::Server { status, body },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport(_) | ApiError::InvalidUrl(_) => ErrorKind::Transport,
            ApiError::Unauthorized { .. } => ErrorKind::Authorization,
            ApiError::Rejected { .. } => ErrorKind::Validation,
            ApiError::Server { .. } => ErrorKind::Server,
            ApiError::Decode(_) | ApiError::Encode(_) => ErrorKind::Codec,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { status }
            | ApiError::Rejected { status, .. }
            | ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ApiError::Decode(error.to_string())
        } else {
            ApiError::Transport(error.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::Decode(error.to_string())
    }
}
