//! アプリケーション全体のエラー型

use std::path::PathBuf;

use crate::api::ApiError;
use crate::auth::AuthError;

#[derive(Debug, thiserror::Error)]
pub enum ConfdeskError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Failed to access config file {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Failed to get project directories")]
    NoProjectDirs,

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

pub type ConfdeskResult<T> = Result<T, ConfdeskError>;
