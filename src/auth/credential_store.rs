//! セッション保存モジュール
//!
//! IDプロバイダーのセッション（トークン）を `credentials.toml` に保存し、
//! 再起動後もログイン状態を復元できるようにする。

use super::session::SessionTokens;
use super::{AuthError, AuthResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 保存ファイルの構造
#[derive(Debug, Serialize, Deserialize)]
struct StoredCredentials {
    session: SessionTokens,
}

/// セッション保存
#[derive(Debug, Clone)]
pub struct CredentialStore {
    /// 保存ファイルのパス
    path: PathBuf,
}

impl CredentialStore {
    /// 設定ディレクトリ配下に保存するストアを作成
    pub fn new(config_dir: &Path) -> Self {
        Self {
            path: config_dir.join("credentials.toml"),
        }
    }

    /// トークンを保存
    pub fn save(&self, tokens: &SessionTokens) -> AuthResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let stored = StoredCredentials {
            session: tokens.clone(),
        };

        let toml_string = toml::to_string_pretty(&stored)?;
        fs::write(&self.path, toml_string)?;

        Ok(())
    }

    /// トークンを読み込み
    pub fn load(&self) -> AuthResult<SessionTokens> {
        if !self.path.exists() {
            return Err(AuthError::LoadError("Credentials file not found".into()));
        }

        let content = fs::read_to_string(&self.path)?;
        let stored: StoredCredentials = toml::from_str(&content)?;

        if stored.session.access_token.is_empty() {
            return Err(AuthError::LoadError("Stored session has no access token".into()));
        }

        Ok(stored.session)
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// 保存済みトークンを削除
    pub fn delete(&self) -> AuthResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
