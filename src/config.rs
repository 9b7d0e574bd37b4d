//! アプリケーション設定管理モジュール
//!
//! XDGディレクトリを使用した設定ファイルの永続化と管理を提供します。

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{ConfdeskError, ConfdeskResult};

/// バックエンドAPI設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// ゲートウェイのベースURL
    pub base_url: String,
    /// リクエストのタイムアウト（秒）
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8888".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// IDプロバイダー設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// OIDCのissuer（Keycloakのrealm URL）
    pub issuer_url: String,
    pub client_id: String,
    /// ログイン状態を次回起動時に復元する
    pub remember_session: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer_url: "http://localhost:8080/realms/conference".to_string(),
            client_id: "conference-frontend".to_string(),
            remember_session: true,
        }
    }
}

/// 分析画面設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub poll_interval_ms: u64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 5000,
        }
    }
}

impl AnalyticsConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(100))
    }
}

/// ウィンドウ設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
    pub maximized: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            x: 100,
            y: 100,
            maximized: false,
        }
    }
}

/// ログ設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// ログレベル (trace/debug/info/warn/error)
    pub log_level: String,
    /// ファイル出力有効化
    pub enable_file_logging: bool,
    /// カスタムログディレクトリ（Noneの場合はXDGデフォルト使用）
    pub log_dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            enable_file_logging: false,
            log_dir: None,
        }
    }
}

/// アプリケーション設定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub log: LogConfig,
}

pub(crate) fn project_dirs() -> ConfdeskResult<ProjectDirs> {
    ProjectDirs::from("dev", "sifyfy", "confdesk").ok_or(ConfdeskError::NoProjectDirs)
}

/// 設定管理マネージャー
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// XDGディレクトリの `config.toml` を使う設定マネージャーを作成
    pub fn new() -> ConfdeskResult<Self> {
        let config_path = project_dirs()?.config_dir().join("config.toml");
        debug!("Config file path: {}", config_path.display());
        Ok(Self { config_path })
    }

    /// 任意のパスを使う設定マネージャーを作成
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// 設定ファイルのあるディレクトリ
    pub fn config_dir(&self) -> Option<&Path> {
        self.config_path.parent()
    }

    pub fn config_exists(&self) -> bool {
        self.config_path.exists()
    }

    /// 設定を読み込み（ファイルがなければデフォルト）
    pub fn load_config(&self) -> ConfdeskResult<AppConfig> {
        if !self.config_path.exists() {
            info!(
                "Config file not found, using default settings: {}",
                self.config_path.display()
            );
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_path).map_err(|source| ConfdeskError::ConfigIo {
            path: self.config_path.clone(),
            source,
        })?;

        let config: AppConfig = toml::from_str(&content).map_err(|source| ConfdeskError::ConfigParse {
            path: self.config_path.clone(),
            source,
        })?;

        info!("✅ Configuration loaded from: {}", self.config_path.display());

        Ok(config)
    }

    /// 設定を保存
    pub fn save_config(&self, config: &AppConfig) -> ConfdeskResult<()> {
        let content = toml::to_string_pretty(config)?;

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfdeskError::ConfigIo {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.config_path, content).map_err(|source| ConfdeskError::ConfigIo {
            path: self.config_path.clone(),
            source,
        })?;

        info!("💾 Configuration saved to: {}", self.config_path.display());

        Ok(())
    }

    /// 設定をリセット（デフォルト値に戻す）
    pub fn reset_config(&self) -> ConfdeskResult<AppConfig> {
        let config = AppConfig::default();
        self.save_config(&config)?;
        info!("🔄 Configuration reset to defaults");
        Ok(config)
    }
}
