use anyhow::Context;
use clap::Parser;
use confdesk::{
    api::ApiClient,
    auth::{AuthManager, CredentialStore, OidcProvider, Session},
    config::{AppConfig, ConfigManager},
    gui::{AppContext, MainWindow},
    logging,
};
use dioxus::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

/// カンファレンス管理コンソール
#[derive(Parser, Debug)]
#[command(name = "confdesk")]
#[command(about = "Desktop admin console for the conference management backend")]
struct Args {
    /// 設定ファイル（省略時はXDGの設定ディレクトリ）
    #[arg(long)]
    config: Option<PathBuf>,

    /// ゲートウェイのベースURL
    #[arg(long)]
    base_url: Option<String>,

    /// OIDCのissuer URL
    #[arg(long)]
    issuer_url: Option<String>,

    /// ログレベル (trace/debug/info/warn/error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    /// コマンドライン引数で設定を上書き
    fn apply(&self, config: &mut AppConfig) {
        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(issuer_url) = &self.issuer_url {
            config.auth.issuer_url = issuer_url.clone();
        }
        if let Some(log_level) = &self.log_level {
            config.log.log_level = log_level.clone();
        }
    }
}

fn app() -> Element {
    rsx! {
        MainWindow {}
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config_manager = match &args.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new()?,
    };
    let mut config = config_manager.load_config().unwrap_or_else(|e| {
        eprintln!("設定読み込みエラー、デフォルト設定を使用: {}", e);
        AppConfig::default()
    });
    args.apply(&mut config);

    // tokio-consoleの初期化（プロファイリング用）
    #[cfg(feature = "debug-tokio")]
    console_subscriber::init();

    #[cfg(not(feature = "debug-tokio"))]
    let _log_guard = logging::init_logging(&config.log)?;

    tracing::info!("🎬 Starting confdesk - Conference admin console");
    tracing::debug!(config = %config_manager.config_path().display(), "⚙️ Using config file");

    // セッションはここで一度だけ作り、クライアントと画面で共有する
    let session = Arc::new(Session::anonymous());
    let client = ApiClient::connect(&config.api.base_url, config.api.timeout(), session.clone())
        .context("Failed to create API client")?;

    let provider = Arc::new(OidcProvider::new(
        config.auth.issuer_url.clone(),
        config.auth.client_id.clone(),
    ));
    let mut auth = AuthManager::new(session, provider);
    if config.auth.remember_session {
        match config_manager.config_dir() {
            Some(dir) => auth = auth.with_store(CredentialStore::new(dir)),
            None => tracing::warn!("Config directory unavailable, session will not be remembered"),
        }
    }

    let window = config.window.clone();
    let context = AppContext::new(client, auth, config);

    tracing::info!(
        "🪟 ウィンドウ設定: {}x{} at ({}, {}), 最大化: {}",
        window.width,
        window.height,
        window.x,
        window.y,
        window.maximized
    );

    dioxus::LaunchBuilder::desktop()
        .with_context(context)
        .with_cfg(
            dioxus::desktop::Config::new().with_window(
                dioxus::desktop::tao::window::WindowBuilder::new()
                    .with_title("confdesk - Conference Admin")
                    .with_inner_size(dioxus::desktop::tao::dpi::LogicalSize::new(
                        window.width as f64,
                        window.height as f64,
                    ))
                    .with_position(dioxus::desktop::tao::dpi::LogicalPosition::new(
                        window.x as f64,
                        window.y as f64,
                    ))
                    .with_maximized(window.maximized)
                    .with_resizable(true),
            ),
        )
        .launch(app);

    tracing::info!("👋 confdesk shutting down");
    Ok(())
}
