//! ログ初期化

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{project_dirs, LogConfig};
use crate::error::{ConfdeskError, ConfdeskResult};

const LOG_FILE_PREFIX: &str = "confdesk.log";

/// ログ出力先ディレクトリ（設定がなければXDGのデータディレクトリ配下）
pub fn log_directory(config: &LogConfig) -> ConfdeskResult<PathBuf> {
    match &config.log_dir {
        Some(dir) => Ok(dir.clone()),
        None => Ok(project_dirs()?.data_local_dir().join("logs")),
    }
}

/// `RUST_LOG` があればそれを優先し、なければ設定のレベルを使う
fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// ログを初期化する
///
/// ファイル出力が有効な場合は日次ローテーションのファイルにも書き出す。
/// 戻り値のガードは `main` の終わりまで保持すること。
pub fn init_logging(config: &LogConfig) -> ConfdeskResult<Option<WorkerGuard>> {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .with_filter(env_filter(config));

    let (file_layer, guard) = if config.enable_file_logging {
        let dir = log_directory(config)?;
        std::fs::create_dir_all(&dir)
            .map_err(|e| ConfdeskError::Logging(format!("{}: {}", dir.display(), e)))?;

        let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(writer)
            .with_filter(env_filter(config));
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| ConfdeskError::Logging(e.to_string()))?;

    if guard.is_some() {
        tracing::info!("📝 File logging enabled: {}", log_directory(config)?.display());
    }

    Ok(guard)
}
