//! 分析データの定期取得
//!
//! Idle → Polling → Idle の状態遷移を持つ。開始直後に1回取得し、以降は一定間隔で取得する。
//! 取得に成功するたびに系列を丸ごと置き換え、失敗したティックは何もせず次を待つ。
//! バックオフ・一時停止はない。`PollerHandle` を止める（または破棄する）とタスクも終了する。

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::api::SnapshotSource;
use crate::models::ReviewStats;

/// デフォルトの取得間隔（5秒）
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PollerState {
    #[default]
    Idle,
    Polling,
}

/// 画面に公開する分析状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsState {
    pub status: PollerState,
    /// 最後に取得できた系列
    pub series: Vec<ReviewStats>,
    pub last_updated: Option<DateTime<Utc>>,
}

pub struct AnalyticsPoller<S: SnapshotSource> {
    source: Arc<S>,
    interval: Duration,
    state: Arc<watch::Sender<AnalyticsState>>,
}

impl<S: SnapshotSource> Clone for AnalyticsPoller<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            interval: self.interval,
            state: self.state.clone(),
        }
    }
}

impl<S: SnapshotSource> AnalyticsPoller<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self::with_interval(source, DEFAULT_POLL_INTERVAL)
    }

    pub fn with_interval(source: Arc<S>, interval: Duration) -> Self {
        let (state, _) = watch::channel(AnalyticsState::default());
        Self {
            source,
            interval,
            state: Arc::new(state),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn subscribe(&self) -> watch::Receiver<AnalyticsState> {
        self.state.subscribe()
    }

    /// 現在の状態のコピー
    pub fn latest(&self) -> AnalyticsState {
        self.state.borrow().clone()
    }

    /// 取得ループを開始する
    ///
    /// tokio ランタイム上で呼ぶこと。
    pub fn start(&self) -> PollerHandle {
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();
        let source = self.source.clone();
        let state = self.state.clone();
        let period = self.interval;

        state.send_modify(|s| s.status = PollerState::Polling);
        tracing::info!("📊 Analytics polling started (every {:?})", period);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = &mut cancel_rx => break,
                    _ = ticker.tick() => {}
                }

                // 停止後に結果を反映しないよう、取得中もキャンセルを監視する
                tokio::select! {
                    biased;
                    _ = &mut cancel_rx => break,
                    result = source.fetch_snapshot() => match result {
                        Ok(series) => {
                            tracing::debug!(windows = series.len(), "📈 Analytics snapshot received");
                            state.send_modify(|s| {
                                s.series = series;
                                s.last_updated = Some(Utc::now());
                            });
                        }
                        Err(e) => {
                            tracing::debug!("⏭️ Analytics fetch skipped: {}", e);
                        }
                    },
                }
            }

            state.send_modify(|s| s.status = PollerState::Idle);
            tracing::info!("🛑 Analytics polling stopped");
        });

        PollerHandle {
            cancel: Some(cancel_tx),
            task: Some(task),
        }
    }
}

/// 実行中の取得ループ。破棄すると停止する。
pub struct PollerHandle {
    cancel: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// 停止を要求する（以降の取得は行われない）
    pub fn stop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
            && self
                .task
                .as_ref()
                .map(|task| !task.is_finished())
                .unwrap_or(false)
    }

    /// 停止してタスクの終了を待つ
    pub async fn stop_and_wait(mut self) {
        self.stop();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!("⚠️ Analytics polling task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
