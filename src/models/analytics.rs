use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 時間窓ごとのレビュー集計（分析スナップショット）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub total_stars: u64,
    #[serde(default)]
    pub average_stars: f64,
    #[serde(default)]
    pub window_start: Option<DateTime<Utc>>,
    pub window_end: DateTime<Utc>,
}

impl ReviewStats {
    /// チャートの横軸ラベル
    pub fn window_label(&self) -> String {
        self.window_end.format("%H:%M:%S").to_string()
    }
}
