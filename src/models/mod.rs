//! バックエンドとやり取りするデータモデル
//!
//! ワイヤ形式はバックエンド（Jackson）に合わせて camelCase の JSON。

pub mod analytics;
pub mod conference;
pub mod keynote;

pub use analytics::ReviewStats;
pub use conference::{Conference, ConferenceDraft, ConferenceId, ConferenceType, Review, ReviewDraft, ReviewId};
pub use keynote::{Keynote, KeynoteDraft, KeynoteId};

use chrono::NaiveDateTime;

/// 日時入力欄の値（`datetime-local`）をパース
///
/// 秒あり・秒なしの両方を受け付ける。空文字列は `None`。
pub fn parse_local_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// 日時入力欄へ流し込む文字列
pub fn format_local_datetime(value: Option<&NaiveDateTime>) -> String {
    value
        .map(|dt| dt.format("%Y-%m-%dT%H:%M").to_string())
        .unwrap_or_default()
}
