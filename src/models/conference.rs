use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use super::keynote::KeynoteId;

/// カンファレンスID
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConferenceId(pub String);

impl ConferenceId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// レビューID
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(pub String);

impl ReviewId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

/// カンファレンス種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConferenceType {
    #[default]
    Academic,
    Commercial,
}

impl ConferenceType {
    pub const ALL: [ConferenceType; 2] = [ConferenceType::Academic, ConferenceType::Commercial];

    /// ワイヤ上の表記
    pub fn as_str(&self) -> &'static str {
        match self {
            ConferenceType::Academic => "ACADEMIC",
            ConferenceType::Commercial => "COMMERCIAL",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConferenceType::Academic => "Academic",
            ConferenceType::Commercial => "Commercial",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

/// カンファレンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conference {
    pub conference_id: ConferenceId,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub conference_type: ConferenceType,
    #[serde(default)]
    pub date: Option<NaiveDateTime>,
    /// 分単位
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub registered_count: u32,
    #[serde(default)]
    pub score: f64,
    pub keynote_id: Option<KeynoteId>,
    /// バックエンドは未初期化のコレクションを null で返すことがある
    #[serde(default, deserialize_with = "null_as_empty")]
    pub reviews: Vec<Review>,
}

/// 作成・更新時に送るフィールド（IDとレビューを除く）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceDraft {
    pub title: String,
    #[serde(rename = "type")]
    pub conference_type: ConferenceType,
    pub date: Option<NaiveDateTime>,
    pub duration: u32,
    pub registered_count: u32,
    pub score: f64,
    pub keynote_id: Option<KeynoteId>,
}

impl From<&Conference> for ConferenceDraft {
    fn from(conference: &Conference) -> Self {
        Self {
            title: conference.title.clone(),
            conference_type: conference.conference_type,
            date: conference.date,
            duration: conference.duration,
            registered_count: conference.registered_count,
            score: conference.score,
            keynote_id: conference.keynote_id.clone(),
        }
    }
}

/// レビュー
///
/// 所属カンファレンスへの逆参照はバックエンドがシリアライズしないため、
/// 親の `Conference::reviews` に含まれることで表現する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub review_id: ReviewId,
    #[serde(default)]
    pub date: Option<NaiveDateTime>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub stars: i32,
}

/// レビュー投稿時に送るフィールド
///
/// 星の数は入力欄で 1〜5 に制限するのみで、送信時には検証しない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewDraft {
    pub text: String,
    pub stars: i32,
}

impl ReviewDraft {
    pub const MIN_STARS: i32 = 1;
    pub const MAX_STARS: i32 = 5;
}

impl Default for ReviewDraft {
    fn default() -> Self {
        Self {
            text: String::new(),
            stars: Self::MAX_STARS,
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
