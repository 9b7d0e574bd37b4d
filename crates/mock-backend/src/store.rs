//! In-memory storage for the mock backend.

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tumbling window size used by the review statistics.
pub const STATS_WINDOW_SECS: i64 = 5;
/// How far back the statistics endpoint looks.
pub const STATS_LOOKBACK_SECS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keynote {
    pub keynote_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub keynote_function: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeynoteFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub keynote_function: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub review_id: String,
    pub date: NaiveDateTime,
    pub text: String,
    pub stars: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReviewFields {
    pub text: String,
    pub stars: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conference {
    pub conference_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub conference_type: String,
    pub date: Option<NaiveDateTime>,
    pub duration: u32,
    pub registered_count: u32,
    pub score: f64,
    pub keynote_id: Option<String>,
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConferenceFields {
    pub title: String,
    #[serde(rename = "type")]
    pub conference_type: String,
    pub date: Option<NaiveDateTime>,
    pub duration: u32,
    pub registered_count: u32,
    pub score: f64,
    pub keynote_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub count: u64,
    pub total_stars: u64,
    pub average_stars: f64,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound(String),
    UnknownKeynote(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "aggregate not found: {}", id),
            StoreError::UnknownKeynote(id) => write!(f, "unknown keynote: {}", id),
        }
    }
}

#[derive(Debug, Default)]
pub struct Store {
    keynotes: Vec<Keynote>,
    conferences: Vec<Conference>,
    review_events: Vec<(DateTime<Utc>, i32)>,
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with a couple of keynotes and conferences to click through.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        let grace = store.create_keynote(KeynoteFields {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: "grace@example.org".into(),
            keynote_function: "Speaker".into(),
        });
        let alan = store.create_keynote(KeynoteFields {
            first_name: "Alan".into(),
            last_name: "Turing".into(),
            email: "alan@example.org".into(),
            keynote_function: "Chair".into(),
        });

        let now = Local::now().naive_local();
        let _ = store.create_conference(ConferenceFields {
            title: "Compilers Today".into(),
            conference_type: "ACADEMIC".into(),
            date: Some(now),
            duration: 90,
            registered_count: 120,
            score: 4.5,
            keynote_id: Some(grace),
        });
        let _ = store.create_conference(ConferenceFields {
            title: "Cloud Expo".into(),
            conference_type: "COMMERCIAL".into(),
            date: Some(now),
            duration: 45,
            registered_count: 300,
            score: 3.8,
            keynote_id: Some(alan),
        });
        store
    }

    pub fn keynotes(&self) -> &[Keynote] {
        &self.keynotes
    }

    pub fn create_keynote(&mut self, fields: KeynoteFields) -> String {
        let id = new_id();
        self.keynotes.push(Keynote {
            keynote_id: id.clone(),
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            keynote_function: fields.keynote_function,
        });
        id
    }

    pub fn update_keynote(&mut self, id: &str, fields: KeynoteFields) -> Result<String, StoreError> {
        let keynote = self
            .keynotes
            .iter_mut()
            .find(|k| k.keynote_id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        keynote.first_name = fields.first_name;
        keynote.last_name = fields.last_name;
        keynote.email = fields.email;
        keynote.keynote_function = fields.keynote_function;
        Ok(id.to_string())
    }

    pub fn delete_keynote(&mut self, id: &str) -> Result<String, StoreError> {
        let before = self.keynotes.len();
        self.keynotes.retain(|k| k.keynote_id != id);
        if self.keynotes.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(id.to_string())
    }

    pub fn conferences(&self) -> &[Conference] {
        &self.conferences
    }

    pub fn conference(&self, id: &str) -> Option<&Conference> {
        self.conferences.iter().find(|c| c.conference_id == id)
    }

    fn check_keynote(&self, keynote_id: Option<&str>) -> Result<(), StoreError> {
        match keynote_id {
            Some(id) if self.keynotes.iter().any(|k| k.keynote_id == id) => Ok(()),
            Some(id) => Err(StoreError::UnknownKeynote(id.to_string())),
            None => Err(StoreError::UnknownKeynote(String::new())),
        }
    }

    pub fn create_conference(&mut self, fields: ConferenceFields) -> Result<String, StoreError> {
        self.check_keynote(fields.keynote_id.as_deref())?;
        let id = new_id();
        self.conferences.push(Conference {
            conference_id: id.clone(),
            title: fields.title,
            conference_type: fields.conference_type,
            date: fields.date,
            duration: fields.duration,
            registered_count: fields.registered_count,
            score: fields.score,
            keynote_id: fields.keynote_id,
            reviews: Vec::new(),
        });
        Ok(id)
    }

    pub fn update_conference(&mut self, id: &str, fields: ConferenceFields) -> Result<String, StoreError> {
        let conference = self
            .conferences
            .iter_mut()
            .find(|c| c.conference_id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        conference.title = fields.title;
        conference.conference_type = fields.conference_type;
        conference.date = fields.date;
        conference.duration = fields.duration;
        conference.registered_count = fields.registered_count;
        conference.score = fields.score;
        conference.keynote_id = fields.keynote_id;
        Ok(id.to_string())
    }

    pub fn delete_conference(&mut self, id: &str) -> Result<String, StoreError> {
        let before = self.conferences.len();
        self.conferences.retain(|c| c.conference_id != id);
        if self.conferences.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(id.to_string())
    }

    pub fn add_review(
        &mut self,
        conference_id: &str,
        fields: ReviewFields,
        now: DateTime<Utc>,
    ) -> Result<String, StoreError> {
        let conference = self
            .conferences
            .iter_mut()
            .find(|c| c.conference_id == conference_id)
            .ok_or_else(|| StoreError::NotFound(conference_id.to_string()))?;

        let id = new_id();
        conference.reviews.push(Review {
            review_id: id.clone(),
            date: now.with_timezone(&Local).naive_local(),
            text: fields.text,
            stars: fields.stars,
        });
        self.review_events.push((now, fields.stars));
        Ok(id)
    }

    /// Per-window review statistics over the lookback period, oldest first.
    pub fn review_stats(&self, now: DateTime<Utc>) -> Vec<ReviewStats> {
        let window_ms = STATS_WINDOW_SECS * 1000;
        let from = now.timestamp_millis() - STATS_LOOKBACK_SECS * 1000;

        let mut windows: BTreeMap<i64, (u64, u64)> = BTreeMap::new();
        for (at, stars) in &self.review_events {
            let ms = at.timestamp_millis();
            if ms < from || ms > now.timestamp_millis() {
                continue;
            }
            let start = ms - ms.rem_euclid(window_ms);
            let entry = windows.entry(start).or_default();
            entry.0 += 1;
            entry.1 += (*stars).max(0) as u64;
        }

        windows
            .into_iter()
            .filter_map(|(start, (count, total_stars))| {
                Some(ReviewStats {
                    count,
                    total_stars,
                    average_stars: total_stars as f64 / count as f64,
                    window_start: DateTime::from_timestamp_millis(start)?,
                    window_end: DateTime::from_timestamp_millis(start + window_ms)?,
                })
            })
            .collect()
    }
}
