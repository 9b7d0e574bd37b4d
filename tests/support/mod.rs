//! 統合テスト用のメモリ上バックエンド
//!
//! `Transport` を実装し、REST の各エンドポイントをメモリ上で再現する。
//! 受け取ったリクエストはすべて記録する。

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

use confdesk::api::{ApiClient, ApiError, ApiRequest, ApiResult, HttpMethod, RawResponse, Transport};
use confdesk::auth::{Session, SessionTokens};
use confdesk::models::{
    Conference, ConferenceDraft, ConferenceId, Keynote, KeynoteDraft, KeynoteId, Review, ReviewDraft,
    ReviewId, ReviewStats,
};

#[derive(Default)]
struct BackendState {
    keynotes: Vec<Keynote>,
    conferences: Vec<Conference>,
    stats: Vec<ReviewStats>,
    next_id: u64,
}

impl BackendState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}{}", prefix, self.next_id)
    }
}

#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<BackendState>,
    requests: Mutex<Vec<ApiRequest>>,
    injected: Mutex<VecDeque<ApiResult<RawResponse>>>,
}

fn json<T: serde::Serialize>(value: &T) -> RawResponse {
    RawResponse {
        status: 200,
        body: serde_json::to_string(value).unwrap(),
    }
}

fn text(value: &str) -> RawResponse {
    RawResponse {
        status: 200,
        body: value.to_string(),
    }
}

fn status(code: u16, body: &str) -> RawResponse {
    RawResponse {
        status: code,
        body: body.to_string(),
    }
}

fn decode<T: serde::de::DeserializeOwned>(request: &ApiRequest) -> Option<T> {
    request
        .body
        .clone()
        .and_then(|body| serde_json::from_value(body).ok())
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// このバックエンドに接続したクライアント
    pub fn client(self: &Arc<Self>, session: Arc<Session>) -> ApiClient {
        ApiClient::new(self.clone(), session)
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub fn requests_to(&self, method: HttpMethod, path: &str) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .cloned()
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// 次のリクエストに指定ステータスで応答する
    pub fn fail_next_with_status(&self, code: u16, body: &str) {
        self.injected.lock().push_back(Ok(status(code, body)));
    }

    /// 次のリクエストを接続エラーにする
    pub fn fail_next_with_transport(&self) {
        self.injected
            .lock()
            .push_back(Err(ApiError::Transport("connection refused".to_string())));
    }

    pub fn keynotes(&self) -> Vec<Keynote> {
        self.state.lock().keynotes.clone()
    }

    pub fn seed_keynote(&self, draft: KeynoteDraft) -> KeynoteId {
        let mut state = self.state.lock();
        let id = KeynoteId::new(state.next_id("k"));
        state.keynotes.push(keynote_from(id.clone(), draft));
        id
    }

    /// 指定したIDでカンファレンスを登録
    pub fn seed_conference_with_id(&self, id: &str, draft: ConferenceDraft) -> ConferenceId {
        let id = ConferenceId::new(id);
        self.state.lock().conferences.push(conference_from(id.clone(), draft));
        id
    }

    pub fn set_stats(&self, stats: Vec<ReviewStats>) {
        self.state.lock().stats = stats;
    }

    fn route(&self, request: &ApiRequest) -> RawResponse {
        let segments: Vec<String> = request
            .path
            .trim_start_matches('/')
            .split('/')
            .map(|s| urlencoding::decode(s).map(|s| s.into_owned()).unwrap_or_else(|_| s.to_string()))
            .collect();
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
        let mut state = self.state.lock();

        match (request.method, segments.as_slice()) {
            (HttpMethod::GET, ["keynotes", "queries", "all"]) => json(&state.keynotes),
            (HttpMethod::POST, ["keynotes", "commands", "create"]) => {
                let Some(draft) = decode::<KeynoteDraft>(request) else {
                    return status(400, "invalid body");
                };
                let id = KeynoteId::new(state.next_id("k"));
                state.keynotes.push(keynote_from(id.clone(), draft));
                text(id.as_str())
            }
            (HttpMethod::PUT, ["keynotes", "commands", "update", id]) => {
                let Some(draft) = decode::<KeynoteDraft>(request) else {
                    return status(400, "invalid body");
                };
                match state.keynotes.iter_mut().find(|k| k.keynote_id.as_str() == *id) {
                    Some(keynote) => {
                        *keynote = keynote_from(keynote.keynote_id.clone(), draft);
                        // 更新系はボディなしで応答する
                        text("")
                    }
                    None => status(500, "aggregate not found"),
                }
            }
            (HttpMethod::DELETE, ["keynotes", "commands", "delete", id]) => {
                let before = state.keynotes.len();
                state.keynotes.retain(|k| k.keynote_id.as_str() != *id);
                if state.keynotes.len() == before {
                    status(500, "aggregate not found")
                } else {
                    text(id)
                }
            }
            (HttpMethod::GET, ["conferences", "queries", "all"]) => json(&state.conferences),
            (HttpMethod::GET, ["conferences", "queries", id]) => {
                match state.conferences.iter().find(|c| c.conference_id.as_str() == *id) {
                    Some(conference) => json(conference),
                    None => status(404, "not found"),
                }
            }
            (HttpMethod::POST, ["conferences", "commands", "create"]) => {
                let Some(draft) = decode::<ConferenceDraft>(request) else {
                    return status(400, "invalid body");
                };
                let known = draft
                    .keynote_id
                    .as_ref()
                    .map(|id| state.keynotes.iter().any(|k| &k.keynote_id == id))
                    .unwrap_or(false);
                if !known {
                    return status(400, "unknown keynote");
                }
                let id = ConferenceId::new(state.next_id("c"));
                state.conferences.push(conference_from(id.clone(), draft));
                // JSON文字列で返す
                text(&format!("\"{}\"", id))
            }
            (HttpMethod::PUT, ["conferences", "commands", "update", id]) => {
                let Some(draft) = decode::<ConferenceDraft>(request) else {
                    return status(400, "invalid body");
                };
                match state.conferences.iter_mut().find(|c| c.conference_id.as_str() == *id) {
                    Some(conference) => {
                        let reviews = std::mem::take(&mut conference.reviews);
                        *conference = conference_from(conference.conference_id.clone(), draft);
                        conference.reviews = reviews;
                        text(id)
                    }
                    None => status(500, "aggregate not found"),
                }
            }
            (HttpMethod::DELETE, ["conferences", "commands", "delete", id]) => {
                let before = state.conferences.len();
                state.conferences.retain(|c| c.conference_id.as_str() != *id);
                if state.conferences.len() == before {
                    status(500, "aggregate not found")
                } else {
                    text(id)
                }
            }
            (HttpMethod::POST, ["conferences", "commands", id, "reviews"]) => {
                let Some(draft) = decode::<ReviewDraft>(request) else {
                    return status(400, "invalid body");
                };
                let review_id = ReviewId::new(state.next_id("r"));
                match state.conferences.iter_mut().find(|c| c.conference_id.as_str() == *id) {
                    Some(conference) => {
                        conference.reviews.push(Review {
                            review_id,
                            date: NaiveDate::from_ymd_opt(2024, 9, 10).and_then(|d| d.and_hms_opt(12, 0, 0)),
                            text: draft.text,
                            stars: draft.stars,
                        });
                        // レビュー追加のハンドラーは何も返さない
                        text("")
                    }
                    None => status(500, "aggregate not found"),
                }
            }
            (HttpMethod::GET, ["analytics", "reviews", "window"]) => json(&state.stats),
            _ => status(404, "no route"),
        }
    }
}

#[async_trait]
impl Transport for FakeBackend {
    async fn execute(&self, request: ApiRequest) -> ApiResult<RawResponse> {
        self.requests.lock().push(request.clone());

        if let Some(injected) = self.injected.lock().pop_front() {
            return injected;
        }

        Ok(self.route(&request))
    }
}

fn keynote_from(keynote_id: KeynoteId, draft: KeynoteDraft) -> Keynote {
    Keynote {
        keynote_id,
        first_name: draft.first_name,
        last_name: draft.last_name,
        email: draft.email,
        keynote_function: draft.keynote_function,
    }
}

fn conference_from(conference_id: ConferenceId, draft: ConferenceDraft) -> Conference {
    Conference {
        conference_id,
        title: draft.title,
        conference_type: draft.conference_type,
        date: draft.date,
        duration: draft.duration,
        registered_count: draft.registered_count,
        score: draft.score,
        keynote_id: draft.keynote_id,
        reviews: Vec::new(),
    }
}

/// 有効なアクセストークンを持つセッション
pub fn active_session() -> Arc<Session> {
    Arc::new(Session::with_tokens(SessionTokens {
        access_token: "test-access-token".to_string(),
        refresh_token: Some("test-refresh-token".to_string()),
        expires_at: Utc::now() + Duration::minutes(5),
        refresh_expires_at: None,
        username: Some("admin".to_string()),
    }))
}

/// 期限切れのセッション
pub fn expired_session() -> Arc<Session> {
    Arc::new(Session::with_tokens(SessionTokens {
        access_token: "stale-access-token".to_string(),
        refresh_token: None,
        expires_at: Utc::now() - Duration::minutes(1),
        refresh_expires_at: None,
        username: Some("admin".to_string()),
    }))
}

pub fn ada_lovelace() -> KeynoteDraft {
    KeynoteDraft {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@x.org".to_string(),
        keynote_function: "Speaker".to_string(),
    }
}
