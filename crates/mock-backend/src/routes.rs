//! REST surface of the mock backend.
//!
//! Command endpoints answer with the affected identity as plain text, except
//! adding a review, which answers with an empty body. Query endpoints answer
//! with JSON. Any bearer token (or none) is accepted.

use chrono::Utc;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::RwLock;
use warp::http::StatusCode;
use warp::reply::{Reply, Response};
use warp::Filter;

use crate::store::{ConferenceFields, KeynoteFields, ReviewFields, Store, StoreError};

pub type Db = Arc<RwLock<Store>>;

fn with_db(db: Db) -> impl Filter<Extract = (Db,), Error = Infallible> + Clone {
    warp::any().map(move || db.clone())
}

fn identity(result: Result<String, StoreError>) -> Response {
    match result {
        Ok(id) => id.into_response(),
        Err(e @ StoreError::NotFound(_)) => {
            log::warn!("{}", e);
            warp::reply::with_status(e.to_string(), StatusCode::NOT_FOUND).into_response()
        }
        Err(e @ StoreError::UnknownKeynote(_)) => {
            log::warn!("{}", e);
            warp::reply::with_status(e.to_string(), StatusCode::BAD_REQUEST).into_response()
        }
    }
}

pub fn api(db: Db) -> impl Filter<Extract = (Response,), Error = warp::Rejection> + Clone {
    keynotes(db.clone())
        .or(conferences(db.clone()))
        .unify()
        .or(analytics(db))
        .unify()
}

fn keynotes(db: Db) -> impl Filter<Extract = (Response,), Error = warp::Rejection> + Clone {
    let list = warp::path!("keynotes" / "queries" / "all")
        .and(warp::get())
        .and(with_db(db.clone()))
        .and_then(|db: Db| async move {
            let store = db.read().await;
            Ok::<_, Infallible>(warp::reply::json(&store.keynotes()).into_response())
        });

    let create = warp::path!("keynotes" / "commands" / "create")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_db(db.clone()))
        .and_then(|fields: KeynoteFields, db: Db| async move {
            let id = db.write().await.create_keynote(fields);
            log::info!("keynote created: {}", id);
            Ok::<_, Infallible>(identity(Ok(id)))
        });

    let update = warp::path!("keynotes" / "commands" / "update" / String)
        .and(warp::put())
        .and(warp::body::json())
        .and(with_db(db.clone()))
        .and_then(|id: String, fields: KeynoteFields, db: Db| async move {
            Ok::<_, Infallible>(identity(db.write().await.update_keynote(&id, fields)))
        });

    let delete = warp::path!("keynotes" / "commands" / "delete" / String)
        .and(warp::delete())
        .and(with_db(db))
        .and_then(|id: String, db: Db| async move {
            Ok::<_, Infallible>(identity(db.write().await.delete_keynote(&id)))
        });

    list.or(create).unify().or(update).unify().or(delete).unify()
}

fn conferences(db: Db) -> impl Filter<Extract = (Response,), Error = warp::Rejection> + Clone {
    let list = warp::path!("conferences" / "queries" / "all")
        .and(warp::get())
        .and(with_db(db.clone()))
        .and_then(|db: Db| async move {
            let store = db.read().await;
            Ok::<_, Infallible>(warp::reply::json(&store.conferences()).into_response())
        });

    let detail = warp::path!("conferences" / "queries" / String)
        .and(warp::get())
        .and(with_db(db.clone()))
        .and_then(|id: String, db: Db| async move {
            let store = db.read().await;
            let response = match store.conference(&id) {
                Some(conference) => warp::reply::json(conference).into_response(),
                None => warp::reply::with_status(format!("conference not found: {}", id), StatusCode::NOT_FOUND)
                    .into_response(),
            };
            Ok::<_, Infallible>(response)
        });

    let create = warp::path!("conferences" / "commands" / "create")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_db(db.clone()))
        .and_then(|fields: ConferenceFields, db: Db| async move {
            Ok::<_, Infallible>(identity(db.write().await.create_conference(fields)))
        });

    let update = warp::path!("conferences" / "commands" / "update" / String)
        .and(warp::put())
        .and(warp::body::json())
        .and(with_db(db.clone()))
        .and_then(|id: String, fields: ConferenceFields, db: Db| async move {
            Ok::<_, Infallible>(identity(db.write().await.update_conference(&id, fields)))
        });

    let delete = warp::path!("conferences" / "commands" / "delete" / String)
        .and(warp::delete())
        .and(with_db(db.clone()))
        .and_then(|id: String, db: Db| async move {
            Ok::<_, Infallible>(identity(db.write().await.delete_conference(&id)))
        });

    let review = warp::path!("conferences" / "commands" / String / "reviews")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_db(db))
        .and_then(|id: String, fields: ReviewFields, db: Db| async move {
            // The review command has no result; answer 200 with an empty body.
            let response = match db.write().await.add_review(&id, fields, Utc::now()) {
                Ok(review_id) => {
                    log::info!("review {} added to {}", review_id, id);
                    warp::reply().into_response()
                }
                Err(e) => identity(Err(e)),
            };
            Ok::<_, Infallible>(response)
        });

    list.or(detail)
        .unify()
        .or(create)
        .unify()
        .or(update)
        .unify()
        .or(delete)
        .unify()
        .or(review)
        .unify()
}

fn analytics(db: Db) -> impl Filter<Extract = (Response,), Error = warp::Rejection> + Clone {
    warp::path!("analytics" / "reviews" / "window")
        .and(warp::get())
        .and(with_db(db))
        .and_then(|db: Db| async move {
            let stats = db.read().await.review_stats(Utc::now());
            Ok::<_, Infallible>(warp::reply::json(&stats).into_response())
        })
}
