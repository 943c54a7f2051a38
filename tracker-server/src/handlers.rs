use std::convert::Infallible;

use serde::{Deserialize, Serialize};
use tracker_core::{IngestRequest, NoteUpdate, TrackerError};
use warp::{Reply, http::StatusCode, reply::Response};

use crate::SharedTracker;

#[derive(Debug, Deserialize)]
pub struct NotesQuery {
    pub notes: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Deleted {
    pub deleted: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

pub async fn ingest(
    request: IngestRequest,
    tracker: SharedTracker,
) -> Result<Response, Infallible> {
    let mut tracker = tracker.lock().await;

    Ok(match tracker.add(&request).await {
        Ok(obs) => {
            tracing::info!(id = obs.id, city = %obs.city, "Ingested observation");
            json_response(&obs, StatusCode::CREATED)
        }
        Err(e) => error_response(e),
    })
}

pub async fn list(tracker: SharedTracker) -> Result<Response, Infallible> {
    let tracker = tracker.lock().await;

    Ok(match tracker.list() {
        Ok(observations) => json_response(&observations, StatusCode::OK),
        Err(e) => error_response(e),
    })
}

pub async fn get(id: i64, tracker: SharedTracker) -> Result<Response, Infallible> {
    let tracker = tracker.lock().await;

    Ok(match tracker.get(id) {
        Ok(obs) => json_response(&obs, StatusCode::OK),
        Err(e) => error_response(e),
    })
}

pub async fn update(
    id: i64,
    query: NotesQuery,
    tracker: SharedTracker,
) -> Result<Response, Infallible> {
    let mut tracker = tracker.lock().await;

    Ok(match tracker.update_note(id, &query.notes) {
        Ok(obs) => json_response(&NoteUpdate { id: obs.id, notes: query.notes }, StatusCode::OK),
        Err(e) => error_response(e),
    })
}

pub async fn delete(id: i64, tracker: SharedTracker) -> Result<Response, Infallible> {
    let mut tracker = tracker.lock().await;

    Ok(match tracker.delete(id) {
        Ok(()) => json_response(&Deleted { deleted: id }, StatusCode::OK),
        Err(e) => error_response(e),
    })
}

fn json_response<T: Serialize>(body: &T, status: StatusCode) -> Response {
    warp::reply::with_status(warp::reply::json(body), status).into_response()
}

fn error_response(err: TrackerError) -> Response {
    let status = if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        tracing::error!("Request failed: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    };

    json_response(&ErrorBody { detail: err.to_string() }, status)
}
