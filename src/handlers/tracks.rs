use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

use crate::{
    db::TrackSummary,
    error::{AppError, Result},
    handlers::response::{self, CorsPolicy},
    state::AppState,
};

pub const LIST_TRACKS_CORS: CorsPolicy = CorsPolicy {
    allow_methods: "GET, OPTIONS",
    allow_headers: "Content-Type",
};

const OPERATION: &str = "Failed to fetch tracks";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackResponse {
    pub id: i32,
    pub title: String,
    pub artist: Option<String>,
    pub duration: String,
    pub url: String,
    pub created_at: Option<String>,
}

impl From<TrackSummary> for TrackResponse {
    fn from(track: TrackSummary) -> Self {
        Self {
            id: track.id,
            title: track.title,
            artist: track.artist,
            duration: track.duration,
            url: track.file_url,
            created_at: track.created_at.map(iso8601),
        }
    }
}

/// ISO-8601 with microseconds only when the timestamp has a fraction.
fn iso8601(dt: NaiveDateTime) -> String {
    if dt.nanosecond() == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct TrackListResponse {
    pub tracks: Vec<TrackResponse>,
}

#[tracing::instrument(skip(state))]
pub async fn list_tracks(State(state): State<AppState>, method: Method) -> Response {
    if method == Method::OPTIONS {
        return LIST_TRACKS_CORS.preflight();
    }
    if method != Method::GET {
        return AppError::MethodNotAllowed
            .into_failure(OPERATION)
            .into_response();
    }

    match fetch_tracks(&state).await {
        Ok(tracks) => {
            tracing::debug!(count = tracks.len(), "Listed tracks");
            response::json(StatusCode::OK, &TrackListResponse { tracks })
        }
        Err(e) => e.into_failure(OPERATION).into_response(),
    }
}

async fn fetch_tracks(state: &AppState) -> Result<Vec<TrackResponse>> {
    let database_url = state.database_url()?;
    let repository = state.connect(&database_url).await?;

    let listed = repository.list_tracks().await;
    repository.close().await;

    Ok(listed?.into_iter().map(TrackResponse::from).collect())
}
