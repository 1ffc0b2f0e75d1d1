pub mod health;
pub mod response;
pub mod tracks;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{any, get},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Both endpoints accept every verb and run their own method gate.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/get-tracks", any(tracks::list_tracks))
        .route("/upload-track", any(upload::upload_track))
}

pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
