//! Response shapes shared by the track endpoints.
//!
//! Every response carries `Access-Control-Allow-Origin: *`. JSON responses
//! also carry `Content-Type: application/json`; preflight responses are
//! empty and list what the endpoint accepts.

use axum::{
    body::Body,
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE,
        },
        StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub const PREFLIGHT_MAX_AGE: &str = "86400";

pub fn json<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (status, [(ACCESS_CONTROL_ALLOW_ORIGIN, "*")], Json(body)).into_response()
}

/// What an endpoint advertises to a CORS preflight.
// Not `CorsLayer`: a bare OPTIONS without `Access-Control-Request-Method`
// must still get the preflight response.
#[derive(Debug, Clone, Copy)]
pub struct CorsPolicy {
    pub allow_methods: &'static str,
    pub allow_headers: &'static str,
}

impl CorsPolicy {
    pub fn preflight(&self) -> Response {
        (
            StatusCode::OK,
            [
                (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
                (ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods),
                (ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers),
                (ACCESS_CONTROL_MAX_AGE, PREFLIGHT_MAX_AGE),
            ],
            Body::empty(),
        )
            .into_response()
    }
}
