//! Track upload: metadata plus a base64 payload in a JSON body.

use axum::{
    extract::{rejection::StringRejection, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
};
use base64::{
    alphabet,
    engine::{GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    db::NewTrack,
    error::{AppError, Result},
    handlers::response::{self, CorsPolicy},
    state::AppState,
    storage,
};

pub const UPLOAD_TRACK_CORS: CorsPolicy = CorsPolicy {
    allow_methods: "POST, OPTIONS",
    allow_headers: "Content-Type, X-User-Id",
};

pub const DEFAULT_DURATION: &str = "0:00";
pub const MISSING_FIELDS: &str = "Missing required fields: title, fileData, fileName";
pub const UPLOAD_SUCCESS: &str = "Track uploaded successfully";

const OPERATION: &str = "Upload failed";

/// Standard alphabet, padding required, non-zero trailing bits tolerated.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);
const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub id: i32,
    pub title: String,
    pub duration: String,
    pub url: String,
    pub message: &'static str,
}

/// A validated upload body.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub title: String,
    pub duration: String,
    pub file_data: String,
    pub file_name: String,
}

impl UploadRequest {
    /// Parse a raw body. An empty body reads as `{}`.
    pub fn parse(body: &str) -> Result<Self> {
        let body = if body.trim().is_empty() { "{}" } else { body };
        let value: Value = serde_json::from_str(body)?;
        let fields = value.as_object().ok_or_else(|| {
            AppError::MalformedPayload("request body must be a JSON object".to_string())
        })?;

        let required = ["title", "fileData", "fileName"];
        if !required
            .iter()
            .all(|name| fields.get(*name).is_some_and(is_truthy))
        {
            return Err(AppError::Validation(MISSING_FIELDS.to_string()));
        }

        Ok(Self {
            title: text_field(fields, "title")?,
            duration: match fields.get("duration") {
                None | Some(Value::Null) => DEFAULT_DURATION.to_string(),
                Some(_) => text_field(fields, "duration")?,
            },
            file_data: text_field(fields, "fileData")?,
            file_name: text_field(fields, "fileName")?,
        })
    }

    /// The base64 part of `fileData`, with any `data:...;base64,` header
    /// stripped at the first comma.
    pub fn payload(&self) -> &str {
        match self.file_data.split_once(',') {
            Some((_, data)) => data,
            None => &self.file_data,
        }
    }

    /// Bytes outside the base64 alphabet (line breaks, spaces) are dropped
    /// before decoding.
    pub fn decode(&self) -> Result<Vec<u8>> {
        let cleaned: Vec<u8> = self
            .payload()
            .bytes()
            .filter(|b| b.is_ascii_alphanumeric() || matches!(*b, b'+' | b'/' | b'='))
            .collect();
        Ok(PAYLOAD_ENGINE.decode(cleaned)?)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn text_field(fields: &Map<String, Value>, name: &str) -> Result<String> {
    match fields.get(name) {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(AppError::MalformedPayload(format!(
            "field `{}` must be a string",
            name
        ))),
    }
}

#[tracing::instrument(skip_all, fields(user_id = tracing::field::Empty))]
pub async fn upload_track(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: std::result::Result<String, StringRejection>,
) -> Response {
    if method == Method::OPTIONS {
        return UPLOAD_TRACK_CORS.preflight();
    }
    if method != Method::POST {
        return AppError::MethodNotAllowed
            .into_failure(OPERATION)
            .into_response();
    }

    if let Some(user_id) = headers.get(USER_ID_HEADER).and_then(|v| v.to_str().ok()) {
        tracing::Span::current().record("user_id", user_id);
    }

    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            return AppError::Body(rejection.body_text())
                .into_failure(OPERATION)
                .into_response()
        }
    };

    match store_upload(&state, &body).await {
        Ok(uploaded) => {
            tracing::info!(id = uploaded.id, url = %uploaded.url, "Track uploaded");
            response::json(StatusCode::CREATED, &uploaded)
        }
        Err(e) => e.into_failure(OPERATION).into_response(),
    }
}

async fn store_upload(state: &AppState, body: &str) -> Result<UploadResponse> {
    let request = UploadRequest::parse(body)?;

    let bytes = request.decode()?;
    let file_size = i32::try_from(bytes.len())
        .map_err(|_| AppError::MalformedPayload("file is too large".to_string()))?;
    let key = storage::unique_key(&request.file_name);
    tracing::debug!(%key, file_size, "Decoded upload payload");

    let database_url = state.database_url()?;
    let file_url = state.object_store.store(&bytes, &key).await?;

    let repository = state.connect(&database_url).await?;
    let inserted = repository
        .insert_track(NewTrack {
            title: request.title.clone(),
            duration: request.duration.clone(),
            file_url: file_url.clone(),
            file_name: request.file_name,
            file_size,
        })
        .await;
    repository.close().await;

    Ok(UploadResponse {
        id: inserted?,
        title: request.title,
        duration: request.duration,
        url: file_url,
        message: UPLOAD_SUCCESS,
    })
}
