use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::handlers::response;

pub const CONFIGURATION_MISSING: &str = "Database configuration missing";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Decode(#[from] base64::DecodeError),

    #[error(transparent)]
    Payload(#[from] serde_json::Error),

    #[error("{0}")]
    MalformedPayload(String),

    #[error("{0}")]
    Body(String),

    #[error("Object storage error: {0}")]
    Storage(String),
}

/// Coarse error buckets surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Method,
    Configuration,
    Validation,
    Persistence,
}

impl AppError {
    pub fn configuration_missing() -> Self {
        Self::Configuration(CONFIGURATION_MISSING.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MethodNotAllowed => ErrorKind::Method,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Database(_)
            | Self::Decode(_)
            | Self::Payload(_)
            | Self::MalformedPayload(_)
            | Self::Body(_)
            | Self::Storage(_) => ErrorKind::Persistence,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Method => StatusCode::METHOD_NOT_ALLOWED,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Configuration | ErrorKind::Persistence => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Attach the handler's operation label; persistence failures are
    /// reported as `"<operation>: <message>"`.
    pub fn into_failure(self, operation: &'static str) -> Failure {
        Failure {
            operation,
            error: self,
        }
    }
}

/// The single error boundary of a handler.
#[derive(Debug)]
pub struct Failure {
    operation: &'static str,
    error: AppError,
}

impl Failure {
    pub fn message(&self) -> String {
        match self.error.kind() {
            ErrorKind::Persistence => format!("{}: {}", self.operation, self.error),
            _ => self.error.to_string(),
        }
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let status = self.error.status();
        let message = self.message();

        // Raw lower-layer text reaches the client here; see DESIGN.md.
        match self.error.kind() {
            ErrorKind::Persistence | ErrorKind::Configuration => {
                tracing::error!(operation = self.operation, "{}", message);
            }
            _ => tracing::debug!(operation = self.operation, "{}", message),
        }

        response::json(status, &json!({ "error": message }))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persistence_errors_carry_the_operation_prefix() {
        let failure = AppError::Database(sea_orm::DbErr::Custom("relation missing".into()))
            .into_failure("Failed to fetch tracks");
        assert_eq!(
            failure.message(),
            "Failed to fetch tracks: Custom Error: relation missing"
        );
    }

    #[test]
    fn other_kinds_keep_their_bare_message() {
        let failure = AppError::configuration_missing().into_failure("Upload failed");
        assert_eq!(failure.message(), CONFIGURATION_MISSING);

        let failure = AppError::MethodNotAllowed.into_failure("Upload failed");
        assert_eq!(failure.message(), "Method not allowed");
    }

    #[test]
    fn statuses_follow_kind() {
        assert_eq!(AppError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            AppError::Validation("nope".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Storage("down".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(AppError::Storage("down".into()).kind(), ErrorKind::Persistence);
    }
}
