use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lostbox_core::LifecycleError;
use serde_json::json;
use thiserror::Error;

/// Fatal server-level failures (startup, config, I/O).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// A request-level error carrying an HTTP status and a stable reason
/// string. The reason is returned verbatim as `{"error": reason}`;
/// nothing internal leaks past this type.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub reason: String,
}

impl ApiError {
    pub fn not_found(reason: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            reason: reason.into(),
        }
    }

    pub fn bad_request(reason: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            reason: reason.into(),
        }
    }
}

impl From<LifecycleError> for ApiError {
    fn from(err: LifecycleError) -> Self {
        let status = match &err {
            LifecycleError::ListNotFound
            | LifecycleError::ItemNotFound
            | LifecycleError::ImageNotFound => StatusCode::NOT_FOUND,
            LifecycleError::Validation(_) | LifecycleError::NotDeleted => StatusCode::BAD_REQUEST,
            LifecycleError::Store(inner) => {
                tracing::error!(error = %inner, "store failure while handling request");
                return Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    reason: "Internal Server Error".to_string(),
                };
            }
        };
        Self {
            status,
            reason: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.reason }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lostbox_core::ValidationError;

    #[test]
    fn lifecycle_errors_map_to_statuses() {
        let e: ApiError = LifecycleError::ListNotFound.into();
        assert_eq!(e.status, StatusCode::NOT_FOUND);
        assert_eq!(e.reason, "List not found");

        let e: ApiError = LifecycleError::NotDeleted.into();
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        assert_eq!(e.reason, "Item is not deleted");

        let e: ApiError = LifecycleError::Validation(ValidationError::EmptyName).into();
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_failures_stay_generic() {
        let inner = lostbox_store::StoreError::Backend("connection refused".into());
        let e: ApiError = LifecycleError::Store(inner).into();
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.reason, "Internal Server Error");
        assert!(!e.reason.contains("connection"));
    }
}
