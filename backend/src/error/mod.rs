use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::models::status::StatusView;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusView>,
}

/// Rejections surfaced to the HTTP boundary.
///
/// Every client-facing variant carries the `StatusView` observed at
/// rejection time so the client can reconcile its display without a second
/// round trip. Store failures collapse into `Internal`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Conflict(String, StatusView),
    #[error("{0}")]
    NotFound(String, StatusView),
    #[error("{0}")]
    BadRequest(String, StatusView),
    #[error("{0}")]
    Forbidden(String, StatusView),
    #[error("{0}")]
    Unauthorized(String, StatusView),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, message, view) = match self {
            AppError::Conflict(msg, view) => (StatusCode::CONFLICT, msg, Some(view)),
            AppError::NotFound(msg, view) => (StatusCode::NOT_FOUND, msg, Some(view)),
            AppError::BadRequest(msg, view) => (StatusCode::BAD_REQUEST, msg, Some(view)),
            AppError::Forbidden(msg, view) => (StatusCode::FORBIDDEN, msg, Some(view)),
            AppError::Unauthorized(msg, view) => (StatusCode::UNAUTHORIZED, msg, Some(view)),
            AppError::Internal(err) => {
                tracing::error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: message,
            status: view,
        });

        (status_code, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Internal(err.into())
    }
}
