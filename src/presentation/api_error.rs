// Mapping of application errors onto HTTP responses
use crate::application::errors::{CatalogError, EditorError, SessionError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl From<EditorError> for ApiError {
    fn from(err: EditorError) -> Self {
        let status = match &err {
            EditorError::ItemNotFound(_) | EditorError::KpiNotFound(_) => StatusCode::NOT_FOUND,
            EditorError::AccessDenied(_) => StatusCode::FORBIDDEN,
            EditorError::UnsupportedChartKind { .. }
            | EditorError::NoSeriesData(_)
            | EditorError::OutOfBounds { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            EditorError::Collision => StatusCode::CONFLICT,
        };
        Self::new(status, err.to_string())
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Editor(inner) => inner.into(),
            SessionError::InvalidName => Self::new(StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            SessionError::LayoutNotFound(_) => Self::not_found(err.to_string()),
            SessionError::NothingPending | SessionError::NoActiveGesture => {
                Self::new(StatusCode::CONFLICT, err.to_string())
            }
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        Self::not_found(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!("Request rejected with {}: {}", self.status, self.message);
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}
