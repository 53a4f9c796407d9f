use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::store::StoreError;
use crate::views::ViewError;

#[derive(Debug)]
pub enum AppError {
    /// A required field was missing or malformed; nothing was persisted.
    Validation(&'static str),
    /// The target is not visible to the caller. Hidden and nonexistent
    /// resources are deliberately indistinguishable.
    NotFound,
    /// The operation would violate an ownership invariant; nothing was
    /// mutated.
    Conflict(&'static str),
    Store(StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

impl From<ViewError> for AppError {
    fn from(e: ViewError) -> Self {
        AppError::Validation(e.0)
    }
}
