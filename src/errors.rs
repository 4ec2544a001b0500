//! Centralized error handling.
//!
//! Every failure a request can end in is a variant of [`AppError`].
//! Converting one into a response renders the error envelope.

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::config::{
    MSG_OBJECT_NOT_FOUND, MSG_TRY_AGAIN_LATER, MSG_UNABLE_TO_PROCESS, MSG_USER_NOT_FOUND,
};
use crate::types::ApiResponse;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Principal resolution
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),

    #[error("No profile is linked to this identity")]
    ProfileNotFound,

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    // Input
    #[error("{0}")]
    Validation(String),

    // Mutation
    #[error("Update rejected")]
    UpdateRejected,

    #[error("Persistence failure")]
    Persistence(#[from] sea_orm::DbErr),

    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Status code carried both by the HTTP response and the envelope
    pub fn code(&self) -> u16 {
        match self {
            AppError::Unauthenticated | AppError::Jwt(_) => 401,
            AppError::InvalidIdentity(_) | AppError::Validation(_) | AppError::UpdateRejected => {
                400
            }
            AppError::ProfileNotFound | AppError::NotFound => 404,
            AppError::Persistence(_) | AppError::Internal(_) => 500,
        }
    }

    /// Error category reported in the envelope's `type` field
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Unauthenticated | AppError::Jwt(_) => "Unauthorized",
            AppError::InvalidIdentity(_) | AppError::UpdateRejected => "Bad Request",
            AppError::ProfileNotFound | AppError::NotFound => "Not Found",
            AppError::Validation(_) => "Validation Error",
            AppError::Persistence(_) => "Persistence Failure",
            AppError::Internal(_) => "Internal Server Error",
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::InvalidIdentity(_) => "Invalid identity".to_string(),
            AppError::ProfileNotFound => MSG_USER_NOT_FOUND.to_string(),
            AppError::NotFound => MSG_OBJECT_NOT_FOUND.to_string(),
            AppError::UpdateRejected => MSG_TRY_AGAIN_LATER.to_string(),

            AppError::Persistence(e) => {
                tracing::error!("Persistence failure: {:?}", e);
                MSG_UNABLE_TO_PROCESS.to_string()
            }
            AppError::Jwt(e) => {
                tracing::debug!("JWT rejected: {:?}", e);
                "Invalid or expired token".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }

    /// Render as the error envelope
    pub fn to_envelope(&self) -> ApiResponse<()> {
        ApiResponse::error(self.code(), self.user_message(), self.kind())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_envelope().into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn invalid_identity(raw: impl Into<String>) -> Self {
        AppError::InvalidIdentity(raw.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
