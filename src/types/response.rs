//! Uniform result envelope shared by every endpoint.
//!
//! A response body is either `{"content": ...}` or
//! `{"error": {"code", "message", "type"}}`, never both.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard API response wrapper.
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiResponse<T: Serialize> {
    Content(T),
    Error(ErrorBody),
}

/// Structured error carried by the envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// HTTP-class status code
    #[schema(example = 404)]
    pub code: u16,
    /// Human readable message
    #[schema(example = "User not found")]
    pub message: String,
    /// Error category
    #[serde(rename = "type")]
    #[schema(example = "Not Found")]
    pub kind: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(content: T) -> Self {
        ApiResponse::Content(content)
    }

    pub fn error(code: u16, message: impl Into<String>, kind: impl Into<String>) -> Self {
        ApiResponse::Error(ErrorBody {
            code,
            message: message.into(),
            kind: kind.into(),
        })
    }

    pub fn content(&self) -> Option<&T> {
        match self {
            ApiResponse::Content(content) => Some(content),
            ApiResponse::Error(_) => None,
        }
    }

    pub fn error_body(&self) -> Option<&ErrorBody> {
        match self {
            ApiResponse::Content(_) => None,
            ApiResponse::Error(body) => Some(body),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiResponse::Content(_) => StatusCode::OK,
            ApiResponse::Error(body) => {
                StatusCode::from_u16(body.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        };

        (status, Json(self)).into_response()
    }
}

/// Listing envelope: the content plus the number of items returned
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T: Serialize> {
    pub content: Vec<T>,
    pub result_count: usize,
}

impl<T: Serialize> PagedResult<T> {
    pub fn new(content: Vec<T>) -> Self {
        Self {
            result_count: content.len(),
            content,
        }
    }
}

/// Created response helper: 201 with a `Location` header and enveloped body
pub struct Created<T: Serialize> {
    pub location: String,
    pub content: T,
}

impl<T: Serialize> Created<T> {
    pub fn new(location: impl Into<String>, content: T) -> Self {
        Self {
            location: location.into(),
            content,
        }
    }
}

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (
            StatusCode::CREATED,
            [(header::LOCATION, self.location)],
            Json(ApiResponse::success(self.content)),
        )
            .into_response()
    }
}
