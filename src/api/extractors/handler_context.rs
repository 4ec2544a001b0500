//! Per-request [`HandlerContext`] extractor.

use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::api::AppState;
use crate::domain::Principal;
use crate::services::HandlerContext;

/// Opens a fresh unit of work and picks up the principal left by the
/// authentication middleware, if any.
#[async_trait]
impl FromRequestParts<AppState> for HandlerContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = parts.extensions.get::<Principal>().cloned();

        Ok(HandlerContext::new(
            state.persistence.begin(),
            state.resolver,
            principal,
        ))
    }
}
