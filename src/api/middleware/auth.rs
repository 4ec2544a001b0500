//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::Principal;
use crate::errors::AppError;

/// JWT authentication middleware.
///
/// Verifies the bearer token and injects the token subject as a
/// [`Principal`] into the request extensions. The subject is not parsed
/// here; that is the identity resolver's job.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthenticated)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthenticated)?;

    let claims = state.token_verifier.verify(token)?;

    request.extensions_mut().insert(Principal::new(claims.sub));

    Ok(next.run(request).await)
}
