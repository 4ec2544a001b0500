//! Handlers for the caller's own profile.

use axum::{routing::get, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{ProfileUpdate, User};
use crate::errors::AppResult;
use crate::services::{HandlerContext, ProfileService};
use crate::types::ApiResponse;

/// Self-service profile fields. All four are required.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "Address is required"))]
    #[schema(example = "12 Main St")]
    pub address: String,
    #[validate(length(min = 1, message = "Sex is required"))]
    #[schema(example = "F")]
    pub sex: String,
    #[validate(length(min = 1, message = "Mobile number is required"))]
    #[schema(example = "555")]
    pub mobile_number: String,
    #[validate(length(min = 1, message = "Country is required"))]
    #[schema(example = "US")]
    pub country: String,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(request: UpdateProfileRequest) -> Self {
        ProfileUpdate {
            address: request.address,
            sex: request.sex,
            mobile_number: request.mobile_number,
            country: request.country,
        }
    }
}

/// Create profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/", get(get_profile).put(update_profile))
}

/// Get the authenticated caller's profile
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    tag = "Profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's profile", body = UserEnvelope),
        (status = 400, description = "Malformed identity", body = ErrorEnvelope),
        (status = 401, description = "Not authenticated", body = ErrorEnvelope),
        (status = 404, description = "No profile linked to the identity", body = ErrorEnvelope)
    )
)]
pub async fn get_profile(ctx: HandlerContext) -> AppResult<ApiResponse<User>> {
    let user = ProfileService::new(&ctx).get_profile().await?;
    Ok(ApiResponse::success(user))
}

/// Update address, sex, mobile number and country of the caller
#[utoipa::path(
    put,
    path = "/api/v1/profile",
    tag = "Profile",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserEnvelope),
        (status = 400, description = "Validation error or update rejected", body = ErrorEnvelope),
        (status = 401, description = "Not authenticated", body = ErrorEnvelope),
        (status = 404, description = "No profile linked to the identity", body = ErrorEnvelope),
        (status = 500, description = "Commit failed", body = ErrorEnvelope)
    )
)]
pub async fn update_profile(
    ctx: HandlerContext,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<ApiResponse<User>> {
    let user = ProfileService::new(&ctx)
        .update_profile(payload.into())
        .await?;
    Ok(ApiResponse::success(user))
}
