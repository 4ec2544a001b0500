//! User administration handlers.

use axum::{extract::Path, response::Json, routing::get, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::API_PREFIX;
use crate::domain::{IdentityId, NewUser, User};
use crate::errors::{AppError, AppResult};
use crate::services::{HandlerContext, UsersService};
use crate::types::{ApiResponse, Created, PagedResult};

/// Account provisioning request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddUserRequest {
    /// Identity to link; a fresh one is generated when omitted
    pub identity_id: Option<Uuid>,
    #[validate(length(min = 1, message = "First name is required"))]
    #[schema(example = "Ada")]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ada@x.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    #[schema(example = "123")]
    pub phone: String,
    /// Calendar date, `YYYY-MM-DD`
    #[schema(example = "1815-12-10")]
    pub date_of_birth: NaiveDate,
    #[validate(length(min = 1, message = "Country is required"))]
    #[schema(example = "UK")]
    pub country: String,
}

impl From<AddUserRequest> for NewUser {
    fn from(request: AddUserRequest) -> Self {
        NewUser {
            identity_id: request
                .identity_id
                .map(IdentityId::new)
                .unwrap_or_else(IdentityId::generate),
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
            date_of_birth: request.date_of_birth,
            country: request.country,
        }
    }
}

/// Create user routes
pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(add_user))
        .route("/:id", get(get_user))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users with their count", body = UserListEnvelope),
        (status = 401, description = "Not authenticated", body = ErrorEnvelope)
    )
)]
pub async fn list_users(ctx: HandlerContext) -> AppResult<Json<PagedResult<User>>> {
    let page = UsersService::new(&ctx).list_users().await?;
    Ok(Json(page))
}

/// Provision a new active user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = AddUserRequest,
    responses(
        (status = 201, description = "User created", body = UserEnvelope),
        (status = 400, description = "Validation error", body = ErrorEnvelope),
        (status = 500, description = "Commit failed", body = ErrorEnvelope)
    )
)]
pub async fn add_user(
    ctx: HandlerContext,
    ValidatedJson(payload): ValidatedJson<AddUserRequest>,
) -> AppResult<Created<User>> {
    let user = UsersService::new(&ctx).add_user(payload.into()).await?;
    let location = format!("{}/users/{}", API_PREFIX, user.id);

    Ok(Created::new(location, user))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserEnvelope),
        (status = 404, description = "Object not found", body = ErrorEnvelope)
    )
)]
pub async fn get_user(ctx: HandlerContext, Path(id): Path<String>) -> AppResult<ApiResponse<User>> {
    // A malformed id cannot name an existing user
    let id = Uuid::parse_str(&id).map_err(|_| AppError::NotFound)?;

    let user = UsersService::new(&ctx).get_user(id).await?;
    Ok(ApiResponse::success(user))
}
