//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use serde::Serialize;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use crate::api::handlers::{profile_handler, users_handler};
use crate::domain::User;
use crate::types::ErrorBody;

/// OpenAPI documentation for the Profile API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Profile API",
        version = "0.1.0",
        description = "User accounts and self-service profiles behind bearer authentication"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        users_handler::list_users,
        users_handler::add_user,
        users_handler::get_user,
        profile_handler::get_profile,
        profile_handler::update_profile,
    ),
    components(
        schemas(
            User,
            ErrorBody,
            UserEnvelope,
            UserListEnvelope,
            ErrorEnvelope,
            users_handler::AddUserRequest,
            profile_handler::UpdateProfileRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "User administration"),
        (name = "Profile", description = "The authenticated caller's profile")
    )
)]
pub struct ApiDoc;

/// `{"content": User}` body of single-user responses
#[derive(Serialize, ToSchema)]
pub struct UserEnvelope {
    pub content: User,
}

/// `{"content": [User], "resultCount": n}` body of the users listing
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserListEnvelope {
    pub content: Vec<User>,
    #[schema(example = 1)]
    pub result_count: usize,
}

/// `{"error": {...}}` body of every failed request
#[derive(Serialize, ToSchema)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token issued by the identity provider"))
                        .build(),
                ),
            );
        }
    }
}
