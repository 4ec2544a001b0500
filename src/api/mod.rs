//! API layer - HTTP handlers and middleware
//!
//! - Request handlers for users and the caller's profile
//! - Bearer token middleware producing the request principal
//! - Extractors for validated bodies and the per-request context
//! - Route definitions and OpenAPI document

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
