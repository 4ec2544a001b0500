//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. Every flow runs against the request's
//! [`HandlerContext`] and commits through its unit of work.

mod context;
mod identity_resolver;
mod profile_service;
mod token_verifier;
mod users_service;

pub use context::HandlerContext;
pub use identity_resolver::IdentityResolver;
pub use profile_service::ProfileService;
pub use token_verifier::{Claims, JwtVerifier, TokenVerifier};
pub use users_service::UsersService;

#[cfg(any(test, feature = "test-utils"))]
pub use token_verifier::MockTokenVerifier;
