//! Repository layer - Data access abstraction
//!
//! Repositories are handed out by a unit of work and share its change
//! tracker, so their writes commit or roll back together.

pub(crate) mod entities;
mod refresh_tokens_repository;
mod users_repository;

pub use refresh_tokens_repository::{RefreshTokenStore, RefreshTokensRepository};
pub use users_repository::{UserStore, UsersRepository};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use users_repository::MockUsersRepository;
