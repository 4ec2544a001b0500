//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod identity;
pub mod refresh_token;
pub mod user;

pub use identity::{IdentityId, Principal};
pub use refresh_token::{NewRefreshToken, RefreshToken};
pub use user::{NewUser, ProfileUpdate, User, UserStatus};
