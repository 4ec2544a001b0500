//! Profile API - user accounts and self-service profiles
//!
//! Every request runs against its own unit of work: repositories stage
//! changes, a single `complete` commits them atomically, and every
//! response is wrapped in the `{content}` / `{error}` envelope.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Users, refresh tokens and identity types
//! - **services**: Identity resolution and request flows
//! - **infra**: Database, repositories and the unit of work
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Result envelope
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! profile-api serve --port 3000
//!
//! # Run migrations
//! profile-api migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{IdentityId, Principal, User};
pub use errors::{AppError, AppResult};
