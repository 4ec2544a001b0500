//! Application state - Dependency injection container.
//!
//! Holds the long-lived collaborators. Anything request scoped, such as
//! the unit of work, is opened from here per request.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, Persistence, UnitOfWorkFactory};
use crate::services::{IdentityResolver, JwtVerifier, TokenVerifier};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Opens one unit of work per request
    pub persistence: Arc<dyn UnitOfWorkFactory>,
    /// Bearer token verification
    pub token_verifier: Arc<dyn TokenVerifier>,
    pub resolver: IdentityResolver,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire the production collaborators from configuration.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        Self {
            persistence: Arc::new(Persistence::new(database.get_connection())),
            token_verifier: Arc::new(JwtVerifier::new(config)),
            resolver: IdentityResolver::new(),
            database,
        }
    }

    /// Create application state with manually injected collaborators.
    pub fn new(
        persistence: Arc<dyn UnitOfWorkFactory>,
        token_verifier: Arc<dyn TokenVerifier>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            persistence,
            token_verifier,
            resolver: IdentityResolver::new(),
            database,
        }
    }
}
