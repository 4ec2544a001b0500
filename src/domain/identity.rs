//! External identity types.
//!
//! The identity provider hands us an opaque subject string. It only becomes
//! an [`IdentityId`] after an explicit, fallible parse.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Key linking a profile to an externally managed authentication identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityId(Uuid);

impl IdentityId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Fresh identity for profiles provisioned without a linked login
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse the identity provider's subject into the store's key type.
    pub fn parse(raw: &str) -> AppResult<Self> {
        raw.parse()
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl FromStr for IdentityId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| AppError::invalid_identity(s))
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for IdentityId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Authenticated principal as supplied by the authentication middleware.
///
/// `identity_id` is the raw token subject and has not been validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub identity_id: String,
}

impl Principal {
    pub fn new(identity_id: impl Into<String>) -> Self {
        Self {
            identity_id: identity_id.into(),
        }
    }
}
