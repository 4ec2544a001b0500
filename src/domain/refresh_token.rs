//! Refresh token record.
//!
//! Issuance and rotation policy belong to the identity provider; the record
//! only has to commit in the same unit of work as user changes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::IdentityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshToken {
    pub id: Uuid,
    pub identity_id: IdentityId,
    #[serde(skip_serializing)]
    pub token: String,
    /// Id of the access token this refresh token was issued with
    pub jwt_id: String,
    pub is_used: bool,
    pub is_revoked: bool,
    pub expiry_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RefreshToken {
    pub fn new(id: Uuid, new_token: NewRefreshToken) -> Self {
        let now = Utc::now();
        Self {
            id,
            identity_id: new_token.identity_id,
            token: new_token.token,
            jwt_id: new_token.jwt_id,
            is_used: false,
            is_revoked: false,
            expiry_date: new_token.expiry_date,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date <= now
    }

    /// A token can be exchanged once, before expiry, unless revoked
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        !self.is_used && !self.is_revoked && !self.is_expired(now)
    }

    pub fn mark_used(&mut self) {
        self.is_used = true;
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRefreshToken {
    pub identity_id: IdentityId,
    pub token: String,
    pub jwt_id: String,
    pub expiry_date: DateTime<Utc>,
}
