//! Maps an authenticated principal to its profile.

use crate::domain::{IdentityId, Principal, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UsersRepository;

/// Resolves the caller's [`User`] from the request principal.
///
/// Read-only: a principal without a profile is reported, never provisioned.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver;

impl IdentityResolver {
    pub fn new() -> Self {
        Self
    }

    /// Missing principal and malformed subjects fail before the store is hit.
    pub async fn resolve(
        &self,
        principal: Option<&Principal>,
        users: &dyn UsersRepository,
    ) -> AppResult<User> {
        let principal = principal.ok_or_else(|| {
            tracing::warn!("Request reached a profile flow without a principal");
            AppError::Unauthenticated
        })?;

        let identity_id = IdentityId::parse(&principal.identity_id).inspect_err(|_| {
            tracing::warn!(subject = %principal.identity_id, "Malformed identity subject");
        })?;

        users
            .get_by_identity_id(identity_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(%identity_id, "No profile linked to identity");
                AppError::ProfileNotFound
            })
    }
}
