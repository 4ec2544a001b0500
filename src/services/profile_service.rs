//! Self-service profile flows of the authenticated caller.

use crate::domain::{ProfileUpdate, User};
use crate::errors::{AppError, AppResult, OptionExt};

use super::HandlerContext;

pub struct ProfileService<'a> {
    ctx: &'a HandlerContext,
}

impl<'a> ProfileService<'a> {
    pub fn new(ctx: &'a HandlerContext) -> Self {
        Self { ctx }
    }

    pub async fn get_profile(&self) -> AppResult<User> {
        self.ctx.current_user().await
    }

    /// Apply the four self-service fields and commit.
    ///
    /// Input is validated by the caller; nothing here runs for a request
    /// whose principal does not resolve.
    pub async fn update_profile(&self, update: ProfileUpdate) -> AppResult<User> {
        let mut user = self.ctx.current_user().await?;
        user.apply_profile(update);

        let users = self.ctx.uow().users();
        if !users.update_user_profile(&user).await? {
            tracing::warn!(user_id = %user.id, "Profile update rejected");
            return Err(AppError::UpdateRejected);
        }
        let updated = users.get_by_id(user.id).await?.ok_or_not_found()?;

        self.ctx.uow().complete().await?;

        tracing::info!(user_id = %updated.id, "Profile updated");
        Ok(updated)
    }
}
