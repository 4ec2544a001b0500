//! User administration flows.

use uuid::Uuid;

use crate::domain::{NewUser, User};
use crate::errors::{AppResult, OptionExt};
use crate::types::PagedResult;

use super::HandlerContext;

/// Listing, provisioning and lookup of user accounts.
pub struct UsersService<'a> {
    ctx: &'a HandlerContext,
}

impl<'a> UsersService<'a> {
    pub fn new(ctx: &'a HandlerContext) -> Self {
        Self { ctx }
    }

    pub async fn list_users(&self) -> AppResult<PagedResult<User>> {
        let users = self.ctx.uow().users().all().await?;
        Ok(PagedResult::new(users))
    }

    /// Stage the user, commit it, and return the stored row
    pub async fn add_user(&self, new_user: NewUser) -> AppResult<User> {
        let users = self.ctx.uow().users();
        let staged = users.add(new_user).await?;
        self.ctx.uow().complete().await?;

        // Timestamps are assigned at commit
        let user = users.get_by_id(staged.id).await?.ok_or_not_found()?;

        tracing::info!(user_id = %user.id, identity_id = %user.identity_id, "User created");
        Ok(user)
    }

    pub async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.ctx
            .uow()
            .users()
            .get_by_id(id)
            .await?
            .ok_or_not_found()
    }
}
