//! Users repository scoped to a unit of work.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::entities::user::{self, Entity as UserEntity};
use crate::domain::{IdentityId, NewUser, User};
use crate::errors::AppResult;
use crate::infra::change_tracker::{ChangeTracker, StagedChange};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Users collection of a unit of work.
///
/// Mutations are staged and only reach the database when the owning
/// unit of work completes. Reads include what has been staged.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Find a user by primary key
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find the user linked to an external identity
    async fn get_by_identity_id(&self, identity_id: IdentityId) -> AppResult<Option<User>>;

    /// All users, oldest first, followed by staged additions
    async fn all(&self) -> AppResult<Vec<User>>;

    /// Stage a new active user and return it with its assigned id
    async fn add(&self, new_user: NewUser) -> AppResult<User>;

    /// Stage the profile fields of `user`.
    ///
    /// Returns `false` when the user does not exist or is not mutable.
    async fn update_user_profile(&self, user: &User) -> AppResult<bool>;
}

/// sea-orm backed users repository
pub struct UserStore {
    db: DatabaseConnection,
    tracker: Arc<ChangeTracker>,
}

impl UserStore {
    pub fn new(db: DatabaseConnection, tracker: Arc<ChangeTracker>) -> Self {
        Self { db, tracker }
    }
}

#[async_trait]
impl UsersRepository for UserStore {
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        if let Some(user) = self.tracker.find_user(|u| u.id == id) {
            return Ok(Some(user));
        }

        let result = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(User::from))
    }

    async fn get_by_identity_id(&self, identity_id: IdentityId) -> AppResult<Option<User>> {
        if let Some(user) = self.tracker.find_user(|u| u.identity_id == identity_id) {
            return Ok(Some(user));
        }

        let result = UserEntity::find()
            .filter(user::Column::IdentityId.eq(identity_id.as_uuid()))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn all(&self) -> AppResult<Vec<User>> {
        let stored = UserEntity::find()
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(User::from)
            .collect();

        Ok(self.tracker.merge_users(stored))
    }

    async fn add(&self, new_user: NewUser) -> AppResult<User> {
        let user = User::new(Uuid::new_v4(), new_user);
        self.tracker.stage(StagedChange::AddUser(user.clone()));

        tracing::debug!(user_id = %user.id, "Staged new user");
        Ok(user)
    }

    async fn update_user_profile(&self, user: &User) -> AppResult<bool> {
        let Some(mut current) = self.get_by_id(user.id).await? else {
            return Ok(false);
        };
        if !current.is_mutable() {
            tracing::debug!(user_id = %user.id, "Profile update refused for inactive user");
            return Ok(false);
        }

        // Only the profile fields travel; everything else stays as stored
        current.address = user.address.clone();
        current.sex = user.sex.clone();
        current.mobile_number = user.mobile_number.clone();
        current.country = user.country.clone();
        current.updated_at = Utc::now();

        self.tracker.stage(StagedChange::UpdateUserProfile(current));
        Ok(true)
    }
}
