//! Refresh tokens repository scoped to a unit of work.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use super::entities::refresh_token::{self, Entity as RefreshTokenEntity};
use crate::domain::{NewRefreshToken, RefreshToken};
use crate::errors::AppResult;
use crate::infra::change_tracker::{ChangeTracker, StagedChange};

#[async_trait]
pub trait RefreshTokensRepository: Send + Sync {
    /// Stage a new refresh token
    async fn add(&self, new_token: NewRefreshToken) -> AppResult<RefreshToken>;

    /// Look a token up by its opaque value
    async fn get_by_token(&self, token: &str) -> AppResult<Option<RefreshToken>>;

    /// Stage the token as consumed. Returns `false` if it does not exist.
    async fn mark_as_used(&self, token: &RefreshToken) -> AppResult<bool>;
}

/// sea-orm backed refresh tokens repository
pub struct RefreshTokenStore {
    db: DatabaseConnection,
    tracker: Arc<ChangeTracker>,
}

impl RefreshTokenStore {
    pub fn new(db: DatabaseConnection, tracker: Arc<ChangeTracker>) -> Self {
        Self { db, tracker }
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<RefreshToken>> {
        if let Some(token) = self.tracker.find_refresh_token(|t| t.id == id) {
            return Ok(Some(token));
        }

        let result = RefreshTokenEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(RefreshToken::from))
    }
}

#[async_trait]
impl RefreshTokensRepository for RefreshTokenStore {
    async fn add(&self, new_token: NewRefreshToken) -> AppResult<RefreshToken> {
        let token = RefreshToken::new(Uuid::new_v4(), new_token);
        self.tracker.stage(StagedChange::AddRefreshToken(token.clone()));

        tracing::debug!(token_id = %token.id, identity_id = %token.identity_id, "Staged refresh token");
        Ok(token)
    }

    async fn get_by_token(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        if let Some(staged) = self.tracker.find_refresh_token(|t| t.token == token) {
            return Ok(Some(staged));
        }

        let result = RefreshTokenEntity::find()
            .filter(refresh_token::Column::Token.eq(token))
            .one(&self.db)
            .await?;

        Ok(result.map(RefreshToken::from))
    }

    async fn mark_as_used(&self, token: &RefreshToken) -> AppResult<bool> {
        let Some(mut current) = self.get_by_id(token.id).await? else {
            return Ok(false);
        };

        current.mark_used();
        self.tracker.stage(StagedChange::UpdateRefreshToken(current));
        Ok(true)
    }
}
