//! Unit of Work pattern implementation.
//!
//! One unit of work is opened per request. Its repositories stage
//! mutations in a shared [`ChangeTracker`]; [`UnitOfWork::complete`]
//! applies all of them in a single database transaction. Nothing staged
//! is visible outside the unit of work until then, and dropping it
//! without completing discards the staged work.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    AccessMode, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    IsolationLevel, QueryFilter, TransactionTrait,
};

use super::change_tracker::{ChangeTracker, StagedChange};
use super::repositories::entities::{refresh_token, user};
use super::repositories::{
    RefreshTokenStore, RefreshTokensRepository, UserStore, UsersRepository,
};
use crate::config::STATUS_ACTIVE;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Request-scoped set of repositories committed as one.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Users repository. Every call returns the same instance.
    fn users(&self) -> Arc<dyn UsersRepository>;

    /// Refresh tokens repository. Every call returns the same instance.
    fn refresh_tokens(&self) -> Arc<dyn RefreshTokensRepository>;

    /// Persist everything staged since the last completion.
    ///
    /// Returns the number of rows written. On failure nothing is
    /// persisted and [`AppError::Persistence`] is returned.
    async fn complete(&self) -> AppResult<u64>;
}

/// Opens units of work. Shared across requests.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait UnitOfWorkFactory: Send + Sync {
    fn begin(&self) -> Box<dyn UnitOfWork>;
}

/// sea-orm backed factory
#[derive(Clone)]
pub struct Persistence {
    db: DatabaseConnection,
    isolation: IsolationLevel,
}

impl Persistence {
    /// Commits run with ReadCommitted isolation
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            isolation: IsolationLevel::ReadCommitted,
        }
    }
}

impl UnitOfWorkFactory for Persistence {
    fn begin(&self) -> Box<dyn UnitOfWork> {
        Box::new(RequestUnitOfWork::new(self.db.clone(), self.isolation))
    }
}

/// Concrete unit of work handed out by [`Persistence`]
pub struct RequestUnitOfWork {
    db: DatabaseConnection,
    isolation: IsolationLevel,
    tracker: Arc<ChangeTracker>,
    users: Arc<UserStore>,
    refresh_tokens: Arc<RefreshTokenStore>,
}

impl RequestUnitOfWork {
    pub fn new(db: DatabaseConnection, isolation: IsolationLevel) -> Self {
        let tracker = Arc::new(ChangeTracker::new());
        let users = Arc::new(UserStore::new(db.clone(), tracker.clone()));
        let refresh_tokens = Arc::new(RefreshTokenStore::new(db.clone(), tracker.clone()));

        Self {
            db,
            isolation,
            tracker,
            users,
            refresh_tokens,
        }
    }
}

#[async_trait]
impl UnitOfWork for RequestUnitOfWork {
    fn users(&self) -> Arc<dyn UsersRepository> {
        self.users.clone()
    }

    fn refresh_tokens(&self) -> Arc<dyn RefreshTokensRepository> {
        self.refresh_tokens.clone()
    }

    async fn complete(&self) -> AppResult<u64> {
        let changes = self.tracker.take();
        if changes.is_empty() {
            return Ok(0);
        }
        let staged = changes.len();

        let txn = self
            .db
            .begin_with_config(Some(self.isolation), Some(AccessMode::ReadWrite))
            .await?;

        let mut written = 0;
        for change in changes {
            match apply(&txn, change).await {
                Ok(rows) => written += rows,
                Err(e) => {
                    if let Err(rollback_err) = txn.rollback().await {
                        tracing::error!("Transaction rollback failed: {}", rollback_err);
                    }
                    tracing::warn!(error = %e, staged, "Unit of work rolled back");
                    return Err(AppError::Persistence(e));
                }
            }
        }

        txn.commit().await?;

        tracing::debug!(staged, written, "Unit of work committed");
        Ok(written)
    }
}

/// Write one staged change inside `txn`
async fn apply(txn: &DatabaseTransaction, change: StagedChange) -> Result<u64, DbErr> {
    match change {
        StagedChange::AddUser(mut added) => {
            // Listing order follows commit order, not staging order
            added.created_at = Utc::now();
            added.updated_at = added.created_at;
            let model: user::ActiveModel = added.into();
            user::Entity::insert(model).exec_without_returning(txn).await
        }
        StagedChange::UpdateUserProfile(updated) => {
            let result = user::Entity::update_many()
                .col_expr(user::Column::Address, Expr::value(updated.address))
                .col_expr(user::Column::Sex, Expr::value(updated.sex))
                .col_expr(user::Column::MobileNumber, Expr::value(updated.mobile_number))
                .col_expr(user::Column::Country, Expr::value(updated.country))
                .col_expr(user::Column::UpdatedAt, Expr::value(updated.updated_at))
                .filter(user::Column::Id.eq(updated.id))
                .filter(user::Column::Status.eq(STATUS_ACTIVE))
                .exec(txn)
                .await?;
            ensure_written(result.rows_affected)
        }
        StagedChange::AddRefreshToken(added) => {
            let model: refresh_token::ActiveModel = added.into();
            refresh_token::Entity::insert(model)
                .exec_without_returning(txn)
                .await
        }
        StagedChange::UpdateRefreshToken(updated) => {
            let result = refresh_token::Entity::update_many()
                .col_expr(refresh_token::Column::IsUsed, Expr::value(updated.is_used))
                .col_expr(refresh_token::Column::IsRevoked, Expr::value(updated.is_revoked))
                .col_expr(refresh_token::Column::UpdatedAt, Expr::value(updated.updated_at))
                .filter(refresh_token::Column::Id.eq(updated.id))
                .exec(txn)
                .await?;
            ensure_written(result.rows_affected)
        }
    }
}

/// The row changed or went away between staging and commit
fn ensure_written(rows_affected: u64) -> Result<u64, DbErr> {
    if rows_affected == 0 {
        return Err(DbErr::RecordNotUpdated);
    }
    Ok(rows_affected)
}

