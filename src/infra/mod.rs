//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and migrations
//! - Repositories staging writes per request
//! - Unit of Work for transaction management

pub mod change_tracker;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use change_tracker::{ChangeTracker, StagedChange};
pub use db::{Database, Migrator};
pub use repositories::{
    RefreshTokenStore, RefreshTokensRepository, UserStore, UsersRepository,
};
pub use unit_of_work::{Persistence, RequestUnitOfWork, UnitOfWork, UnitOfWorkFactory};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUsersRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use unit_of_work::{MockUnitOfWork, MockUnitOfWorkFactory};
