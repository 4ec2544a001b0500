//! Per-request collaborators shared by every flow.

use crate::domain::{Principal, User};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

use super::IdentityResolver;

/// Unit of work, resolver and principal of a single request.
///
/// Built fresh for every request and dropped with it, which discards
/// anything staged but not completed.
pub struct HandlerContext {
    uow: Box<dyn UnitOfWork>,
    resolver: IdentityResolver,
    principal: Option<Principal>,
}

impl HandlerContext {
    pub fn new(
        uow: Box<dyn UnitOfWork>,
        resolver: IdentityResolver,
        principal: Option<Principal>,
    ) -> Self {
        Self {
            uow,
            resolver,
            principal,
        }
    }

    pub fn uow(&self) -> &dyn UnitOfWork {
        self.uow.as_ref()
    }

    /// Profile of the caller
    pub async fn current_user(&self) -> AppResult<User> {
        let users = self.uow.users();
        self.resolver
            .resolve(self.principal.as_ref(), users.as_ref())
            .await
    }
}
