//! Pending mutations of one unit of work.
//!
//! Repositories stage writes here instead of touching the database. The
//! owning unit of work drains the tracker and applies everything inside a
//! single transaction. Reads consult the tracker first, so a request sees
//! its own uncommitted changes and nobody else does.

use parking_lot::Mutex;

use crate::domain::{RefreshToken, User};

/// A write waiting for the next commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedChange {
    AddUser(User),
    UpdateUserProfile(User),
    AddRefreshToken(RefreshToken),
    UpdateRefreshToken(RefreshToken),
}

impl StagedChange {
    fn user(&self) -> Option<&User> {
        match self {
            StagedChange::AddUser(user) | StagedChange::UpdateUserProfile(user) => Some(user),
            _ => None,
        }
    }

    fn user_mut(&mut self) -> Option<&mut User> {
        match self {
            StagedChange::AddUser(user) | StagedChange::UpdateUserProfile(user) => Some(user),
            _ => None,
        }
    }

    fn refresh_token(&self) -> Option<&RefreshToken> {
        match self {
            StagedChange::AddRefreshToken(token) | StagedChange::UpdateRefreshToken(token) => {
                Some(token)
            }
            _ => None,
        }
    }

    fn refresh_token_mut(&mut self) -> Option<&mut RefreshToken> {
        match self {
            StagedChange::AddRefreshToken(token) | StagedChange::UpdateRefreshToken(token) => {
                Some(token)
            }
            _ => None,
        }
    }
}

/// Ordered set of staged changes shared by the repositories of one unit of work
#[derive(Debug, Default)]
pub struct ChangeTracker {
    staged: Mutex<Vec<StagedChange>>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a change. Updates fold into an earlier pending write of the
    /// same row, so each row is written at most once per commit.
    pub fn stage(&self, change: StagedChange) {
        let mut staged = self.staged.lock();

        match change {
            StagedChange::UpdateUserProfile(user) => {
                let pending = staged
                    .iter()
                    .rposition(|c| c.user().is_some_and(|u| u.id == user.id));
                match pending.and_then(|index| staged[index].user_mut()) {
                    Some(slot) => *slot = user,
                    None => staged.push(StagedChange::UpdateUserProfile(user)),
                }
            }
            StagedChange::UpdateRefreshToken(token) => {
                let pending = staged
                    .iter()
                    .rposition(|c| c.refresh_token().is_some_and(|t| t.id == token.id));
                match pending.and_then(|index| staged[index].refresh_token_mut()) {
                    Some(slot) => *slot = token,
                    None => staged.push(StagedChange::UpdateRefreshToken(token)),
                }
            }
            other => staged.push(other),
        }
    }

    /// Latest staged version of a user matching `predicate`
    pub fn find_user(&self, predicate: impl Fn(&User) -> bool) -> Option<User> {
        self.staged
            .lock()
            .iter()
            .rev()
            .filter_map(StagedChange::user)
            .find(|user| predicate(user))
            .cloned()
    }

    /// Latest staged version of a refresh token matching `predicate`
    pub fn find_refresh_token(
        &self,
        predicate: impl Fn(&RefreshToken) -> bool,
    ) -> Option<RefreshToken> {
        self.staged
            .lock()
            .iter()
            .rev()
            .filter_map(StagedChange::refresh_token)
            .find(|token| predicate(token))
            .cloned()
    }

    /// Overlay staged user writes on stored rows: updates replace their
    /// row in place, additions are appended in staging order.
    pub fn merge_users(&self, stored: Vec<User>) -> Vec<User> {
        let staged = self.staged.lock();
        let updated = |id| {
            staged.iter().rev().find_map(|change| match change {
                StagedChange::UpdateUserProfile(user) if user.id == id => Some(user.clone()),
                _ => None,
            })
        };

        let mut users: Vec<User> = stored
            .into_iter()
            .map(|user| updated(user.id).unwrap_or(user))
            .collect();

        users.extend(staged.iter().filter_map(|change| match change {
            StagedChange::AddUser(user) => Some(user.clone()),
            _ => None,
        }));

        users
    }

    /// Remove and return everything staged so far
    pub fn take(&self) -> Vec<StagedChange> {
        std::mem::take(&mut *self.staged.lock())
    }

    pub fn len(&self) -> usize {
        self.staged.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.lock().is_empty()
    }
}
