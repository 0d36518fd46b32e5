//! Driving port for user reads.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Read use-case for users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Lookup by id; `not_found` when absent.
    async fn user_by_id(&self, id: i32) -> Result<User, Error>;
}
