//! Driving port for user registration.

use async_trait::async_trait;

use crate::domain::{Error, User, UserDraft};

/// Write use-case for user registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Hash the password and store the user. A duplicate email is an
    /// `invalid_request`.
    async fn register_user(&self, draft: UserDraft) -> Result<User, Error>;
}
