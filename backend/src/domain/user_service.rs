//! User registration and lookup.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UsersCommand, UsersQuery};
use crate::domain::repository_errors::{user_read_error, user_write_error};
use crate::domain::{Error, NewUser, PasswordHash, User, UserDraft};

/// Service backing [`UsersQuery`] and [`UsersCommand`].
#[derive(Clone)]
pub struct UserService<U> {
    users: Arc<U>,
}

impl<U> UserService<U> {
    /// Build the service over the user repository.
    #[must_use]
    pub const fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> UsersCommand for UserService<U>
where
    U: UserRepository,
{
    async fn register_user(&self, draft: UserDraft) -> Result<User, Error> {
        let new_user = NewUser {
            name: draft.name().to_owned(),
            email: draft.email().clone(),
            password_hash: PasswordHash::generate(draft.password()),
        };
        self.users
            .create(&new_user)
            .await
            .map_err(user_write_error)
    }
}

#[async_trait]
impl<U> UsersQuery for UserService<U>
where
    U: UserRepository,
{
    async fn user_by_id(&self, id: i32) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(user_read_error)?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
