//! Driving port for parameter writes.

use async_trait::async_trait;

use crate::domain::{Error, Parameter, ParameterChanges, ParameterDraft};

/// Write use-cases for parameters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParametersCommand: Send + Sync {
    /// Register a parameter.
    async fn create_parameter(&self, draft: ParameterDraft) -> Result<Parameter, Error>;

    /// Apply `changes` to the parameter; `not_found` when `id` is unknown.
    async fn update_parameter(&self, id: i32, changes: ParameterChanges)
    -> Result<Parameter, Error>;

    /// Delete the parameter and return what was removed.
    async fn delete_parameter(&self, id: i32) -> Result<Parameter, Error>;
}
