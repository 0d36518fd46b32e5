//! Port for parameter persistence.

use async_trait::async_trait;

use crate::domain::{Parameter, ParameterChanges, ParameterDraft};

use super::define_port_error;

define_port_error! {
    /// Errors raised by parameter repository adapters.
    pub enum ParameterRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "parameter repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "parameter repository query failed: {message}",
    }
}

/// Port for reading and writing parameters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParameterRepository: Send + Sync {
    /// All parameters ordered by id.
    async fn list(&self) -> Result<Vec<Parameter>, ParameterRepositoryError>;

    /// Lookup by id.
    async fn find_by_id(&self, id: i32) -> Result<Option<Parameter>, ParameterRepositoryError>;

    /// First parameter (lowest id) whose name equals `name` exactly.
    async fn find_by_name(&self, name: &str)
    -> Result<Option<Parameter>, ParameterRepositoryError>;

    /// Parameters whose name contains `fragment`, ignoring case, ordered by id.
    async fn search_by_name(
        &self,
        fragment: &str,
    ) -> Result<Vec<Parameter>, ParameterRepositoryError>;

    /// Insert a parameter and return the stored row.
    async fn create(&self, draft: &ParameterDraft) -> Result<Parameter, ParameterRepositoryError>;

    /// Apply `changes`; `None` when the parameter does not exist.
    async fn update(
        &self,
        id: i32,
        changes: &ParameterChanges,
    ) -> Result<Option<Parameter>, ParameterRepositoryError>;

    /// Remove the parameter and its measurements, returning the deleted row.
    async fn delete(&self, id: i32) -> Result<Option<Parameter>, ParameterRepositoryError>;

    /// Subset of `ids` that exist.
    async fn find_existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, ParameterRepositoryError>;
}
