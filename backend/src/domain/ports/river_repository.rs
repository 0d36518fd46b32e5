//! Port for river persistence.

use async_trait::async_trait;

use crate::domain::{River, RiverChanges, RiverDraft};

use super::define_port_error;

define_port_error! {
    /// Errors raised by river repository adapters.
    pub enum RiverRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "river repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "river repository query failed: {message}",
        /// Another river already uses the code.
        DuplicateCode { code: String } => "river code {code} is already registered",
    }
}

/// Port for reading and writing rivers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RiverRepository: Send + Sync {
    /// All rivers ordered by id.
    async fn list(&self) -> Result<Vec<River>, RiverRepositoryError>;

    /// Insert a river and return the stored row.
    async fn create(&self, draft: &RiverDraft) -> Result<River, RiverRepositoryError>;

    /// Apply `changes` to the river with `code`; `None` when it does not exist.
    async fn update_by_code(
        &self,
        code: &str,
        changes: &RiverChanges,
    ) -> Result<Option<River>, RiverRepositoryError>;

    /// Exact code lookup.
    async fn find_by_code(&self, code: &str) -> Result<Option<River>, RiverRepositoryError>;

    /// First river (lowest id) whose name equals `name` exactly.
    async fn find_by_name(&self, name: &str) -> Result<Option<River>, RiverRepositoryError>;

    /// Rivers whose name contains `fragment`, ignoring case, ordered by id.
    async fn search_by_name(&self, fragment: &str) -> Result<Vec<River>, RiverRepositoryError>;

    /// Lookup by numeric id. Not exposed over HTTP.
    async fn find_by_id(&self, id: i32) -> Result<Option<River>, RiverRepositoryError>;
}
