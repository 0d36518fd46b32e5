//! Driving port for river writes.

use async_trait::async_trait;

use crate::domain::{Error, River, RiverChanges, RiverDraft};

/// Write use-cases for rivers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RiversCommand: Send + Sync {
    /// Register a river. A duplicate code is an `invalid_request`.
    async fn create_river(&self, draft: RiverDraft) -> Result<River, Error>;

    /// Partially update the river identified by `code`.
    async fn update_river(&self, code: &str, changes: RiverChanges) -> Result<River, Error>;
}
