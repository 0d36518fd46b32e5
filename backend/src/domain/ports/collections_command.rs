//! Driving port for recording collections.

use async_trait::async_trait;

use crate::domain::{Collection, CollectionDraft, Error};

/// Write use-case for sampling events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionsCommand: Send + Sync {
    /// Record a collection after checking the river and every parameter exist.
    async fn create_collection(&self, draft: CollectionDraft) -> Result<Collection, Error>;
}
