//! Driving port for collection listings and cross-entity lookups.

use async_trait::async_trait;

use crate::domain::{Collection, Error, ParameterCoverage, RiverCoverage, RiverParameterValues};

/// Read use-cases over collections and measurement coverage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionsQuery: Send + Sync {
    /// Every collection with its measurements, oldest first.
    async fn list_collections(&self) -> Result<Vec<Collection>, Error>;

    /// Rivers measured for the first parameter whose name contains `fragment`.
    async fn rivers_for_parameter(&self, fragment: &str) -> Result<ParameterCoverage, Error>;

    /// Parameters measured on the river with `river_code`.
    async fn parameters_for_river(&self, river_code: &str) -> Result<RiverCoverage, Error>;

    /// Values of the exactly named parameter on the river, ascending by date.
    async fn parameter_values(
        &self,
        river_code: &str,
        parameter_name: &str,
    ) -> Result<RiverParameterValues, Error>;
}
