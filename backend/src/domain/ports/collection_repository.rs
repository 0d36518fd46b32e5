//! Port for collections, their measurements and the aggregates built on them.

use async_trait::async_trait;

use crate::domain::{
    Collection, CollectionDraft, MeasurementPoint, MeasurementStats, RiverSample,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by collection repository adapters.
    pub enum CollectionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "collection repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "collection repository query failed: {message}",
        /// A referenced river or parameter vanished before the insert committed.
        MissingReference { message: String } => "collection references a missing record: {message}",
    }
}

/// Port for recording collections and reading measurement projections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionRepository: Send + Sync {
    /// Insert the collection and its measurements as one unit.
    async fn create(&self, draft: &CollectionDraft)
    -> Result<Collection, CollectionRepositoryError>;

    /// Every collection with its measurements, ordered by id.
    async fn list_with_measurements(&self) -> Result<Vec<Collection>, CollectionRepositoryError>;

    /// Average, maximum and minimum of the parameter on the river; `None`
    /// when nothing was measured.
    async fn measurement_stats(
        &self,
        river_id: i32,
        parameter_id: i32,
    ) -> Result<Option<MeasurementStats>, CollectionRepositoryError>;

    /// Date and value of every measurement of the parameter on the river.
    async fn measurement_points(
        &self,
        river_id: i32,
        parameter_id: i32,
    ) -> Result<Vec<MeasurementPoint>, CollectionRepositoryError>;

    /// Distinct names of the rivers where the parameter was measured, sorted.
    async fn river_names_for_parameter(
        &self,
        parameter_id: i32,
    ) -> Result<Vec<String>, CollectionRepositoryError>;

    /// Distinct names of the parameters measured on the river, sorted.
    async fn parameter_names_for_river(
        &self,
        river_id: i32,
    ) -> Result<Vec<String>, CollectionRepositoryError>;

    /// Measurements of the parameter on the river with collection context,
    /// ascending by sampling date.
    async fn river_measurements(
        &self,
        river_id: i32,
        parameter_id: i32,
    ) -> Result<Vec<RiverSample>, CollectionRepositoryError>;
}
