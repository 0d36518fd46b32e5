//! River domain service.
//!
//! Implements the river driving ports, including the summary and chart
//! lookups that join rivers with parameters and their measurements.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    CollectionRepository, ParameterRepository, RiverRepository, RiversCommand, RiversQuery,
};
use crate::domain::repository_errors::{
    collection_read_error, parameter_read_error, river_read_error, river_write_error,
};
use crate::domain::{
    Error, Matches, Parameter, River, RiverChanges, RiverDraft, RiverParameterSeries,
    RiverParameterSummary,
};

/// Service backing [`RiversQuery`] and [`RiversCommand`].
#[derive(Clone)]
pub struct RiverService<R, P, C> {
    rivers: Arc<R>,
    parameters: Arc<P>,
    collections: Arc<C>,
}

impl<R, P, C> RiverService<R, P, C> {
    /// Build the service over its driven ports.
    #[must_use]
    pub const fn new(rivers: Arc<R>, parameters: Arc<P>, collections: Arc<C>) -> Self {
        Self {
            rivers,
            parameters,
            collections,
        }
    }
}

impl<R, P, C> RiverService<R, P, C>
where
    R: RiverRepository,
    P: ParameterRepository,
    C: CollectionRepository,
{
    async fn river_and_parameter(
        &self,
        river_name: &str,
        parameter_name: &str,
    ) -> Result<(River, Parameter), Error> {
        let river = self
            .rivers
            .find_by_name(river_name)
            .await
            .map_err(river_read_error)?
            .ok_or_else(|| Error::not_found(format!("river {river_name} not found")))?;
        let parameter = self
            .parameters
            .find_by_name(parameter_name)
            .await
            .map_err(parameter_read_error)?
            .ok_or_else(|| Error::not_found(format!("parameter {parameter_name} not found")))?;
        Ok((river, parameter))
    }
}

fn no_measurements(river: &River, parameter_name: &str) -> Error {
    Error::not_found(format!(
        "parameter {parameter_name} has no measurements on river {}",
        river.name
    ))
}

#[async_trait]
impl<R, P, C> RiversQuery for RiverService<R, P, C>
where
    R: RiverRepository,
    P: ParameterRepository,
    C: CollectionRepository,
{
    async fn list_rivers(&self) -> Result<Vec<River>, Error> {
        self.rivers.list().await.map_err(river_read_error)
    }

    async fn river_by_code(&self, code: &str) -> Result<River, Error> {
        self.rivers
            .find_by_code(code)
            .await
            .map_err(river_read_error)?
            .ok_or_else(|| Error::not_found(format!("no river with code {code}")))
    }

    async fn rivers_by_name(&self, fragment: &str) -> Result<Matches<River>, Error> {
        let hits = self
            .rivers
            .search_by_name(fragment)
            .await
            .map_err(river_read_error)?;
        Matches::from_vec(hits)
            .ok_or_else(|| Error::not_found(format!("no river name contains {fragment}")))
    }

    async fn parameter_summary(
        &self,
        river_name: &str,
        parameter_name: &str,
    ) -> Result<RiverParameterSummary, Error> {
        let (river, parameter) = self.river_and_parameter(river_name, parameter_name).await?;
        let stats = self
            .collections
            .measurement_stats(river.id, parameter.id)
            .await
            .map_err(collection_read_error)?
            .ok_or_else(|| no_measurements(&river, parameter_name))?;
        Ok(RiverParameterSummary {
            river_id: river.id,
            parameter: parameter_name.to_owned(),
            stats,
        })
    }

    async fn parameter_series(
        &self,
        river_name: &str,
        parameter_name: &str,
    ) -> Result<RiverParameterSeries, Error> {
        let (river, parameter) = self.river_and_parameter(river_name, parameter_name).await?;
        let points = self
            .collections
            .measurement_points(river.id, parameter.id)
            .await
            .map_err(collection_read_error)?;
        if points.is_empty() {
            return Err(no_measurements(&river, parameter_name));
        }
        Ok(RiverParameterSeries {
            river_id: river.id,
            parameter: parameter_name.to_owned(),
            points,
        })
    }
}

#[async_trait]
impl<R, P, C> RiversCommand for RiverService<R, P, C>
where
    R: RiverRepository,
    P: ParameterRepository,
    C: CollectionRepository,
{
    async fn create_river(&self, draft: RiverDraft) -> Result<River, Error> {
        self.rivers.create(&draft).await.map_err(river_write_error)
    }

    async fn update_river(&self, code: &str, changes: RiverChanges) -> Result<River, Error> {
        self.rivers
            .update_by_code(code, &changes)
            .await
            .map_err(river_write_error)?
            .ok_or_else(|| Error::not_found(format!("no river with code {code}")))
    }
}

#[cfg(test)]
#[path = "river_service_tests.rs"]
mod tests;
