//! Collection domain service.
//!
//! Records sampling events and answers the lookups that cross rivers,
//! parameters and measurements.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{
    CollectionRepository, CollectionsCommand, CollectionsQuery, ParameterRepository,
    RiverRepository,
};
use crate::domain::repository_errors::{
    collection_read_error, collection_write_error, parameter_read_error, river_read_error,
};
use crate::domain::{
    Collection, CollectionDraft, Error, ParameterCoverage, River, RiverCoverage,
    RiverParameterValues,
};

/// Service backing [`CollectionsQuery`] and [`CollectionsCommand`].
#[derive(Clone)]
pub struct CollectionService<R, P, C> {
    rivers: Arc<R>,
    parameters: Arc<P>,
    collections: Arc<C>,
}

impl<R, P, C> CollectionService<R, P, C> {
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

impl<R, P, C> CollectionService<R, P, C>
where
    R: RiverRepository,
{
    async fn river_by_code(&self, code: &str) -> Result<River, Error> {
        self.rivers
            .find_by_code(code)
            .await
            .map_err(river_read_error)?
            .ok_or_else(|| Error::not_found(format!("no river with code {code}")))
    }
}

#[async_trait]
impl<R, P, C> CollectionsCommand for CollectionService<R, P, C>
where
    R: RiverRepository,
    P: ParameterRepository,
    C: CollectionRepository,
{
    async fn create_collection(&self, draft: CollectionDraft) -> Result<Collection, Error> {
        let river_id = draft.river_id();
        if self
            .rivers
            .find_by_id(river_id)
            .await
            .map_err(river_read_error)?
            .is_none()
        {
            return Err(Error::not_found(format!("river {river_id} not found"))
                .with_details(json!({"field": "rio_id", "code": "not_found"})));
        }

        let requested = draft.parameter_ids();
        let existing = self
            .parameters
            .find_existing_ids(&requested)
            .await
            .map_err(parameter_read_error)?;
        let missing: Vec<i32> = requested
            .into_iter()
            .filter(|id| !existing.contains(id))
            .collect();
        if !missing.is_empty() {
            return Err(Error::not_found("referenced parameters not found").with_details(
                json!({"field": "parametro_id", "code": "not_found", "missing": missing}),
            ));
        }

        self.collections
            .create(&draft)
            .await
            .map_err(collection_write_error)
    }
}

#[async_trait]
impl<R, P, C> CollectionsQuery for CollectionService<R, P, C>
where
    R: RiverRepository,
    P: ParameterRepository,
    C: CollectionRepository,
{
    async fn list_collections(&self) -> Result<Vec<Collection>, Error> {
        self.collections
            .list_with_measurements()
            .await
            .map_err(collection_read_error)
    }

    async fn rivers_for_parameter(&self, fragment: &str) -> Result<ParameterCoverage, Error> {
        let parameter = self
            .parameters
            .search_by_name(fragment)
            .await
            .map_err(parameter_read_error)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(format!("no parameter name contains {fragment}")))?;
        let rivers = self
            .collections
            .river_names_for_parameter(parameter.id)
            .await
            .map_err(collection_read_error)?;
        if rivers.is_empty() {
            return Err(Error::not_found(format!(
                "parameter {} was not measured on any river",
                parameter.name
            )));
        }
        Ok(ParameterCoverage {
            parameter: parameter.name,
            rivers,
        })
    }

    async fn parameters_for_river(&self, river_code: &str) -> Result<RiverCoverage, Error> {
        let river = self.river_by_code(river_code).await?;
        let parameters = self
            .collections
            .parameter_names_for_river(river.id)
            .await
            .map_err(collection_read_error)?;
        if parameters.is_empty() {
            return Err(Error::not_found(format!(
                "no parameters collected on river {}",
                river.name
            )));
        }
        Ok(RiverCoverage {
            river: river.name,
            parameters,
        })
    }

    async fn parameter_values(
        &self,
        river_code: &str,
        parameter_name: &str,
    ) -> Result<RiverParameterValues, Error> {
        let river = self.river_by_code(river_code).await?;
        let parameter = self
            .parameters
            .find_by_name(parameter_name)
            .await
            .map_err(parameter_read_error)?
            .ok_or_else(|| Error::not_found(format!("parameter {parameter_name} not found")))?;
        let mut samples = self
            .collections
            .river_measurements(river.id, parameter.id)
            .await
            .map_err(collection_read_error)?;
        if samples.is_empty() {
            return Err(Error::not_found(format!(
                "no values of {} recorded on river {}",
                parameter.name, river.name
            )));
        }
        samples.sort_by_key(|sample| sample.sampled_on);
        Ok(RiverParameterValues {
            river: river.name,
            parameter: parameter.name,
            samples,
        })
    }
}

#[cfg(test)]
#[path = "collection_service_tests.rs"]
mod tests;
