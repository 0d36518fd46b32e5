//! Parameter domain service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{ParameterRepository, ParametersCommand, ParametersQuery};
use crate::domain::repository_errors::{parameter_read_error, parameter_write_error};
use crate::domain::{Error, Matches, Parameter, ParameterChanges, ParameterDraft};

fn not_found(id: i32) -> Error {
    Error::not_found(format!("parameter {id} not found"))
}

/// Service backing [`ParametersQuery`] and [`ParametersCommand`].
#[derive(Clone)]
pub struct ParameterService<P> {
    parameters: Arc<P>,
}

impl<P> ParameterService<P> {
    /// Build the service over the parameter repository.
    #[must_use]
    pub const fn new(parameters: Arc<P>) -> Self {
        Self { parameters }
    }
}

#[async_trait]
impl<P> ParametersQuery for ParameterService<P>
where
    P: ParameterRepository,
{
    async fn list_parameters(&self) -> Result<Vec<Parameter>, Error> {
        self.parameters.list().await.map_err(parameter_read_error)
    }

    async fn parameter_by_id(&self, id: i32) -> Result<Parameter, Error> {
        self.parameters
            .find_by_id(id)
            .await
            .map_err(parameter_read_error)?
            .ok_or_else(|| not_found(id))
    }

    async fn parameters_by_name(&self, fragment: &str) -> Result<Matches<Parameter>, Error> {
        let hits = self
            .parameters
            .search_by_name(fragment)
            .await
            .map_err(parameter_read_error)?;
        Matches::from_vec(hits)
            .ok_or_else(|| Error::not_found(format!("no parameter name contains {fragment}")))
    }

    async fn parameter_by_email(&self, _email: &str) -> Result<Parameter, Error> {
        warn!("parameter lookup by email requested; parameters have no email");
        Err(Error::not_found("parameters have no email attribute"))
    }
}

#[async_trait]
impl<P> ParametersCommand for ParameterService<P>
where
    P: ParameterRepository,
{
    async fn create_parameter(&self, draft: ParameterDraft) -> Result<Parameter, Error> {
        self.parameters.create(&draft).await.map_err(parameter_write_error)
    }

    async fn update_parameter(
        &self,
        id: i32,
        changes: ParameterChanges,
    ) -> Result<Parameter, Error> {
        self.parameters
            .update(id, &changes)
            .await
            .map_err(parameter_write_error)?
            .ok_or_else(|| not_found(id))
    }

    async fn delete_parameter(&self, id: i32) -> Result<Parameter, Error> {
        self.parameters
            .delete(id)
            .await
            .map_err(parameter_write_error)?
            .ok_or_else(|| not_found(id))
    }
}

#[cfg(test)]
#[path = "parameter_service_tests.rs"]
mod tests;
