//! Driving port for parameter reads.

use async_trait::async_trait;

use crate::domain::{Error, Matches, Parameter};

/// Read use-cases for parameters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParametersQuery: Send + Sync {
    /// All parameters in id order.
    async fn list_parameters(&self) -> Result<Vec<Parameter>, Error>;

    /// Lookup by id; `not_found` when absent.
    async fn parameter_by_id(&self, id: i32) -> Result<Parameter, Error>;

    /// Case-insensitive partial name search; `not_found` on zero hits.
    async fn parameters_by_name(&self, fragment: &str) -> Result<Matches<Parameter>, Error>;

    /// Parameters have no email attribute, so this never finds anything.
    async fn parameter_by_email(&self, email: &str) -> Result<Parameter, Error>;
}
