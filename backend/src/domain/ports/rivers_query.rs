//! Driving port for river reads and river-scoped analytics.

use async_trait::async_trait;

use crate::domain::{Error, Matches, River, RiverParameterSeries, RiverParameterSummary};

/// Read use-cases exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RiversQuery: Send + Sync {
    /// All rivers in id order.
    async fn list_rivers(&self) -> Result<Vec<River>, Error>;

    /// Exact code lookup; `not_found` when absent.
    async fn river_by_code(&self, code: &str) -> Result<River, Error>;

    /// Case-insensitive partial name search; `not_found` on zero hits.
    async fn rivers_by_name(&self, fragment: &str) -> Result<Matches<River>, Error>;

    /// Mean, maximum and minimum of a parameter on a river, both named exactly.
    async fn parameter_summary(
        &self,
        river_name: &str,
        parameter_name: &str,
    ) -> Result<RiverParameterSummary, Error>;

    /// Dated values of a parameter on a river for charting.
    async fn parameter_series(
        &self,
        river_name: &str,
        parameter_name: &str,
    ) -> Result<RiverParameterSeries, Error>;
}
