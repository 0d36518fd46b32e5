//! PostgreSQL-backed `CollectionRepository` implementation using Diesel ORM.
//!
//! Relationship walks are expressed as explicit joins: every read here is a
//! single statement, except the collection listing which loads collections
//! and then all of their measurement rows.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::dsl::{avg, max, min};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CollectionRepository, CollectionRepositoryError};
use crate::domain::{
    Collection, CollectionDraft, MeasurementPoint, MeasurementStats, RiverSample,
};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, map_basic_pool_error};
use super::models::{CollectionRow, MeasurementRow, NewCollectionRow, NewMeasurementRow};
use super::pool::{DbPool, PoolError};
use super::schema::{collection_parameters, collections, parameters, rivers};

/// Diesel-backed implementation of the collection repository port.
#[derive(Clone)]
pub struct DieselCollectionRepository {
    pool: DbPool,
}

impl DieselCollectionRepository {
    /// Create a repository for collections and measurements backed by `pool`.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CollectionRepositoryError {
    map_basic_pool_error(error, CollectionRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CollectionRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::ForeignKeyViolation { constraint } => {
            CollectionRepositoryError::missing_reference(
                constraint.unwrap_or_else(|| "foreign key".to_owned()),
            )
        }
        DieselFailure::Connection(message) => CollectionRepositoryError::connection(message),
        DieselFailure::Query(message) => CollectionRepositoryError::query(message),
        DieselFailure::UniqueViolation => {
            CollectionRepositoryError::query("unique constraint violated")
        }
    }
}

type SampleTuple = (NaiveDate, String, f64, f64, f64);

#[async_trait]
impl CollectionRepository for DieselCollectionRepository {
    async fn create(
        &self,
        draft: &CollectionDraft,
    ) -> Result<Collection, CollectionRepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // The collection and its measurements commit together or not at all.
        conn.transaction(|conn| {
            async move {
                let row = diesel::insert_into(collections::table)
                    .values(&NewCollectionRow {
                        code: draft.code(),
                        location: draft.location(),
                        river_id: draft.river_id(),
                        sampled_on: draft.sampled_on(),
                        latitude: draft.latitude(),
                        longitude: draft.longitude(),
                    })
                    .returning(CollectionRow::as_returning())
                    .get_result::<CollectionRow>(conn)
                    .await?;

                let measurement_rows: Vec<NewMeasurementRow> = draft
                    .measurements()
                    .iter()
                    .map(|measurement| NewMeasurementRow {
                        collection_id: row.id,
                        parameter_id: measurement.parameter_id,
                        value: measurement.value,
                    })
                    .collect();

                let stored = diesel::insert_into(collection_parameters::table)
                    .values(&measurement_rows)
                    .returning(MeasurementRow::as_returning())
                    .get_results::<MeasurementRow>(conn)
                    .await?;

                Ok::<_, diesel::result::Error>(row.into_collection(stored))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn list_with_measurements(&self) -> Result<Vec<Collection>, CollectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let collection_rows: Vec<CollectionRow> = collections::table
            .order(collections::id.asc())
            .select(CollectionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let measurement_rows: Vec<MeasurementRow> = MeasurementRow::belonging_to(&collection_rows)
            .order(collection_parameters::id.asc())
            .select(MeasurementRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let grouped = measurement_rows.grouped_by(&collection_rows);
        Ok(collection_rows
            .into_iter()
            .zip(grouped)
            .map(|(row, measurements)| row.into_collection(measurements))
            .collect())
    }

    async fn measurement_stats(
        &self,
        river_id: i32,
        parameter_id: i32,
    ) -> Result<Option<MeasurementStats>, CollectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (mean, maximum, minimum) = collection_parameters::table
            .inner_join(collections::table)
            .filter(collections::river_id.eq(river_id))
            .filter(collection_parameters::parameter_id.eq(parameter_id))
            .select((
                avg(collection_parameters::value),
                max(collection_parameters::value),
                min(collection_parameters::value),
            ))
            .first::<(Option<f64>, Option<f64>, Option<f64>)>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        // Aggregates over zero rows are all NULL.
        Ok(match (mean, maximum, minimum) {
            (Some(mean), Some(maximum), Some(minimum)) => Some(MeasurementStats {
                mean,
                maximum,
                minimum,
            }),
            _ => None,
        })
    }

    async fn measurement_points(
        &self,
        river_id: i32,
        parameter_id: i32,
    ) -> Result<Vec<MeasurementPoint>, CollectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(NaiveDate, f64)> = collection_parameters::table
            .inner_join(collections::table)
            .filter(collections::river_id.eq(river_id))
            .filter(collection_parameters::parameter_id.eq(parameter_id))
            .order(collection_parameters::id.asc())
            .select((collections::sampled_on, collection_parameters::value))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|(sampled_on, value)| MeasurementPoint { sampled_on, value })
            .collect())
    }

    async fn river_names_for_parameter(
        &self,
        parameter_id: i32,
    ) -> Result<Vec<String>, CollectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        collection_parameters::table
            .inner_join(collections::table.inner_join(rivers::table))
            .filter(collection_parameters::parameter_id.eq(parameter_id))
            .select(rivers::name)
            .distinct()
            .order(rivers::name.asc())
            .load::<String>(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn parameter_names_for_river(
        &self,
        river_id: i32,
    ) -> Result<Vec<String>, CollectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        collection_parameters::table
            .inner_join(collections::table)
            .inner_join(parameters::table)
            .filter(collections::river_id.eq(river_id))
            .select(parameters::name)
            .distinct()
            .order(parameters::name.asc())
            .load::<String>(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn river_measurements(
        &self,
        river_id: i32,
        parameter_id: i32,
    ) -> Result<Vec<RiverSample>, CollectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<SampleTuple> = collection_parameters::table
            .inner_join(collections::table)
            .filter(collections::river_id.eq(river_id))
            .filter(collection_parameters::parameter_id.eq(parameter_id))
            .order((collections::sampled_on.asc(), collection_parameters::id.asc()))
            .select((
                collections::sampled_on,
                collections::location,
                collection_parameters::value,
                collections::latitude,
                collections::longitude,
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(
                |(sampled_on, location, value, latitude, longitude)| RiverSample {
                    sampled_on,
                    location,
                    value,
                    latitude,
                    longitude,
                },
            )
            .collect())
    }
}
