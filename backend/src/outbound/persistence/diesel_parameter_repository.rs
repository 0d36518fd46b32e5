//! PostgreSQL-backed `ParameterRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ParameterRepository, ParameterRepositoryError};
use crate::domain::{Parameter, ParameterChanges, ParameterDraft};

use super::diesel_error_mapping::{contains_pattern, map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewParameterRow, ParameterRow, ParameterUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::parameters;

/// Diesel-backed implementation of the parameter repository port.
#[derive(Clone)]
pub struct DieselParameterRepository {
    pool: DbPool,
}

impl DieselParameterRepository {
    /// Create a repository for parameters backed by `pool`.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ParameterRepositoryError {
    map_basic_pool_error(error, ParameterRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ParameterRepositoryError {
    map_basic_diesel_error(
        error,
        ParameterRepositoryError::query,
        ParameterRepositoryError::connection,
    )
}

#[async_trait]
impl ParameterRepository for DieselParameterRepository {
    async fn list(&self) -> Result<Vec<Parameter>, ParameterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ParameterRow> = parameters::table
            .order(parameters::id.asc())
            .select(ParameterRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Parameter::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Parameter>, ParameterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        parameters::table
            .find(id)
            .select(ParameterRow::as_select())
            .first::<ParameterRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Parameter::from))
            .map_err(map_diesel_error)
    }

    async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Parameter>, ParameterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        parameters::table
            .filter(parameters::name.eq(name))
            .order(parameters::id.asc())
            .select(ParameterRow::as_select())
            .first::<ParameterRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Parameter::from))
            .map_err(map_diesel_error)
    }

    async fn search_by_name(
        &self,
        fragment: &str,
    ) -> Result<Vec<Parameter>, ParameterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ParameterRow> = parameters::table
            .filter(parameters::name.ilike(contains_pattern(fragment)))
            .order(parameters::id.asc())
            .select(ParameterRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Parameter::from).collect())
    }

    async fn create(&self, draft: &ParameterDraft) -> Result<Parameter, ParameterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(parameters::table)
            .values(&NewParameterRow {
                name: draft.name(),
                category: draft.category(),
            })
            .returning(ParameterRow::as_returning())
            .get_result::<ParameterRow>(&mut conn)
            .await
            .map(Parameter::from)
            .map_err(map_diesel_error)
    }

    async fn update(
        &self,
        id: i32,
        changes: &ParameterChanges,
    ) -> Result<Option<Parameter>, ParameterRepositoryError> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(parameters::table.find(id))
            .set(&ParameterUpdate {
                name: changes.name(),
                category: changes.category(),
            })
            .returning(ParameterRow::as_returning())
            .get_result::<ParameterRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Parameter::from))
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: i32) -> Result<Option<Parameter>, ParameterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Measurement rows go with it through ON DELETE CASCADE.
        diesel::delete(parameters::table.find(id))
            .returning(ParameterRow::as_returning())
            .get_result::<ParameterRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Parameter::from))
            .map_err(map_diesel_error)
    }

    async fn find_existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, ParameterRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        parameters::table
            .filter(parameters::id.eq_any(ids))
            .select(parameters::id)
            .load::<i32>(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
