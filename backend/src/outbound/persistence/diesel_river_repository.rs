//! PostgreSQL-backed `RiverRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RiverRepository, RiverRepositoryError};
use crate::domain::{River, RiverChanges, RiverDraft};

use super::diesel_error_mapping::{
    DieselFailure, classify_diesel_error, contains_pattern, map_basic_pool_error,
};
use super::models::{NewRiverRow, RiverRow, RiverUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::rivers;

/// Diesel-backed implementation of the river repository port.
#[derive(Clone)]
pub struct DieselRiverRepository {
    pool: DbPool,
}

impl DieselRiverRepository {
    /// Create a repository for rivers backed by `pool`.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RiverRepositoryError {
    map_basic_pool_error(error, RiverRepositoryError::connection)
}

/// `code` is reported when the statement trips the unique code index.
fn map_diesel_error(error: diesel::result::Error, code: Option<&str>) -> RiverRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::UniqueViolation => {
            RiverRepositoryError::duplicate_code(code.unwrap_or_default())
        }
        DieselFailure::Connection(message) => RiverRepositoryError::connection(message),
        DieselFailure::Query(message) => RiverRepositoryError::query(message),
        DieselFailure::ForeignKeyViolation { .. } => {
            RiverRepositoryError::query("foreign key constraint violated")
        }
    }
}

fn map_read_error(error: diesel::result::Error) -> RiverRepositoryError {
    map_diesel_error(error, None)
}

#[async_trait]
impl RiverRepository for DieselRiverRepository {
    async fn list(&self) -> Result<Vec<River>, RiverRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RiverRow> = rivers::table
            .order(rivers::id.asc())
            .select(RiverRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        Ok(rows.into_iter().map(River::from).collect())
    }

    async fn create(&self, draft: &RiverDraft) -> Result<River, RiverRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewRiverRow {
            name: draft.name(),
            code: draft.code(),
            description: draft.description(),
        };

        diesel::insert_into(rivers::table)
            .values(&new_row)
            .returning(RiverRow::as_returning())
            .get_result::<RiverRow>(&mut conn)
            .await
            .map(River::from)
            .map_err(|err| map_diesel_error(err, Some(draft.code())))
    }

    async fn update_by_code(
        &self,
        code: &str,
        changes: &RiverChanges,
    ) -> Result<Option<River>, RiverRepositoryError> {
        if changes.is_empty() {
            return self.find_by_code(code).await;
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let update = RiverUpdate {
            name: changes.name(),
            code: changes.code(),
            description: changes.description(),
        };

        diesel::update(rivers::table.filter(rivers::code.eq(code)))
            .set(&update)
            .returning(RiverRow::as_returning())
            .get_result::<RiverRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(River::from))
            .map_err(|err| map_diesel_error(err, changes.code()))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<River>, RiverRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        rivers::table
            .filter(rivers::code.eq(code))
            .select(RiverRow::as_select())
            .first::<RiverRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(River::from))
            .map_err(map_read_error)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<River>, RiverRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        rivers::table
            .filter(rivers::name.eq(name))
            .order(rivers::id.asc())
            .select(RiverRow::as_select())
            .first::<RiverRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(River::from))
            .map_err(map_read_error)
    }

    async fn search_by_name(&self, fragment: &str) -> Result<Vec<River>, RiverRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RiverRow> = rivers::table
            .filter(rivers::name.ilike(contains_pattern(fragment)))
            .order(rivers::id.asc())
            .select(RiverRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        Ok(rows.into_iter().map(River::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<River>, RiverRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        rivers::table
            .find(id)
            .select(RiverRow::as_select())
            .first::<RiverRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(River::from))
            .map_err(map_read_error)
    }
}
