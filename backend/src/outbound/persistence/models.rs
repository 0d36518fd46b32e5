//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and never
//! reach the domain. Conversions into domain entities live beside them.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::{Collection, Email, Measurement, Parameter, River};

use super::schema::{collection_parameters, collections, parameters, rivers, users};

// ---------------------------------------------------------------------------
// Rivers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = rivers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RiverRow {
    pub id: i32,
    pub name: String,
    pub code: String,
    pub description: String,
}

impl From<RiverRow> for River {
    fn from(row: RiverRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            code: row.code,
            description: row.description,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = rivers)]
pub(crate) struct NewRiverRow<'a> {
    pub name: &'a str,
    pub code: &'a str,
    pub description: &'a str,
}

/// Partial update; `None` columns are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = rivers)]
pub(crate) struct RiverUpdate<'a> {
    pub name: Option<&'a str>,
    pub code: Option<&'a str>,
    pub description: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = parameters)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ParameterRow {
    pub id: i32,
    pub name: String,
    pub category: String,
}

impl From<ParameterRow> for Parameter {
    fn from(row: ParameterRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            category: row.category,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = parameters)]
pub(crate) struct NewParameterRow<'a> {
    pub name: &'a str,
    pub category: &'a str,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = parameters)]
pub(crate) struct ParameterUpdate<'a> {
    pub name: Option<&'a str>,
    pub category: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Collections and measurements
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = collections)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CollectionRow {
    pub id: i32,
    pub code: String,
    pub location: String,
    pub river_id: i32,
    pub sampled_on: NaiveDate,
    pub latitude: f64,
    pub longitude: f64,
}

impl CollectionRow {
    pub(crate) fn into_collection(self, measurements: Vec<MeasurementRow>) -> Collection {
        Collection {
            id: self.id,
            code: self.code,
            location: self.location,
            river_id: self.river_id,
            sampled_on: self.sampled_on,
            latitude: self.latitude,
            longitude: self.longitude,
            measurements: measurements.into_iter().map(Measurement::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = collections)]
pub(crate) struct NewCollectionRow<'a> {
    pub code: &'a str,
    pub location: &'a str,
    pub river_id: i32,
    pub sampled_on: NaiveDate,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = collection_parameters)]
#[diesel(belongs_to(CollectionRow, foreign_key = collection_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MeasurementRow {
    pub id: i32,
    pub collection_id: i32,
    pub parameter_id: i32,
    pub value: f64,
}

impl From<MeasurementRow> for Measurement {
    fn from(row: MeasurementRow) -> Self {
        Self {
            parameter_id: row.parameter_id,
            value: row.value,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = collection_parameters)]
pub(crate) struct NewMeasurementRow {
    pub collection_id: i32,
    pub parameter_id: i32,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl UserRow {
    /// Rows written through the domain always hold a valid address; anything
    /// else is reported as a query failure by the caller.
    pub(crate) fn into_user(self) -> Result<crate::domain::User, String> {
        let email = Email::new(self.email).map_err(|err| err.to_string())?;
        Ok(crate::domain::User {
            id: self.id,
            name: self.name,
            email,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}
