//! Sampling events and the measurements taken during them.

use chrono::NaiveDate;

use super::validation::{FieldError, FieldErrorCode, require_range, require_text};

/// One parameter value recorded during a collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Measured parameter.
    pub parameter_id: i32,
    /// Recorded value; always finite once validated.
    pub value: f64,
}

/// A stored collection together with its measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    /// Storage id.
    pub id: i32,
    /// Caller-assigned collection code; not unique.
    pub code: String,
    /// Free-text sampling site.
    pub location: String,
    /// River the sample was taken from.
    pub river_id: i32,
    /// Calendar date of the sampling.
    pub sampled_on: NaiveDate,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Values recorded during the collection, in insertion order.
    pub measurements: Vec<Measurement>,
}

/// Validated input for recording a collection.
///
/// ## Invariants
/// - `code` and `location` are non-blank.
/// - latitude lies in `[-90, 90]` and longitude in `[-180, 180]`.
/// - at least one measurement is present.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionDraft {
    code: String,
    location: String,
    river_id: i32,
    sampled_on: NaiveDate,
    latitude: f64,
    longitude: f64,
    measurements: Vec<Measurement>,
}

/// Unvalidated collection fields, grouped to keep the constructor readable.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionFields {
    /// Collection code.
    pub code: String,
    /// Sampling site.
    pub location: String,
    /// Referenced river id.
    pub river_id: i32,
    /// Sampling date.
    pub sampled_on: NaiveDate,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Values to record.
    pub measurements: Vec<Measurement>,
}

impl TryFrom<CollectionFields> for CollectionDraft {
    type Error = FieldError;

    fn try_from(fields: CollectionFields) -> Result<Self, Self::Error> {
        let CollectionFields {
            code,
            location,
            river_id,
            sampled_on,
            latitude,
            longitude,
            measurements,
        } = fields;
        if measurements.is_empty() {
            return Err(FieldError::new(
                "coletas_parametros",
                FieldErrorCode::Empty,
            ));
        }
        if measurements.iter().any(|m| !m.value.is_finite()) {
            return Err(FieldError::new("valor", FieldErrorCode::OutOfRange));
        }
        Ok(Self {
            code: require_text("codigo", code)?,
            location: require_text("locali", location)?,
            river_id,
            sampled_on,
            latitude: require_range("latitude", latitude, -90.0, 90.0)?,
            longitude: require_range("longitude", longitude, -180.0, 180.0)?,
            measurements,
        })
    }
}

impl CollectionDraft {
    /// Non-blank collection code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Non-blank sampling site.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Referenced river id; existence is checked by the service.
    #[must_use]
    pub const fn river_id(&self) -> i32 {
        self.river_id
    }

    /// Sampling date.
    #[must_use]
    pub const fn sampled_on(&self) -> NaiveDate {
        self.sampled_on
    }

    /// Latitude within `[-90, 90]`.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude within `[-180, 180]`.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// At least one measurement with a finite value.
    #[must_use]
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Distinct parameter ids referenced by the measurements, ascending.
    #[must_use]
    pub fn parameter_ids(&self) -> Vec<i32> {
        let mut ids: Vec<i32> = self.measurements.iter().map(|m| m.parameter_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn fields() -> CollectionFields {
        CollectionFields {
            code: "C-001".to_owned(),
            location: "Ponte Velha".to_owned(),
            river_id: 1,
            sampled_on: NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
            latitude: -19.5,
            longitude: -42.6,
            measurements: vec![
                Measurement {
                    parameter_id: 4,
                    value: 7.1,
                },
                Measurement {
                    parameter_id: 2,
                    value: 6.3,
                },
                Measurement {
                    parameter_id: 4,
                    value: 7.2,
                },
            ],
        }
    }

    #[rstest]
    fn valid_fields_build_a_draft(fields: CollectionFields) {
        let draft = CollectionDraft::try_from(fields).expect("valid draft");
        assert_eq!(draft.parameter_ids(), vec![2, 4]);
        assert_eq!(draft.measurements().len(), 3);
    }

    #[rstest]
    #[case(91.0, 0.0, "latitude")]
    #[case(0.0, -180.5, "longitude")]
    fn coordinates_must_be_in_range(
        mut fields: CollectionFields,
        #[case] latitude: f64,
        #[case] longitude: f64,
        #[case] field: &'static str,
    ) {
        fields.latitude = latitude;
        fields.longitude = longitude;
        let err = CollectionDraft::try_from(fields).expect_err("out of range");
        assert_eq!(err, FieldError::new(field, FieldErrorCode::OutOfRange));
    }

    #[rstest]
    fn measurements_are_required(mut fields: CollectionFields) {
        fields.measurements.clear();
        let err = CollectionDraft::try_from(fields).expect_err("no measurements");
        assert_eq!(err.code, FieldErrorCode::Empty);
    }

    #[rstest]
    fn blank_location_is_rejected(mut fields: CollectionFields) {
        fields.location = " ".to_owned();
        let err = CollectionDraft::try_from(fields).expect_err("blank location");
        assert_eq!(err.field, "locali");
    }
}
