//! Field-level validation shared by the domain drafts.
//!
//! Drafts report the first offending field using its public (wire) name so
//! the error details line up with the request body the client sent.

use serde_json::json;

use super::Error;

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorCode {
    /// Empty or whitespace only.
    Blank,
    /// Number outside its allowed interval, or not finite.
    OutOfRange,
    /// A list that must contain at least one entry was empty.
    Empty,
    /// Not shaped like an email address.
    InvalidEmail,
}

impl FieldErrorCode {
    /// Stable identifier placed in error details.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::OutOfRange => "out_of_range",
            Self::Empty => "empty",
            Self::InvalidEmail => "invalid_email",
        }
    }
}

/// A single rejected field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{field} is invalid: {}", code.as_str())]
pub struct FieldError {
    /// Wire name of the field.
    pub field: &'static str,
    /// Reason for rejection.
    pub code: FieldErrorCode,
}

impl FieldError {
    /// Pair a field with the reason it was rejected.
    #[must_use]
    pub const fn new(field: &'static str, code: FieldErrorCode) -> Self {
        Self { field, code }
    }
}

impl From<FieldError> for Error {
    fn from(value: FieldError) -> Self {
        Self::invalid_request(value.to_string()).with_details(json!({
            "field": value.field,
            "code": value.code.as_str(),
        }))
    }
}

/// Reject values that are empty once surrounding whitespace is removed.
pub(crate) fn require_text(field: &'static str, value: String) -> Result<String, FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::new(field, FieldErrorCode::Blank));
    }
    Ok(value)
}

/// Reject values outside `[min, max]`, including NaN.
pub(crate) fn require_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64, FieldError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(FieldError::new(field, FieldErrorCode::OutOfRange))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn blank_text_is_rejected(#[case] value: &str) {
        let err = require_text("nome", value.to_owned()).expect_err("blank text");
        assert_eq!(err, FieldError::new("nome", FieldErrorCode::Blank));
    }

    #[rstest]
    #[case(-90.0, true)]
    #[case(90.0, true)]
    #[case(90.5, false)]
    #[case(f64::NAN, false)]
    fn range_is_inclusive(#[case] value: f64, #[case] accepted: bool) {
        assert_eq!(require_range("latitude", value, -90.0, 90.0).is_ok(), accepted);
    }

    #[rstest]
    fn field_errors_become_invalid_requests_with_details() {
        let error: Error = FieldError::new("codigo", FieldErrorCode::Blank).into();
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            error.details(),
            Some(&json!({"field": "codigo", "code": "blank"}))
        );
    }
}
