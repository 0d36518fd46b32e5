//! Monitored rivers.

use super::validation::{FieldError, require_text};

/// A monitored waterway identified by its unique code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct River {
    /// Storage id.
    pub id: i32,
    /// Display name; not unique.
    pub name: String,
    /// Unique external identifier.
    pub code: String,
    /// Free text, empty when not supplied.
    pub description: String,
}

/// Validated input for registering a river.
///
/// ## Invariants
/// - `name` and `code` are non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiverDraft {
    name: String,
    code: String,
    description: String,
}

impl RiverDraft {
    /// Validate the supplied fields.
    ///
    /// # Examples
    /// ```
    /// use riverwq::domain::RiverDraft;
    ///
    /// let draft = RiverDraft::new("Rio Doce", "RD-01", "").expect("valid draft");
    /// assert_eq!(draft.code(), "RD-01");
    /// assert!(RiverDraft::new("Rio Doce", " ", "").is_err());
    /// ```
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, FieldError> {
        Ok(Self {
            name: require_text("nome", name.into())?,
            code: require_text("codigo", code.into())?,
            description: description.into(),
        })
    }

    /// Validated name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validated code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Description, possibly empty.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Partial update applied to a river; absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiverChanges {
    name: Option<String>,
    code: Option<String>,
    description: Option<String>,
}

impl RiverChanges {
    /// Validate the supplied fields. Only fields that are present are checked.
    pub fn new(
        name: Option<String>,
        code: Option<String>,
        description: Option<String>,
    ) -> Result<Self, FieldError> {
        Ok(Self {
            name: name.map(|value| require_text("nome", value)).transpose()?,
            code: code.map(|value| require_text("codigo", value)).transpose()?,
            description,
        })
    }

    /// New name, if changing.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// New code, if changing.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// New description, if changing. May be empty.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// True when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.code.is_none() && self.description.is_none()
    }

    /// Apply the changes to an in-memory river.
    pub fn apply_to(&self, river: &mut River) {
        if let Some(name) = &self.name {
            river.name.clone_from(name);
        }
        if let Some(code) = &self.code {
            river.code.clone_from(code);
        }
        if let Some(description) = &self.description {
            river.description.clone_from(description);
        }
    }
}
