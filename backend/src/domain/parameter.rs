//! Water-quality parameters such as pH or dissolved oxygen.

use super::validation::{FieldError, require_text};

/// A named measurement type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Storage id.
    pub id: i32,
    /// Display name, e.g. `pH`.
    pub name: String,
    /// Grouping such as `físico-químico`.
    pub category: String,
}

/// Validated input for registering a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDraft {
    name: String,
    category: String,
}

impl ParameterDraft {
    /// Validate the supplied fields; both must be non-blank.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Result<Self, FieldError> {
        Ok(Self {
            name: require_text("nome", name.into())?,
            category: require_text("categoria", category.into())?,
        })
    }

    /// Validated name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validated category.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }
}

/// Partial update applied to a parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterChanges {
    name: Option<String>,
    category: Option<String>,
}

impl ParameterChanges {
    /// Validate the fields that are present.
    pub fn new(name: Option<String>, category: Option<String>) -> Result<Self, FieldError> {
        Ok(Self {
            name: name.map(|value| require_text("nome", value)).transpose()?,
            category: category
                .map(|value| require_text("categoria", value))
                .transpose()?,
        })
    }

    /// New name, if changing.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// New category, if changing.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// True when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none()
    }

    /// Apply the changes to an in-memory parameter.
    pub fn apply_to(&self, parameter: &mut Parameter) {
        if let Some(name) = &self.name {
            parameter.name.clone_from(name);
        }
        if let Some(category) = &self.category {
            parameter.category.clone_from(category);
        }
    }
}
