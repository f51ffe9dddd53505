//! Boundary validation for caller-supplied values.
//!
//! Anything outside the enumerated sort fields, sort orders, rule kinds and
//! severities is rejected here instead of falling back to a default.

use thiserror::Error;

/// Validation error for values crossing the core boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Sort field is not one of `date`, `sender`, `subject`.
    #[error("Unknown sort field: {0:?}")]
    UnknownSortField(String),
    /// Sort order is not one of `asc`, `desc`.
    #[error("Unknown sort order: {0:?}")]
    UnknownSortOrder(String),
    /// Rule kind is not one of `domain`, `address`, `keyword`.
    #[error("Unknown rule kind: {0:?}")]
    UnknownRuleKind(String),
    /// Severity is not one of `low`, `medium`, `high`.
    #[error("Unknown severity: {0:?}")]
    UnknownSeverity(String),
    /// Rule value is empty.
    #[error("Rule value is required")]
    EmptyRuleValue,
    /// Rule description is empty.
    #[error("Rule description is required")]
    EmptyRuleDescription,
    /// Two rules share an id.
    #[error("Duplicate rule id: {0}")]
    DuplicateRuleId(String),
}

impl ValidationError {
    /// Get the field name this error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::UnknownSortField(_) => "sort_field",
            Self::UnknownSortOrder(_) => "sort_order",
            Self::UnknownRuleKind(_) => "kind",
            Self::UnknownSeverity(_) => "severity",
            Self::EmptyRuleValue => "value",
            Self::EmptyRuleDescription => "description",
            Self::DuplicateRuleId(_) => "id",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names() {
        assert_eq!(
            ValidationError::UnknownSortField("size".into()).field(),
            "sort_field"
        );
        assert_eq!(ValidationError::EmptyRuleValue.field(), "value");
        assert_eq!(ValidationError::DuplicateRuleId("1".into()).field(), "id");
    }

    #[test]
    fn test_display_quotes_input() {
        let err = ValidationError::UnknownSortOrder("up".into());
        assert_eq!(err.to_string(), "Unknown sort order: \"up\"");
    }
}
