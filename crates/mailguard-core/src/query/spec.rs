//! Caller-supplied query parameters.

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Field a query result is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// Message timestamp.
    #[default]
    Date,
    /// Sender display name.
    Sender,
    /// Subject line.
    Subject,
}

impl std::str::FromStr for SortField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(Self::Date),
            "sender" => Ok(Self::Sender),
            "subject" => Ok(Self::Subject),
            _ => Err(ValidationError::UnknownSortField(s.to_string())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    #[default]
    Desc,
}

impl std::str::FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ValidationError::UnknownSortOrder(s.to_string())),
        }
    }
}

/// Filter and sort parameters for one query.
///
/// The default is the unfiltered inbox, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuerySpec {
    /// Free-text search; empty means no search.
    pub search: String,
    /// Include read messages.
    pub show_read: bool,
    /// Include unread messages.
    pub show_unread: bool,
    /// Only external senders.
    #[serde(rename = "showExternal")]
    pub show_external_only: bool,
    /// Sort key.
    pub sort_field: SortField,
    /// Sort direction.
    pub sort_order: SortOrder,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            search: String::new(),
            show_read: true,
            show_unread: true,
            show_external_only: false,
            sort_field: SortField::Date,
            sort_order: SortOrder::Desc,
        }
    }
}

impl QuerySpec {
    /// Set the search string.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Set the read/unread toggles.
    #[must_use]
    pub const fn with_read_state(mut self, show_read: bool, show_unread: bool) -> Self {
        self.show_read = show_read;
        self.show_unread = show_unread;
        self
    }

    /// Restrict to external senders.
    #[must_use]
    pub const fn external_only(mut self, external_only: bool) -> Self {
        self.show_external_only = external_only;
        self
    }

    /// Set the sort key and direction.
    #[must_use]
    pub const fn sorted_by(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort_field = field;
        self.sort_order = order;
        self
    }
}
