//! Configuration for [`UrlWithQueryBuilder`](crate::builder::UrlWithQueryBuilder).
//!
//! The configuration is plain data and deserializes from any serde format,
//! with every field optional.

use serde::{Deserialize, Serialize};

/// What to do with a query already present on the base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExistingQuery {
    /// Drop the existing pairs so the query holds only the record's pairs
    #[default]
    Replace,
    /// Keep existing pairs whose names the record does not use, then add the
    /// record's pairs after them
    Append,
}

/// Options controlling how base URLs are validated and queries are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Reject base strings that are not RFC 3986 character-clean
    #[serde(default = "default_strict")]
    pub strict: bool,

    /// Handling of a query already on the base URL
    #[serde(default)]
    pub existing_query: ExistingQuery,
}

const fn default_strict() -> bool {
    true
}

impl BuilderConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strict: default_strict(),
            existing_query: ExistingQuery::Replace,
        }
    }

    /// Enable or disable strict character validation.
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the handling of an existing query.
    #[must_use]
    pub const fn with_existing_query(mut self, mode: ExistingQuery) -> Self {
        self.existing_query = mode;
        self
    }
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self::new()
    }
}
