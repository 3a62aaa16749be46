//! Ordered query parameters and the records that produce them.
//!
//! A record is a sequence of fields, each with a wire name and a value that
//! may be absent. [`QueryParams`] keeps only the present values, in the
//! order they were added.

use crate::value::QueryValue;
use std::collections::HashSet;

/// One declared field of a record: its wire name and optional value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryField {
    /// External key used in the query string.
    pub name: String,
    /// Rendered value, or `None` when the field is absent.
    pub value: Option<String>,
}

impl QueryField {
    /// A field carrying a value.
    pub fn present(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// A field with no value.
    pub fn absent(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// Returns true if the field carries a value.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.value.is_some()
    }
}

/// Types that declare their query fields explicitly instead of through serde.
///
/// ```
/// use frisbee_core::query::{QueryParams, QueryRecord};
///
/// struct MovieQuery {
///     page: u32,
///     key_access: String,
///     optional_int: Option<i64>,
/// }
///
/// impl QueryRecord for MovieQuery {
///     fn to_query_params(&self) -> QueryParams {
///         let mut params = QueryParams::new();
///         params.push("page", self.page);
///         params.push("key_access", self.key_access.as_str());
///         params.push_opt("optional_int", self.optional_int);
///         params
///     }
/// }
/// ```
pub trait QueryRecord {
    /// Return the record's present fields in declaration order.
    fn to_query_params(&self) -> QueryParams;
}

/// Builder for assembling query parameter pairs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a key/value pair when the value is present.
    pub fn push_opt<T>(&mut self, key: impl Into<String>, value: Option<T>)
    where
        T: QueryValue,
    {
        if let Some(value) = value {
            self.pairs.push((key.into(), value.to_query_value()));
        }
    }

    /// Append using a mapping function when the value is present.
    pub fn push_opt_with<T, F>(&mut self, key: impl Into<String>, value: Option<T>, mut map: F)
    where
        F: FnMut(T) -> String,
    {
        if let Some(value) = value {
            self.pairs.push((key.into(), map(value)));
        }
    }

    /// Append a required key/value pair.
    pub fn push<T>(&mut self, key: impl Into<String>, value: T)
    where
        T: QueryValue,
    {
        self.pairs.push((key.into(), value.to_query_value()));
    }

    /// Append a field, skipping it when absent.
    pub fn push_field(&mut self, field: QueryField) {
        if let Some(value) = field.value {
            self.pairs.push((field.name, value));
        } else {
            tracing::trace!(field = %field.name, "omitting absent query field");
        }
    }

    /// Value for `key`, if one was added.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// First key that appears more than once, if any.
    #[must_use]
    pub fn first_duplicate(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.pairs
            .iter()
            .map(|(name, _)| name.as_str())
            .find(|name| !seen.insert(*name))
    }

    /// Borrow the collected key/value pairs.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Return the collected key/value pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }

    /// Number of collected pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl FromIterator<QueryField> for QueryParams {
    fn from_iter<I: IntoIterator<Item = QueryField>>(iter: I) -> Self {
        let mut params = Self::new();
        for field in iter {
            params.push_field(field);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::{QueryField, QueryParams};

    #[test]
    fn absent_optional_int_adds_no_pair() {
        let mut params = QueryParams::new();
        params.push("page", 1u32);
        params.push_opt("optional_int", Option::<i64>::None);
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("optional_int"), None);
    }

    #[test]
    fn push_opt_renders_with_query_value() {
        let mut params = QueryParams::new();
        params.push_opt("ratio", Some(2.0f64));
        params.push_opt("enabled", Some(false));
        params.push_opt_with("key_access", Some("A1D13"), str::to_lowercase);
        assert_eq!(
            params.into_pairs(),
            vec![
                ("ratio".to_string(), "2".to_string()),
                ("enabled".to_string(), "false".to_string()),
                ("key_access".to_string(), "a1d13".to_string()),
            ]
        );
    }

    #[test]
    fn push_keeps_insertion_order() {
        let mut params = QueryParams::new();
        params.push("page", 1);
        params.push("key_access", "a1d13so979");
        params.push_opt("optional_int", Some(10));
        let names: Vec<&str> = params.pairs().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, ["page", "key_access", "optional_int"]);
        assert_eq!(params.get("optional_int"), Some("10"));
    }

    #[test]
    fn absent_fields_are_dropped() {
        let params: QueryParams = vec![
            QueryField::present("page", "1"),
            QueryField::absent("optional_int"),
        ]
        .into_iter()
        .collect();
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("optional_int"), None);
    }

    #[test]
    fn empty_string_is_present() {
        let mut params = QueryParams::new();
        params.push_opt("q", Some(""));
        assert_eq!(params.get("q"), Some(""));
    }

    #[test]
    fn first_duplicate_reports_repeated_key() {
        let mut params = QueryParams::new();
        params.push("a", 1);
        params.push("b", 2);
        assert_eq!(params.first_duplicate(), None);
        params.push("a", 3);
        assert_eq!(params.first_duplicate(), Some("a"));
    }
}
