//! Build URLs whose query string is encoded from a typed record.
//!
//! ```
//! use frisbee_core::build_url;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct MovieQuery {
//!     page: u32,
//!     #[serde(rename = "key_access")]
//!     access_key: String,
//!     optional_int: Option<i64>,
//! }
//!
//! let query = MovieQuery {
//!     page: 1,
//!     access_key: "a1d13so979".to_string(),
//!     optional_int: None,
//! };
//!
//! let url = build_url("http://www.example.com", &query).unwrap();
//! assert_eq!(url.as_str(), "http://www.example.com/?page=1&key_access=a1d13so979");
//! ```

use crate::config::{BuilderConfig, ExistingQuery};
use crate::encoder;
use crate::error::{Error, Result};
use crate::query::{QueryParams, QueryRecord};
use crate::validate::check_uri_chars;
use serde::Serialize;
use std::fmt::Display;
use url::Url;

/// Build a URL from `base` and a serde-serializable record using the default
/// configuration.
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`] if `base` is not a valid absolute URL, and
/// [`Error::UnsupportedValue`] or [`Error::DuplicateField`] if the record
/// cannot be encoded.
pub fn build_url<T>(base: &str, query: &T) -> Result<Url>
where
    T: Serialize + ?Sized,
{
    UrlWithQueryBuilder::new().build(base, query)
}

/// Appends a record's present fields to a parsed base URL.
///
/// The builder holds only its configuration and may be shared freely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlWithQueryBuilder {
    config: BuilderConfig,
}

impl UrlWithQueryBuilder {
    /// Create a builder with the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            config: BuilderConfig::new(),
        }
    }

    /// Create a builder with the given configuration.
    #[must_use]
    pub const fn with_config(config: BuilderConfig) -> Self {
        Self { config }
    }

    /// Return the active configuration.
    #[must_use]
    pub const fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Build a URL from a serde-serializable record.
    ///
    /// Fields are taken in declaration order under their serialized names;
    /// `None` fields are left out entirely.
    ///
    /// # Errors
    ///
    /// See [`build_url`].
    pub fn build<T>(&self, base: &str, query: &T) -> Result<Url>
    where
        T: Serialize + ?Sized,
    {
        let mut url = self.parse_base(base)?;
        let params = encoder::to_params(query)?;
        self.append(&mut url, &params)?;
        Ok(url)
    }

    /// Build a URL from a record that declares its own fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] for a bad base and
    /// [`Error::DuplicateField`] if the record repeats a wire name.
    pub fn build_record<R>(&self, base: &str, record: &R) -> Result<Url>
    where
        R: QueryRecord + ?Sized,
    {
        self.build_with_params(base, &record.to_query_params())
    }

    /// Build a URL from already collected parameters.
    ///
    /// # Errors
    ///
    /// See [`UrlWithQueryBuilder::build_record`].
    pub fn build_with_params(&self, base: &str, params: &QueryParams) -> Result<Url> {
        let mut url = self.parse_base(base)?;
        self.append(&mut url, params)?;
        Ok(url)
    }

    /// Parse and validate a base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the string fails the strict character
    /// check (when enabled) or cannot be parsed as an absolute URL.
    pub fn parse_base(&self, base: &str) -> Result<Url> {
        if self.config.strict {
            check_uri_chars(base).map_err(|e| reject(base, e))?;
        }
        Url::parse(base).map_err(|e| reject(base, e))
    }

    fn append(&self, url: &mut Url, params: &QueryParams) -> Result<()> {
        if let Some(name) = params.first_duplicate() {
            return Err(Error::DuplicateField(name.to_string()));
        }

        match self.config.existing_query {
            ExistingQuery::Replace => url.set_query(None),
            ExistingQuery::Append => drop_shadowed_pairs(url, params),
        }

        // An untouched query keeps the URL free of a dangling `?`.
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in params.pairs() {
                pairs.append_pair(name, value);
            }
        }

        tracing::debug!(url = %url, pairs = params.len(), "built URL with query");
        Ok(())
    }
}

// Existing pairs named like a record field give way to the record's value.
fn drop_shadowed_pairs(url: &mut Url, params: &QueryParams) {
    if !url.query_pairs().any(|(name, _)| params.get(&name).is_some()) {
        return;
    }

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .into_owned()
        .filter(|(name, _)| params.get(name).is_none())
        .collect();

    url.set_query(None);
    if !kept.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in &kept {
            pairs.append_pair(name, value);
        }
    }
}

fn reject(base: &str, reason: impl Display) -> Error {
    let reason = reason.to_string();
    tracing::warn!(url = base, error = %reason, "rejected base URL");
    Error::invalid_url(base, reason)
}
