//! # frisbee-core
//!
//! Build URLs whose query string is encoded from a typed record.
//!
//! A record is any `serde::Serialize` struct or map, or a type implementing
//! [`QueryRecord`]. Every present field becomes one `name=value` pair under
//! its wire name, in declaration order; absent (`None`) fields are left out.
//!
//! ## Modules
//!
//! - [`builder`] - URL construction and base URL validation
//! - [`config`] - Builder configuration
//! - [`encoder`] - Field enumeration for serde records
//! - [`error`] - Error types and error codes
//! - [`query`] - Ordered query parameters and explicit records
//! - [`validate`] - RFC 3986 character checks
//! - [`value`] - Text form of scalar values

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod builder;
pub mod config;
pub mod encoder;
pub mod error;
pub mod query;
pub mod validate;
pub mod value;

// Re-export commonly used types
pub use builder::{build_url, UrlWithQueryBuilder};
pub use config::{BuilderConfig, ExistingQuery};
pub use error::{Error, Result};
pub use query::{QueryField, QueryParams, QueryRecord};
pub use url::Url;
