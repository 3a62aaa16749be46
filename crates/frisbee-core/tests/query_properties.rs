//! Property-based tests for query URL construction.
//!
//! Generated records and base URLs check that present fields always appear
//! under their wire names, absent fields never appear, and the non-query
//! parts of the base URL survive unchanged.

use frisbee_core::{build_url, Url};
use proptest::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
struct Record {
    page: u32,
    #[serde(rename = "key_access")]
    access_key: String,
    #[serde(rename = "optional_int")]
    optional: Option<i64>,
    enabled: bool,
    ratio: Option<f64>,
}

/// Strategies for generating records and base URLs.
mod strategies {
    use super::*;

    pub fn base_url() -> impl Strategy<Value = String> {
        (
            prop::sample::select(vec!["http", "https"]),
            prop::collection::vec("[a-z][a-z0-9]{0,10}", 1..4),
            prop::option::of(1u16..),
            prop::collection::vec("[a-zA-Z0-9_.~-]{1,8}", 0..4),
        )
            .prop_map(|(scheme, labels, port, segments)| {
                let mut url = format!("{scheme}://{}", labels.join("."));
                if let Some(port) = port {
                    url.push_str(&format!(":{port}"));
                }
                for segment in segments {
                    url.push('/');
                    url.push_str(&segment);
                }
                url
            })
    }

    pub fn record() -> impl Strategy<Value = Record> {
        (
            any::<u32>(),
            ".*",
            any::<Option<i64>>(),
            any::<bool>(),
            prop::option::of(any::<f64>().prop_filter("finite", |v| v.is_finite())),
        )
            .prop_map(|(page, access_key, optional, enabled, ratio)| Record {
                page,
                access_key,
                optional,
                enabled,
                ratio,
            })
    }
}

fn pairs(url: &Url) -> HashMap<String, String> {
    url.query_pairs().into_owned().collect()
}

proptest! {
    #[test]
    fn present_fields_round_trip(base in strategies::base_url(), record in strategies::record()) {
        let url = build_url(&base, &record).unwrap();
        let pairs = pairs(&url);

        prop_assert_eq!(pairs.get("page").cloned(), Some(record.page.to_string()));
        prop_assert_eq!(pairs.get("key_access").cloned(), Some(record.access_key.clone()));
        prop_assert_eq!(pairs.get("enabled").cloned(), Some(record.enabled.to_string()));
        if let Some(optional) = record.optional {
            prop_assert_eq!(pairs.get("optional_int").cloned(), Some(optional.to_string()));
        }
        if let Some(ratio) = record.ratio {
            let parsed: f64 = pairs["ratio"].parse().unwrap();
            prop_assert_eq!(parsed, ratio);
        }
    }

    #[test]
    fn absent_fields_never_appear(base in strategies::base_url(), record in strategies::record()) {
        let url = build_url(&base, &record).unwrap();
        let pairs = pairs(&url);

        prop_assert_eq!(pairs.contains_key("optional_int"), record.optional.is_some());
        prop_assert_eq!(pairs.contains_key("ratio"), record.ratio.is_some());
        prop_assert!(!pairs.contains_key("access_key"));
        prop_assert!(!pairs.contains_key("optional"));
    }

    #[test]
    fn base_components_preserved(base in strategies::base_url(), record in strategies::record()) {
        let parsed = Url::parse(&base).unwrap();
        let url = build_url(&base, &record).unwrap();

        prop_assert_eq!(url.scheme(), parsed.scheme());
        prop_assert_eq!(url.host_str(), parsed.host_str());
        prop_assert_eq!(url.port(), parsed.port());
        prop_assert_eq!(url.path(), parsed.path());
        prop_assert_eq!(url.fragment(), parsed.fragment());
    }

    #[test]
    fn entries_follow_declaration_order(base in strategies::base_url(), record in strategies::record()) {
        let url = build_url(&base, &record).unwrap();
        let names: Vec<String> = url.query_pairs().map(|(k, _)| k.into_owned()).collect();

        let expected: Vec<&str> = [
            Some("page"),
            Some("key_access"),
            record.optional.map(|_| "optional_int"),
            Some("enabled"),
            record.ratio.map(|_| "ratio"),
        ]
        .into_iter()
        .flatten()
        .collect();
        prop_assert_eq!(names, expected);
    }

    #[test]
    fn non_ascii_base_rejected(host in "[a-z]{1,5}[çøµ∫®é]{1,3}[a-z]{0,5}", record in strategies::record()) {
        let err = build_url(&format!("http://{host}.com"), &record).unwrap_err();
        prop_assert!(err.is_invalid_url());
    }
}
