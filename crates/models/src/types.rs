//! Shared value types used across several model families.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp, RFC 3339 on the wire.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly; the underlying representation can change without affecting the
/// model API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Parses an RFC 3339 string, normalising the offset to UTC.
    pub fn parse_rfc3339(s: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| Self(dt.with_timezone(&Utc)))
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

// ---------------------------------------------------------------------------
// Free-form maps
// ---------------------------------------------------------------------------

/// Per-principal permission overrides: `"u/alice" -> true` grants write,
/// `false` grants read only.
pub type ExtraPerms = BTreeMap<String, bool>;

/// Free-form arguments passed to a script or flow.
pub type Args = serde_json::Map<String, Value>;

// ---------------------------------------------------------------------------
// Paging
// ---------------------------------------------------------------------------

/// Page selection for list endpoints. The server defaults to 1000 items per
/// page and caps the page size at 10000.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    /// One-based page number.
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

impl Pagination {
    /// Largest page size the server accepts.
    pub const MAX_PER_PAGE: u32 = 10_000;

    /// Selects `page` with `per_page` items, clamping to the server maximum.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page.min(Self::MAX_PER_PAGE)),
        }
    }

    /// Query pairs for the selected page; unset values are not sent.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        [("page", self.page), ("per_page", self.per_page)]
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| (k, v.to_string())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_round_trips_through_json() {
        let ts = Timestamp::parse_rfc3339("2024-05-01T10:00:00+02:00").unwrap();
        assert_eq!(ts.to_string(), "2024-05-01T08:00:00+00:00");
        let encoded = serde_json::to_string(&ts).unwrap();
        let decoded: Timestamp = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, ts);
    }

    #[test]
    fn page_size_is_clamped() {
        assert_eq!(Pagination::new(2, 50_000).per_page, Some(10_000));
        assert_eq!(Pagination::default().page, None);
    }

    #[test]
    fn only_selected_page_fields_are_sent() {
        assert!(Pagination::default().to_query().is_empty());
        let page = Pagination {
            page: Some(3),
            per_page: None,
        };
        assert_eq!(page.to_query(), vec![("page", "3".to_string())]);
    }
}
