//! Date parsing and rendering for the JSON contract.
//!
//! Calendar dates travel as `YYYY-MM-DD`; the soft-delete timestamp travels
//! as `YYYY-MM-DD HH:MM:SS` (UTC).

use crate::error::CoreError;
use crate::types::{Date, Timestamp};

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format for timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a `YYYY-MM-DD` date for the named field.
pub fn parse_date(field: &str, raw: &str) -> Result<Date, CoreError> {
    Date::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        CoreError::Validation(format!("Invalid {field} format. Use YYYY-MM-DD."))
    })
}

/// Parse an optional date field, passing `None` through.
pub fn parse_optional_date(field: &str, raw: Option<&str>) -> Result<Option<Date>, CoreError> {
    raw.map(|r| parse_date(field, r)).transpose()
}

pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_timestamp(ts: Timestamp) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Serde adapter rendering an optional timestamp as `YYYY-MM-DD HH:MM:SS`.
pub mod opt_timestamp {
    use serde::Serializer;

    use crate::types::Timestamp;

    pub fn serialize<S: Serializer>(value: &Option<Timestamp>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => s.serialize_str(&super::format_timestamp(*ts)),
            None => s.serialize_none(),
        }
    }
}

/// Serde adapter rendering an absent text value as an empty string.
pub mod empty_if_none {
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.as_deref().unwrap_or(""))
    }
}
