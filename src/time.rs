use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer};

/// Wire format for date-only values (`2020-04-27`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format for timestamps (`2020-04-26 22:36:11`)
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date argument accepted by range-query methods.
///
/// Built from a pre-formatted `YYYY-MM-DD` string or any chrono date/datetime
/// value; datetime values are truncated to their date, the time-of-day is
/// discarded before the value reaches the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateArg {
    Formatted(String),
    Day(NaiveDate),
}

impl DateArg {
    /// Render as the `YYYY-MM-DD` string inserted into query parameters
    pub fn format(&self) -> String {
        match self {
            DateArg::Formatted(s) => s.clone(),
            DateArg::Day(d) => d.format(DATE_FORMAT).to_string(),
        }
    }
}

impl From<&str> for DateArg {
    fn from(s: &str) -> Self {
        DateArg::Formatted(s.to_string())
    }
}

impl From<String> for DateArg {
    fn from(s: String) -> Self {
        DateArg::Formatted(s)
    }
}

impl From<NaiveDate> for DateArg {
    fn from(d: NaiveDate) -> Self {
        DateArg::Day(d)
    }
}

impl From<NaiveDateTime> for DateArg {
    fn from(dt: NaiveDateTime) -> Self {
        DateArg::Day(dt.date())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateArg {
    fn from(dt: DateTime<Tz>) -> Self {
        DateArg::Day(dt.date_naive())
    }
}

/// Deserialize a timestamp that the service renders either as
/// `YYYY-MM-DD HH:MM:SS` or as a bare `YYYY-MM-DD`
pub fn deserialize_datetime_loose<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(dt) = NaiveDateTime::parse_from_str(&raw, DATETIME_FORMAT) {
        return Ok(dt);
    }
    NaiveDate::parse_from_str(&raw, DATE_FORMAT)
        .map(|d| d.and_hms_opt(0, 0, 0).unwrap())
        .map_err(serde::de::Error::custom)
}
