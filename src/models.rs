//! Typed records for the diary API resources.
//!
//! Field names follow the wire format; mapping is strict, so a missing
//! required field is a schema error rather than a silent default. Only the
//! fields the service documents as optional (a lesson's `topic` and `task`,
//! a task's `test_id`) are `Option`.

use crate::time::deserialize_datetime_loose;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use std::collections::HashMap;

/// One student record visible under an account.
///
/// A parent ("applicant") account carries several of these; a student
/// account carries exactly one, built from the `user/` payload itself.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: i64,
    pub status: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub school: String,
    pub school_is_tourniquet: bool,
    pub readonly: bool,
    pub school_is_food: bool,
    pub group: String,
    pub gps_tracker: bool,
}

/// Mail message from the `mail/` endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Letter {
    pub id: i64,
    #[serde(deserialize_with = "deserialize_datetime_loose")]
    pub post_date: NaiveDateTime,
    pub author: String,
    pub read: bool,
    pub text: String,
    pub clean_text: String,
    pub subject: String,
}

/// Period-end (quarterly) final grades: subject name to final mark
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ControlmarksPeriod {
    pub marks: HashMap<String, String>,
    /// Roman numeral of the period ("I", "II", ...)
    pub rom: String,
    pub period: i32,
    pub title: String,
}

/// Assignment attached to a lesson
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub doc: bool,
    pub requires_solutions: bool,
    pub deadline: NaiveDate,
    pub test_id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: String,
}

/// One scheduled class occurrence from the `timetable/` endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Lesson {
    pub id: i64,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub task: Option<Task>,
    pub time_start: NaiveTime,
    pub time_end: NaiveTime,
    pub date: NaiveDate,
    pub subject: String,
    pub staff: String,
}

/// One graded assessment event.
///
/// `mark` stays a string: the service hands out both numeric grades and
/// symbolic ones (pass/fail notations).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Mark {
    pub question_name: String,
    pub question_id: i64,
    pub number: i32,
    pub question_type: String,
    pub mark: String,
}

/// Per-subject ranking and averages inside a [`Progress`] report
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProgressSubject {
    pub subject: String,
    pub place_count: i64,
    pub place: i64,
    pub group_avg: f64,
    pub child_avg: f64,
    pub parallels_avg: f64,
}

/// Class ranking and averages for a given date
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Progress {
    pub period_name: String,
    pub place_count: i64,
    pub place: i64,
    pub group_avg: f64,
    pub child_avg: f64,
    pub parallels_avg: f64,
    pub subjects: Vec<ProgressSubject>,
}

/// Cafeteria account balance
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FoodInfo {
    pub subsidy: i64,
    pub account: i64,
    pub total_take_off: i64,
    pub total_add: i64,
    pub balance_on_start_year: i64,
    pub balance: i64,
    pub default_complex: String,
}

/// One historical per-day meal record
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FoodHistoryEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub state: i64,
    pub state_str: String,
    #[serde(rename = "complex__code")]
    pub complex_code: String,
    #[serde(rename = "complex__uid")]
    pub complex_uid: String,
    #[serde(rename = "complex__name")]
    pub complex_name: String,
}

/// School announcement from the `news/` endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewsItem {
    pub id: i64,
    pub title: String,
    /// Body with HTML tags stripped
    pub clean_text: String,
    pub author: String,
    pub school_name: String,
    pub school_id: i64,
    /// Raw HTML body
    pub text: String,
    pub date: NaiveDate,
    /// Kept verbatim: the service occasionally emits a malformed fractional
    /// second here ("15:50:270")
    pub pub_date: String,
}
