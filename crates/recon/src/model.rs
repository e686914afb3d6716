use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single cell as handed over by the file parsers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Text rendering used for every comparison. Integral numbers drop the
    /// decimal point.
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// One row of a dataset: ordered `(label, value)` columns.
///
/// Column order is kept so that headerless sheets can still be read
/// positionally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub columns: Vec<(String, CellValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style column append.
    pub fn with(mut self, label: &str, value: impl Into<CellValue>) -> Self {
        self.push(label, value);
        self
    }

    pub fn push(&mut self, label: &str, value: impl Into<CellValue>) {
        self.columns.push((label.to_string(), value.into()));
    }

    /// Value of the first column labelled exactly `label`.
    pub fn get(&self, label: &str) -> Option<&CellValue> {
        self.columns
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v)
    }

    /// Value of the i-th column regardless of its label.
    pub fn get_index(&self, index: usize) -> Option<&CellValue> {
        self.columns.get(index).map(|(_, v)| v)
    }

    /// Text of a named column, empty when absent.
    pub fn text(&self, label: &str) -> String {
        self.get(label).map(CellValue::as_text).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<L: AsRef<str>, V: Into<CellValue>> FromIterator<(L, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (L, V)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(l, v)| (l.as_ref().to_string(), v.into()))
                .collect(),
        }
    }
}

/// Ordered rows from one source (roster, sign-in log, schedule sheet, PTO).
pub type Dataset = Vec<Record>;

/// Recognized column labels.
pub mod columns {
    pub const FIRST_NAME: &str = "First Name";
    pub const LAST_NAME: &str = "Last Name";
    pub const DEPARTMENT: &str = "Department";
    pub const JOB_TITLE: &str = "Job Title Description";
    pub const LOCATION: &str = "School Location";
    pub const STATUS: &str = "Status";
    pub const DATE_IN: &str = "Date In";
    pub const TIME_IN: &str = "In";
    pub const SCHEDULE: &str = "Schedule";
    pub const DATE: &str = "Date";
}

/// Everything one attendance run needs. `sign_ins` and `roster` are
/// required; the reconciler rejects the run when either is `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttendanceInput<'a> {
    pub sign_ins: Option<&'a [Record]>,
    pub roster: Option<&'a [Record]>,
    pub pto: Option<&'a [Record]>,
    pub check_date: &'a str,
}

// ---------------------------------------------------------------------------
// Time + shift
// ---------------------------------------------------------------------------

/// Hour/minute pair pulled out of a sign-in time string. Not range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hours: u32,
    pub minutes: u32,
}

impl TimeOfDay {
    pub fn minutes_since_midnight(&self) -> u32 {
        self.hours.saturating_mul(60).saturating_add(self.minutes)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hours, self.minutes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftCategory {
    Instructional,
    NonInstructional,
}

impl fmt::Display for ShiftCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instructional => write!(f, "Instructional"),
            Self::NonInstructional => write!(f, "Non-Instructional"),
        }
    }
}

/// Expected start for a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shift {
    pub category: ShiftCategory,
    pub expected_minutes: u32,
    pub expected_label: String,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LateRecord {
    pub name: String,
    pub sign_in_time: String,
    pub expected_time: String,
    pub minutes_late: u32,
    pub department: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoSignInRecord {
    pub name: String,
    pub department: String,
    pub title: String,
    pub location: String,
}

/// Rows that were counted or dropped without becoming a late/on-time
/// outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconDiagnostics {
    pub rows_skipped_incomplete: usize,
    pub rows_other_date: usize,
    pub time_parse_failures: usize,
    pub unmatched_sign_ins: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceReport {
    pub check_date: String,
    /// Most minutes late first; ties keep sign-in row order.
    pub late_arrivals: Vec<LateRecord>,
    /// Alphabetical by name.
    pub no_sign_ins: Vec<NoSignInRecord>,
    pub on_time_count: usize,
    /// Distinct normalized names signed in on the check date.
    pub total_signed_in_count: usize,
    /// Approved PTO entries supplied, regardless of date.
    pub pto_count: usize,
    pub diagnostics: ReconDiagnostics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleSource {
    ScheduleSheet,
    DepartmentDefault,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleInfo {
    pub name: String,
    pub title: String,
    pub department: String,
    pub location: String,
    pub schedule: String,
    pub source: ScheduleSource,
}
