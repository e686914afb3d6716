use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level policy
// ---------------------------------------------------------------------------

/// Classification and filtering rules for one attendance run.
///
/// Every field defaults to the district rules, so an empty TOML document
/// (or `AttendancePolicy::default()`) gives the standard 7:50 / 8:30 split.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AttendancePolicy {
    pub shift: ShiftPolicy,
    pub roster: RosterPolicy,
    pub pto: PtoPolicy,
}

// ---------------------------------------------------------------------------
// Shift
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShiftPolicy {
    pub instructional: InstructionalShift,
    pub non_instructional: ShiftWindow,
}

impl Default for ShiftPolicy {
    fn default() -> Self {
        Self {
            instructional: InstructionalShift::default(),
            non_instructional: ShiftWindow::default(),
        }
    }
}

/// Department substrings (case-insensitive) that put a person on the
/// instructional shift, plus that shift's window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstructionalShift {
    pub keywords: Vec<String>,
    pub start: ClockLabel,
    pub end: ClockLabel,
}

impl Default for InstructionalShift {
    fn default() -> Self {
        Self {
            keywords: ["instructional", "support services", "curriculum", "counseling"]
                .into_iter()
                .map(String::from)
                .collect(),
            start: ClockLabel::fixed("7:50 AM", 7 * 60 + 50),
            end: ClockLabel::fixed("3:50 PM", 15 * 60 + 50),
        }
    }
}

impl InstructionalShift {
    pub fn window(&self) -> ShiftWindow {
        ShiftWindow {
            start: self.start.clone(),
            end: self.end.clone(),
        }
    }
}

/// Start and end of a shift. Missing fields fall back to the
/// non-instructional 8:30 AM - 4:30 PM window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShiftWindow {
    pub start: ClockLabel,
    pub end: ClockLabel,
}

impl Default for ShiftWindow {
    fn default() -> Self {
        Self {
            start: ClockLabel::fixed("8:30 AM", 8 * 60 + 30),
            end: ClockLabel::fixed("4:30 PM", 16 * 60 + 30),
        }
    }
}

/// A 12-hour clock label such as `7:50 AM`, kept verbatim for display and
/// parsed once into minutes since midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockLabel {
    label: String,
    minutes: u32,
}

impl ClockLabel {
    fn fixed(label: &str, minutes: u32) -> Self {
        Self {
            label: label.to_string(),
            minutes,
        }
    }

    pub fn parse(label: &str) -> Result<Self, ReconError> {
        let trimmed = label.trim();
        let time = NaiveTime::parse_from_str(trimmed, "%I:%M %p").map_err(|_| {
            ReconError::ConfigValidation(format!(
                "cannot parse clock label '{label}' (expected e.g. \"7:50 AM\")"
            ))
        })?;
        Ok(Self {
            label: trimmed.to_string(),
            minutes: time.hour() * 60 + time.minute(),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }
}

impl TryFrom<String> for ClockLabel {
    type Error = ReconError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ClockLabel> for String {
    fn from(value: ClockLabel) -> Self {
        value.label
    }
}

impl fmt::Display for ClockLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

// ---------------------------------------------------------------------------
// Roster + PTO
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RosterPolicy {
    /// Case-insensitive substrings of `Status` that mark a person active.
    pub active_status_markers: Vec<String>,
}

impl Default for RosterPolicy {
    fn default() -> Self {
        Self {
            active_status_markers: vec!["existing".into(), "new hire".into()],
        }
    }
}

impl RosterPolicy {
    pub fn is_active(&self, status: &str) -> bool {
        let status = status.to_lowercase();
        self.active_status_markers
            .iter()
            .any(|m| status.contains(&m.to_lowercase()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PtoPolicy {
    /// Only PTO entries whose trimmed `Status` equals this are counted.
    pub approved_status: String,
}

impl Default for PtoPolicy {
    fn default() -> Self {
        Self {
            approved_status: "Approved".into(),
        }
    }
}

impl PtoPolicy {
    pub fn is_approved(&self, status: &str) -> bool {
        status.trim() == self.approved_status
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl AttendancePolicy {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let policy: AttendancePolicy =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn to_toml(&self) -> Result<String, ReconError> {
        toml::to_string_pretty(self).map_err(|e| ReconError::ConfigParse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        let keywords = &self.shift.instructional.keywords;
        if keywords.is_empty() {
            return Err(ReconError::ConfigValidation(
                "shift.instructional.keywords must not be empty".into(),
            ));
        }
        if keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ReconError::ConfigValidation(
                "shift.instructional.keywords must not contain blank entries".into(),
            ));
        }

        if self.roster.active_status_markers.is_empty()
            || self.roster.active_status_markers.iter().any(|m| m.trim().is_empty())
        {
            return Err(ReconError::ConfigValidation(
                "roster.active_status_markers needs at least one non-blank marker".into(),
            ));
        }

        if self.pto.approved_status.trim().is_empty() {
            return Err(ReconError::ConfigValidation(
                "pto.approved_status must not be blank".into(),
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
