//! Typed views over raw records from each source.

use crate::extract::{extract_text, FIRST_NAME, LAST_NAME};
use crate::model::{columns, Record};
use crate::normalize::{display_name, NameKey};

/// A row of the master staff roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRecord {
    pub first_name: String,
    pub last_name: String,
    pub department: String,
    pub job_title: String,
    pub location: String,
    pub status: String,
}

impl PersonRecord {
    pub fn from_record(record: &Record) -> Self {
        Self {
            first_name: extract_text(record, FIRST_NAME).trim().to_string(),
            last_name: extract_text(record, LAST_NAME).trim().to_string(),
            department: record.text(columns::DEPARTMENT),
            job_title: record.text(columns::JOB_TITLE),
            location: record.text(columns::LOCATION),
            status: record.text(columns::STATUS),
        }
    }

    pub fn key(&self) -> NameKey {
        NameKey::new(&self.first_name, &self.last_name)
    }

    pub fn name(&self) -> String {
        display_name(&self.first_name, &self.last_name)
    }

    pub fn has_name(&self) -> bool {
        !self.first_name.is_empty() && !self.last_name.is_empty()
    }
}

/// A row of the sign-in log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInEvent {
    pub first_name: String,
    pub last_name: String,
    /// Trimmed; compared to the check date by string equality.
    pub date: String,
    /// Raw time cell, e.g. `07:55:00` or `7:55:00 AM`.
    pub time_in: String,
}

impl SignInEvent {
    pub fn from_record(record: &Record) -> Self {
        Self {
            first_name: record.text(columns::FIRST_NAME).trim().to_string(),
            last_name: record.text(columns::LAST_NAME).trim().to_string(),
            date: record.text(columns::DATE_IN).trim().to_string(),
            time_in: record.text(columns::TIME_IN),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.first_name.is_empty()
            && !self.last_name.is_empty()
            && !self.date.is_empty()
            && !self.time_in.is_empty()
    }

    pub fn key(&self) -> NameKey {
        NameKey::new(&self.first_name, &self.last_name)
    }

    pub fn name(&self) -> String {
        display_name(&self.first_name, &self.last_name)
    }
}

/// A row of the approved-leave list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PtoEntry {
    pub first_name: String,
    pub last_name: String,
    pub date: String,
    pub status: String,
}

impl PtoEntry {
    pub fn from_record(record: &Record) -> Self {
        Self {
            first_name: record.text(columns::FIRST_NAME).trim().to_string(),
            last_name: record.text(columns::LAST_NAME).trim().to_string(),
            date: record.text(columns::DATE).trim().to_string(),
            status: record.text(columns::STATUS),
        }
    }

    pub fn key(&self) -> NameKey {
        NameKey::new(&self.first_name, &self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_fields_from_named_columns() {
        let rec = Record::new()
            .with("First Name", " Jane ")
            .with("Last Name", "Doe")
            .with("Department", "Counseling")
            .with("Job Title Description", "Counselor")
            .with("School Location", "North HS")
            .with("Status", "Existing");
        let p = PersonRecord::from_record(&rec);
        assert_eq!(p.name(), "Jane Doe");
        assert_eq!(p.key(), NameKey::new("jane", "doe"));
        assert_eq!(p.location, "North HS");
        assert!(p.has_name());
    }

    #[test]
    fn sign_in_completeness() {
        let full = Record::new()
            .with("First Name", "Sam")
            .with("Last Name", "Lee")
            .with("Date In", " 2025-10-09 ")
            .with("In", "08:45:00");
        let ev = SignInEvent::from_record(&full);
        assert!(ev.is_complete());
        assert_eq!(ev.date, "2025-10-09");

        let blank_time = Record::new()
            .with("First Name", "Sam")
            .with("Last Name", "Lee")
            .with("Date In", "2025-10-09")
            .with("In", "  ");
        assert!(SignInEvent::from_record(&blank_time).is_complete());

        let no_time = Record::new()
            .with("First Name", "Sam")
            .with("Last Name", "Lee")
            .with("Date In", "2025-10-09");
        assert!(!SignInEvent::from_record(&no_time).is_complete());
    }
}
