use crate::config::ShiftPolicy;
use crate::error::ReconError;
use crate::extract::{extract_text, SCHEDULE};
use crate::matcher::NameIndex;
use crate::model::{Record, ScheduleInfo, ScheduleSource};
use crate::normalize::normalize;
use crate::roster::PersonRecord;

/// Header label that shows up in the schedule column of a stray header row.
const HEADER_SCHEDULE_LABEL: &str = "schedule";

/// "What is X's schedule" with the standard shift windows.
pub fn lookup(
    search: &str,
    roster: Option<&[Record]>,
    schedule: Option<&[Record]>,
) -> Result<Vec<ScheduleInfo>, ReconError> {
    lookup_with(search, roster, schedule, &ShiftPolicy::default())
}

/// Every roster person whose full name contains `search` (case-insensitive),
/// in roster order, with their schedule.
///
/// The schedule comes from the schedule sheet when that person has a usable
/// entry there; otherwise it is the department's default shift window.
pub fn lookup_with(
    search: &str,
    roster: Option<&[Record]>,
    schedule: Option<&[Record]>,
    policy: &ShiftPolicy,
) -> Result<Vec<ScheduleInfo>, ReconError> {
    let needle = normalize(search);
    if needle.is_empty() {
        return Err(ReconError::EmptyQuery);
    }
    let roster = roster.ok_or_else(|| ReconError::MissingInputs {
        missing: vec!["roster"],
    })?;

    let index = schedule.map(NameIndex::build);

    let results: Vec<ScheduleInfo> = roster
        .iter()
        .map(PersonRecord::from_record)
        .filter(|p| p.key().full().contains(&needle))
        .map(|p| {
            let listed = index
                .as_ref()
                .and_then(|idx| idx.find(&p.first_name, &p.last_name))
                .map(|rec| extract_text(rec, SCHEDULE))
                .filter(|s| !s.trim().is_empty() && s.to_lowercase() != HEADER_SCHEDULE_LABEL);

            let (schedule, source) = match listed {
                Some(s) => (s, ScheduleSource::ScheduleSheet),
                None => {
                    log::debug!("no schedule entry for {}, using department default", p.name());
                    (policy.default_schedule(&p.department), ScheduleSource::DepartmentDefault)
                }
            };

            ScheduleInfo {
                name: p.name(),
                title: p.job_title,
                department: p.department,
                location: p.location,
                schedule,
                source,
            }
        })
        .collect();

    log::debug!("schedule lookup '{search}': {} match(es)", results.len());
    Ok(results)
}
