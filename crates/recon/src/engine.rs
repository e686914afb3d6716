use std::collections::HashSet;

use crate::config::AttendancePolicy;
use crate::error::ReconError;
use crate::matcher::NameIndex;
use crate::model::{
    AttendanceInput, AttendanceReport, LateRecord, NoSignInRecord, ReconDiagnostics, Record,
};
use crate::normalize::NameKey;
use crate::roster::{PersonRecord, PtoEntry, SignInEvent};
use crate::time::parse_time;

/// Daily attendance report with the standard policy.
pub fn reconcile(input: &AttendanceInput<'_>) -> Result<AttendanceReport, ReconError> {
    reconcile_with(input, &AttendancePolicy::default())
}

/// Daily attendance report: who was late, who never signed in.
///
/// Rejects the run before computing anything when the sign-in log or the
/// roster is absent. Row-level problems (bad time, unknown person) never
/// fail the run; they are tallied in [`ReconDiagnostics`].
pub fn reconcile_with(
    input: &AttendanceInput<'_>,
    policy: &AttendancePolicy,
) -> Result<AttendanceReport, ReconError> {
    let (sign_ins, roster) = require_inputs(input)?;
    let check_date = input.check_date.trim();

    // Approved leave, by name only. Dates are not consulted.
    let approved: Vec<PtoEntry> = input
        .pto
        .unwrap_or_default()
        .iter()
        .map(PtoEntry::from_record)
        .filter(|p| policy.pto.is_approved(&p.status))
        .collect();
    let pto_names: HashSet<String> = approved.iter().map(|p| p.key().full()).collect();

    let index = NameIndex::build(roster);
    log::debug!("roster index: {} of {} row(s) keyed", index.len(), roster.len());

    let mut diagnostics = ReconDiagnostics::default();
    let mut signed_in: HashSet<String> = HashSet::new();
    let mut classified: HashSet<NameKey> = HashSet::new();
    let mut late_arrivals = Vec::new();
    let mut on_time_count = 0usize;

    for (row_no, row) in sign_ins.iter().enumerate() {
        let event = SignInEvent::from_record(row);
        if !event.is_complete() {
            diagnostics.rows_skipped_incomplete += 1;
            continue;
        }
        if event.date != check_date {
            diagnostics.rows_other_date += 1;
            continue;
        }

        let key = event.key();
        signed_in.insert(key.full());

        let Some(time) = parse_time(&event.time_in) else {
            diagnostics.time_parse_failures += 1;
            log::debug!("sign-in row {row_no}: unreadable time '{}'", event.time_in);
            continue;
        };

        let Some(matched) = index.find(&event.first_name, &event.last_name) else {
            diagnostics.unmatched_sign_ins += 1;
            log::debug!("sign-in row {row_no}: '{}' not on roster", event.name());
            continue;
        };

        // One outcome per person: a repeat sign-in does not count twice.
        if !classified.insert(key) {
            continue;
        }

        let person = PersonRecord::from_record(matched);
        let shift = policy.shift.classify(&person.department);
        let time_in = time.minutes_since_midnight();

        if time_in > shift.expected_minutes {
            late_arrivals.push(LateRecord {
                name: event.name(),
                sign_in_time: time.to_string(),
                expected_time: shift.expected_label,
                minutes_late: time_in - shift.expected_minutes,
                department: person.department,
                title: person.job_title,
            });
        } else {
            on_time_count += 1;
        }
    }

    let mut no_sign_ins: Vec<NoSignInRecord> = roster
        .iter()
        .map(PersonRecord::from_record)
        .filter(|p| p.has_name() && policy.roster.is_active(&p.status))
        .filter(|p| {
            let key = p.key().full();
            !signed_in.contains(&key) && !pto_names.contains(&key)
        })
        .map(|p| NoSignInRecord {
            name: p.name(),
            department: p.department,
            title: p.job_title,
            location: p.location,
        })
        .collect();

    // Both sorts are stable.
    late_arrivals.sort_by(|a, b| b.minutes_late.cmp(&a.minutes_late));
    no_sign_ins.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });

    let report = AttendanceReport {
        check_date: check_date.to_string(),
        late_arrivals,
        no_sign_ins,
        on_time_count,
        total_signed_in_count: signed_in.len(),
        pto_count: approved.len(),
        diagnostics,
    };

    log::info!(
        "{}: {} signed in, {} late, {} on time, {} no sign-in, {} on PTO",
        report.check_date,
        report.total_signed_in_count,
        report.late_arrivals.len(),
        report.on_time_count,
        report.no_sign_ins.len(),
        report.pto_count,
    );

    Ok(report)
}

fn require_inputs<'a>(
    input: &AttendanceInput<'a>,
) -> Result<(&'a [Record], &'a [Record]), ReconError> {
    match (input.sign_ins, input.roster) {
        (Some(sign_ins), Some(roster)) => Ok((sign_ins, roster)),
        (sign_ins, roster) => {
            let mut missing = Vec::new();
            if sign_ins.is_none() {
                missing.push("sign-in log");
            }
            if roster.is_none() {
                missing.push("roster");
            }
            Err(ReconError::MissingInputs { missing })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(first: &str, last: &str, dept: &str, status: &str) -> Record {
        Record::new()
            .with("First Name", first)
            .with("Last Name", last)
            .with("Department", dept)
            .with("Job Title Description", "Staff")
            .with("School Location", "Main")
            .with("Status", status)
    }

    fn sign_in(first: &str, last: &str, date: &str, time: &str) -> Record {
        Record::new()
            .with("First Name", first)
            .with("Last Name", last)
            .with("Date In", date)
            .with("In", time)
    }

    fn pto(first: &str, last: &str, date: &str, status: &str) -> Record {
        Record::new()
            .with("First Name", first)
            .with("Last Name", last)
            .with("Date", date)
            .with("Status", status)
    }

    const DAY: &str = "2025-10-09";

    fn run(sign_ins: &[Record], roster: &[Record], pto: Option<&[Record]>) -> AttendanceReport {
        reconcile(&AttendanceInput {
            sign_ins: Some(sign_ins),
            roster: Some(roster),
            pto,
            check_date: DAY,
        })
        .unwrap()
    }

    #[test]
    fn missing_inputs_rejected() {
        let roster = vec![person("Jane", "Doe", "Counseling", "Existing")];
        let err = reconcile(&AttendanceInput {
            sign_ins: None,
            roster: Some(&roster[..]),
            pto: None,
            check_date: DAY,
        })
        .unwrap_err();
        assert_eq!(err, ReconError::MissingInputs { missing: vec!["sign-in log"] });

        let err = reconcile(&AttendanceInput { check_date: DAY, ..Default::default() }).unwrap_err();
        assert!(err.to_string().contains("sign-in log, roster"));
    }

    #[test]
    fn scenario_a_instructional_late() {
        let roster = vec![person("Jane", "Doe", "Instructional Support", "Existing")];
        let log = vec![sign_in("Jane", "Doe", DAY, "07:55:00")];
        let report = run(&log, &roster, None);
        assert_eq!(report.late_arrivals.len(), 1);
        let late = &report.late_arrivals[0];
        assert_eq!(late.name, "Jane Doe");
        assert_eq!(late.minutes_late, 5);
        assert_eq!(late.expected_time, "7:50 AM");
        assert_eq!(late.sign_in_time, "7:55");
        assert_eq!(late.department, "Instructional Support");
        assert_eq!(late.title, "Staff");
        assert!(report.no_sign_ins.is_empty());
        assert_eq!(report.total_signed_in_count, 1);
    }

    #[test]
    fn scenario_b_no_sign_in() {
        let roster = vec![person("Jane", "Doe", "Instructional Support", "Existing")];
        let report = run(&[], &roster, None);
        assert_eq!(report.no_sign_ins.len(), 1);
        assert_eq!(report.no_sign_ins[0].name, "Jane Doe");
        assert_eq!(report.no_sign_ins[0].location, "Main");
        assert_eq!(report.total_signed_in_count, 0);
    }

    #[test]
    fn scenario_c_non_instructional_late() {
        let roster = vec![person("Sam", "Lee", "Facilities", "Existing")];
        let log = vec![sign_in("Sam", "Lee", DAY, "08:45:00")];
        let report = run(&log, &roster, None);
        assert_eq!(report.late_arrivals[0].minutes_late, 15);
        assert_eq!(report.late_arrivals[0].expected_time, "8:30 AM");
        assert_eq!(report.late_arrivals[0].sign_in_time, "8:45");
    }

    #[test]
    fn scenario_d_pto_suppresses_no_show_regardless_of_date() {
        let roster = vec![person("Sam", "Lee", "Facilities", "Existing")];
        let leave = vec![pto(" sam", "LEE ", "2024-01-01", "Approved")];
        let report = run(&[], &roster, Some(&leave[..]));
        assert!(report.no_sign_ins.is_empty());
        assert_eq!(report.pto_count, 1);
    }

    #[test]
    fn unapproved_pto_ignored() {
        let roster = vec![person("Sam", "Lee", "Facilities", "Existing")];
        let leave = vec![pto("Sam", "Lee", DAY, "Pending"), pto("Sam", "Lee", DAY, "Denied")];
        let report = run(&[], &roster, Some(&leave[..]));
        assert_eq!(report.no_sign_ins.len(), 1);
        assert_eq!(report.pto_count, 0);
    }

    #[test]
    fn pto_count_is_raw_filtered_entries() {
        let leave = vec![
            pto("Sam", "Lee", "2025-10-08", "Approved"),
            pto("Sam", "Lee", "2025-10-09", "Approved"),
            pto("Nobody", "Here", "2025-10-09", "Approved"),
        ];
        let report = run(&[], &[], Some(&leave[..]));
        assert_eq!(report.pto_count, 3);
    }

    #[test]
    fn exactly_on_threshold_is_on_time() {
        let roster = vec![
            person("Jane", "Doe", "Counseling", "Existing"),
            person("Sam", "Lee", "Facilities", "Existing"),
        ];
        let log = vec![
            sign_in("Jane", "Doe", DAY, "07:50:00"),
            sign_in("Sam", "Lee", DAY, "08:30:59"),
        ];
        let report = run(&log, &roster, None);
        assert!(report.late_arrivals.is_empty());
        assert_eq!(report.on_time_count, 2);
    }

    #[test]
    fn other_dates_and_incomplete_rows_do_not_count() {
        let roster = vec![person("Jane", "Doe", "Counseling", "Existing")];
        let log = vec![
            sign_in("Jane", "Doe", "2025-10-08", "07:40:00"),
            sign_in("Jane", "", DAY, "07:40:00"),
            sign_in("Jane", "Doe", DAY, ""),
        ];
        let report = run(&log, &roster, None);
        assert_eq!(report.total_signed_in_count, 0);
        assert_eq!(report.no_sign_ins.len(), 1);
        assert_eq!(report.diagnostics.rows_other_date, 1);
        assert_eq!(report.diagnostics.rows_skipped_incomplete, 2);
    }

    #[test]
    fn unparseable_time_still_counts_as_signed_in() {
        let roster = vec![person("Jane", "Doe", "Counseling", "Existing")];
        let log = vec![sign_in("Jane", "Doe", DAY, "7:55 AM")];
        let report = run(&log, &roster, None);
        assert_eq!(report.total_signed_in_count, 1);
        assert!(report.no_sign_ins.is_empty());
        assert!(report.late_arrivals.is_empty());
        assert_eq!(report.on_time_count, 0);
        assert_eq!(report.diagnostics.time_parse_failures, 1);
    }

    #[test]
    fn blank_time_cell_still_counts_as_signed_in() {
        let roster = vec![person("Sam", "Lee", "Facilities", "Existing")];
        let log = vec![sign_in("Sam", "Lee", DAY, "   ")];
        let report = run(&log, &roster, None);
        assert_eq!(report.total_signed_in_count, 1);
        assert!(report.no_sign_ins.is_empty());
        assert_eq!(report.diagnostics.rows_skipped_incomplete, 0);
        assert_eq!(report.diagnostics.time_parse_failures, 1);
    }

    #[test]
    fn huge_hour_is_a_parse_failure_not_a_panic() {
        let roster = vec![person("Sam", "Lee", "Facilities", "Existing")];
        let log = vec![sign_in("Sam", "Lee", DAY, "71582789:00:00")];
        let report = run(&log, &roster, None);
        assert_eq!(report.total_signed_in_count, 1);
        assert!(report.late_arrivals.is_empty());
        assert!(report.no_sign_ins.is_empty());
        assert_eq!(report.diagnostics.time_parse_failures, 1);
    }

    #[test]
    fn unmatched_sign_in_inflates_total_only() {
        let roster = vec![person("Jane", "Doe", "Counseling", "Existing")];
        let log = vec![
            sign_in("Jane", "Doe", DAY, "07:45:00"),
            sign_in("Visitor", "Person", DAY, "10:00:00"),
        ];
        let report = run(&log, &roster, None);
        assert_eq!(report.total_signed_in_count, 2);
        assert_eq!(report.on_time_count, 1);
        assert!(report.late_arrivals.is_empty());
        assert_eq!(report.diagnostics.unmatched_sign_ins, 1);
    }

    #[test]
    fn signed_in_count_is_distinct_normalized_names() {
        let roster = vec![person("Jane", "Doe", "Counseling", "Existing")];
        let log = vec![
            sign_in("Jane", "Doe", DAY, "07:45:00"),
            sign_in(" JANE", "doe ", DAY, "12:30:00"),
        ];
        let report = run(&log, &roster, None);
        assert_eq!(report.total_signed_in_count, 1);
        // the second sign-in is not a second outcome
        assert_eq!(report.on_time_count, 1);
        assert!(report.late_arrivals.is_empty());
    }

    #[test]
    fn late_sorted_desc_with_stable_ties() {
        let roster = vec![
            person("A", "One", "Facilities", "Existing"),
            person("B", "Two", "Facilities", "Existing"),
            person("C", "Three", "Facilities", "Existing"),
            person("D", "Four", "Facilities", "Existing"),
        ];
        let log = vec![
            sign_in("A", "One", DAY, "08:40:00"),
            sign_in("B", "Two", DAY, "09:00:00"),
            sign_in("C", "Three", DAY, "08:40:00"),
            sign_in("D", "Four", DAY, "08:31:00"),
        ];
        let report = run(&log, &roster, None);
        let names: Vec<_> = report.late_arrivals.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["B Two", "A One", "C Three", "D Four"]);
        let minutes: Vec<_> = report.late_arrivals.iter().map(|l| l.minutes_late).collect();
        assert_eq!(minutes, vec![30, 10, 10, 1]);
    }

    #[test]
    fn no_sign_ins_alphabetical_and_active_only() {
        let roster = vec![
            person("zoe", "Adams", "x", "Existing"),
            person("Amy", "Baker", "x", "New Hire"),
            person("Carl", "Cole", "x", "Terminated"),
            person("", "Nameless", "x", "Existing"),
            person("Bob", "Young", "x", "existing employee"),
        ];
        let report = run(&[], &roster, None);
        let names: Vec<_> = report.no_sign_ins.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Amy Baker", "Bob Young", "zoe Adams"]);
    }

    #[test]
    fn duplicate_roster_names_first_wins() {
        let roster = vec![
            person("Sam", "Lee", "Counseling", "Existing"),
            person("Sam", "Lee", "Facilities", "Existing"),
        ];
        let log = vec![sign_in("Sam", "Lee", DAY, "08:00:00")];
        let report = run(&log, &roster, None);
        // first row is instructional (7:50), so 10 minutes late
        assert_eq!(report.late_arrivals.len(), 1);
        assert_eq!(report.late_arrivals[0].minutes_late, 10);
        assert_eq!(report.late_arrivals[0].department, "Counseling");
    }

    #[test]
    fn idempotent() {
        let roster = vec![
            person("Jane", "Doe", "Counseling", "Existing"),
            person("Sam", "Lee", "Facilities", "Existing"),
            person("Ann", "Hill", "Facilities", "New Hire"),
        ];
        let log = vec![
            sign_in("Jane", "Doe", DAY, "08:10:00"),
            sign_in("Sam", "Lee", DAY, "08:10:00"),
        ];
        let first = run(&log, &roster, None);
        let second = run(&log, &roster, None);
        assert_eq!(first, second);
    }

    #[test]
    fn custom_policy_shifts_threshold() {
        let policy = AttendancePolicy::from_toml(
            "[shift.non_instructional]\nstart = \"9:00 AM\"\nend = \"5:00 PM\"\n",
        )
        .unwrap();
        let roster = vec![person("Sam", "Lee", "Facilities", "Existing")];
        let log = vec![sign_in("Sam", "Lee", DAY, "08:45:00")];
        let input = AttendanceInput {
            sign_ins: Some(&log[..]),
            roster: Some(&roster[..]),
            pto: None,
            check_date: DAY,
        };
        let report = reconcile_with(&input, &policy).unwrap();
        assert!(report.late_arrivals.is_empty());
        assert_eq!(report.on_time_count, 1);
    }
}
