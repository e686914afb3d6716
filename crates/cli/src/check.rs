//! `rollcall check`: one day's late arrivals and missing sign-ins.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use rollcall_recon::{reconcile_with, AttendanceInput, AttendanceReport, Dataset, SnapshotKey};

use crate::exit_codes::EXIT_CHECK_EXCEPTIONS;
use crate::inputs::{file_or_snapshot, load_file, resolve_policy};
use crate::{CliError, Context};

#[derive(Args)]
pub struct CheckArgs {
    /// Sign-in log export (csv, tsv, xlsx, xls, ods)
    #[arg(long)]
    pub sign_ins: Option<PathBuf>,

    /// Staff roster (default: stored roster snapshot)
    #[arg(long)]
    pub roster: Option<PathBuf>,

    /// Approved leave as a table with First Name, Last Name, Date, Status
    #[arg(long, conflicts_with = "pto_xml")]
    pub pto: Option<PathBuf>,

    /// Approved leave as a PurelyHR XML export
    #[arg(long)]
    pub pto_xml: Option<PathBuf>,

    /// Day to check, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub date: Option<String>,

    /// Policy TOML (default: settings, else built-in rules)
    #[arg(long)]
    pub policy: Option<PathBuf>,

    /// Output JSON to stdout instead of human summary
    #[arg(long)]
    pub json: bool,

    /// Write JSON output to file
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Exit 20 when anyone is late or missing
    #[arg(long)]
    pub strict: bool,
}

pub fn cmd_check(ctx: &Context, args: CheckArgs) -> Result<(), CliError> {
    let check_date = match args.date {
        Some(date) => {
            NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
                CliError::args(format!("invalid --date '{date}'")).with_hint("use YYYY-MM-DD, e.g. 2025-10-09")
            })?;
            date
        }
        None => chrono::Local::now().date_naive().format("%Y-%m-%d").to_string(),
    };

    let policy = resolve_policy(ctx, args.policy)?;

    let sign_ins = args.sign_ins.as_deref().map(|p| load_file(p, true)).transpose()?;
    let roster = file_or_snapshot(ctx, args.roster.as_deref(), SnapshotKey::Roster, true)?;
    let pto: Option<Dataset> = match (args.pto.as_deref(), args.pto_xml.as_deref()) {
        (Some(path), _) => Some(load_file(path, true)?),
        (None, Some(path)) => Some(rollcall_io::load_pto_xml(path).map_err(CliError::parse)?),
        (None, None) => None,
    };

    let input = AttendanceInput {
        sign_ins: sign_ins.as_deref(),
        roster: roster.as_deref(),
        pto: pto.as_deref(),
        check_date: &check_date,
    };
    let report = reconcile_with(&input, &policy).map_err(CliError::recon)?;

    if args.json || args.output.is_some() {
        let json_str = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
        if let Some(ref path) = args.output {
            std::fs::write(path, &json_str)
                .map_err(|e| CliError::general(format!("cannot write output: {e}")))?;
            eprintln!("wrote {}", path.display());
        }
        if args.json {
            println!("{json_str}");
        }
    }
    if !args.json {
        print!("{}", render_summary(&report));
    }

    let d = &report.diagnostics;
    if d.time_parse_failures > 0 || d.unmatched_sign_ins > 0 {
        eprintln!(
            "note: {} sign-in(s) with unreadable times, {} not on the roster",
            d.time_parse_failures, d.unmatched_sign_ins
        );
    }

    let exceptions = report.late_arrivals.len() + report.no_sign_ins.len();
    if (args.strict || ctx.settings.strict) && exceptions > 0 {
        return Err(CliError {
            code: EXIT_CHECK_EXCEPTIONS,
            message: format!(
                "{} late arrival(s), {} missing sign-in(s)",
                report.late_arrivals.len(),
                report.no_sign_ins.len()
            ),
            hint: None,
        });
    }
    Ok(())
}

/// Plain-text report for a terminal.
pub fn render_summary(report: &AttendanceReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Attendance for {}\n", report.check_date));

    out.push_str(&format!("\nLate arrivals ({})\n", report.late_arrivals.len()));
    if report.late_arrivals.is_empty() {
        out.push_str("  none\n");
    } else {
        let width = name_width(report.late_arrivals.iter().map(|r| r.name.as_str()));
        for r in &report.late_arrivals {
            out.push_str(&format!(
                "  {:<width$}  in {:>5}  expected {:<8}  {:>3} min late  {}\n",
                r.name, r.sign_in_time, r.expected_time, r.minutes_late, r.department,
            ));
        }
    }

    out.push_str(&format!("\nNo sign-in ({})\n", report.no_sign_ins.len()));
    if report.no_sign_ins.is_empty() {
        out.push_str("  none\n");
    } else {
        let width = name_width(report.no_sign_ins.iter().map(|r| r.name.as_str()));
        for r in &report.no_sign_ins {
            out.push_str(&format!("  {:<width$}  {}  {}\n", r.name, r.department, r.location));
        }
    }

    out.push_str(&format!(
        "\nOn time: {}  Signed in: {}  PTO: {}\n",
        report.on_time_count, report.total_signed_in_count, report.pto_count
    ));
    out
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|n| n.chars().count()).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_recon::model::{LateRecord, NoSignInRecord, ReconDiagnostics};

    #[test]
    fn summary_lists_both_sections_and_counts() {
        let report = AttendanceReport {
            check_date: "2025-10-09".into(),
            late_arrivals: vec![LateRecord {
                name: "Jane Doe".into(),
                sign_in_time: "8:05".into(),
                expected_time: "7:50 AM".into(),
                minutes_late: 15,
                department: "Instructional".into(),
                title: "Teacher".into(),
            }],
            no_sign_ins: vec![NoSignInRecord {
                name: "Sam Lee".into(),
                department: "Facilities".into(),
                title: "Custodian".into(),
                location: "North".into(),
            }],
            on_time_count: 3,
            total_signed_in_count: 4,
            pto_count: 1,
            diagnostics: ReconDiagnostics::default(),
        };

        let text = render_summary(&report);
        assert!(text.starts_with("Attendance for 2025-10-09\n"));
        assert!(text.contains("Late arrivals (1)"));
        assert!(text.contains("Jane Doe  in  8:05  expected 7:50 AM    15 min late  Instructional"));
        assert!(text.contains("No sign-in (1)"));
        assert!(text.contains("Sam Lee  Facilities  North"));
        assert!(text.contains("On time: 3  Signed in: 4  PTO: 1"));
    }

    #[test]
    fn empty_sections_say_none() {
        let report = AttendanceReport {
            check_date: "2025-10-09".into(),
            late_arrivals: vec![],
            no_sign_ins: vec![],
            on_time_count: 0,
            total_signed_in_count: 0,
            pto_count: 0,
            diagnostics: ReconDiagnostics::default(),
        };
        assert_eq!(render_summary(&report).matches("  none\n").count(), 2);
    }
}
