//! `rollcall schedule`: who works when.

use std::path::PathBuf;

use clap::Args;
use rollcall_recon::model::ScheduleSource;
use rollcall_recon::{lookup_with, ScheduleInfo, SnapshotKey};

use crate::inputs::{file_or_snapshot, resolve_policy};
use crate::{CliError, Context};

#[derive(Args)]
pub struct ScheduleArgs {
    /// Full or partial name, case-insensitive
    pub name: String,

    /// Staff roster (default: stored roster snapshot)
    #[arg(long)]
    pub roster: Option<PathBuf>,

    /// Schedule sheet with First Name, Last Name, Schedule columns
    /// (default: stored schedule snapshot)
    #[arg(long)]
    pub schedule: Option<PathBuf>,

    /// Read the schedule sheet positionally (first, last, schedule)
    #[arg(long)]
    pub schedule_no_headers: bool,

    /// Policy TOML for department default shifts
    #[arg(long)]
    pub policy: Option<PathBuf>,

    /// Output JSON to stdout
    #[arg(long)]
    pub json: bool,
}

pub fn cmd_schedule(ctx: &Context, args: ScheduleArgs) -> Result<(), CliError> {
    let policy = resolve_policy(ctx, args.policy)?;
    let schedule_headers = ctx.settings.schedule_headers && !args.schedule_no_headers;

    let roster = file_or_snapshot(ctx, args.roster.as_deref(), SnapshotKey::Roster, true)?;
    let schedule =
        file_or_snapshot(ctx, args.schedule.as_deref(), SnapshotKey::Schedule, schedule_headers)?;

    let matches = lookup_with(&args.name, roster.as_deref(), schedule.as_deref(), &policy.shift)
        .map_err(CliError::recon)?;

    if args.json {
        let json_str = serde_json::to_string_pretty(&matches)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    } else if matches.is_empty() {
        eprintln!("no staff match '{}'", args.name.trim());
    } else {
        print!("{}", render_matches(&matches));
    }
    Ok(())
}

pub fn render_matches(matches: &[ScheduleInfo]) -> String {
    let mut out = String::new();
    for (i, info) in matches.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{}\n", info.name));
        out.push_str(&format!("  Title:      {}\n", info.title));
        out.push_str(&format!("  Department: {}\n", info.department));
        out.push_str(&format!("  Location:   {}\n", info.location));
        let note = match info.source {
            ScheduleSource::ScheduleSheet => "",
            ScheduleSource::DepartmentDefault => "  (department default)",
        };
        out.push_str(&format!("  Schedule:   {}{}\n", info.schedule, note));
    }
    out
}
