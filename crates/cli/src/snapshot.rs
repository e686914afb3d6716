//! `rollcall snapshot`: manage the stored roster and schedule.

use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};
use rollcall_recon::{SnapshotKey, SnapshotStore};

use crate::inputs::load_file;
use crate::{CliError, Context};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SnapshotKind {
    Roster,
    Schedule,
}

impl From<SnapshotKind> for SnapshotKey {
    fn from(kind: SnapshotKind) -> Self {
        match kind {
            SnapshotKind::Roster => SnapshotKey::Roster,
            SnapshotKind::Schedule => SnapshotKey::Schedule,
        }
    }
}

#[derive(Subcommand)]
pub enum SnapshotCommands {
    /// Import a file and keep it for later runs
    #[command(after_help = "\
Examples:
  rollcall snapshot save roster staff.xlsx
  rollcall snapshot save schedule schedules.csv --no-headers")]
    Save {
        kind: SnapshotKind,

        file: PathBuf,

        /// Columns are positional; the first row is data
        #[arg(long)]
        no_headers: bool,
    },

    /// What is stored (all kinds when none is given)
    Show {
        kind: Option<SnapshotKind>,

        /// Output JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Forget a stored dataset
    Clear { kind: SnapshotKind },
}

pub fn cmd_snapshot(ctx: &Context, cmd: SnapshotCommands) -> Result<(), CliError> {
    match cmd {
        SnapshotCommands::Save { kind, file, no_headers } => {
            let key = SnapshotKey::from(kind);
            let rows = load_file(&file, !no_headers)?;
            if rows.is_empty() {
                return Err(CliError::parse(format!("{} has no data rows", file.display())));
            }
            let source = file.display().to_string();
            ctx.store
                .save_from(key, &rows, Some(&source))
                .map_err(CliError::recon)?;
            eprintln!("saved {} row(s) as {}", rows.len(), key);
            Ok(())
        }
        SnapshotCommands::Show { kind, json } => {
            let keys: Vec<SnapshotKey> = match kind {
                Some(kind) => vec![kind.into()],
                None => SnapshotKey::ALL.to_vec(),
            };
            let mut entries = Vec::new();
            for key in keys {
                let file = ctx.store.load_file(key).map_err(CliError::recon)?;
                entries.push(match file {
                    Some(f) => serde_json::json!({
                        "kind": key.to_string(),
                        "rows": f.rows.len(),
                        "saved_at": f.saved_at.to_rfc3339(),
                        "source": f.source,
                        "columns": f.rows.first().map(|r| {
                            r.columns.iter().map(|(label, _)| label.clone()).collect::<Vec<_>>()
                        }),
                    }),
                    None => serde_json::json!({ "kind": key.to_string(), "rows": null }),
                });
            }

            if json {
                let json_str = serde_json::to_string_pretty(&entries)
                    .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
                println!("{json_str}");
                return Ok(());
            }
            for entry in &entries {
                println!("{}", describe(entry));
            }
            Ok(())
        }
        SnapshotCommands::Clear { kind } => {
            let key = SnapshotKey::from(kind);
            if ctx.store.clear(key).map_err(CliError::recon)? {
                eprintln!("cleared {key}");
            } else {
                eprintln!("no {key} snapshot stored");
            }
            Ok(())
        }
    }
}

fn describe(entry: &serde_json::Value) -> String {
    let kind = entry["kind"].as_str().unwrap_or_default();
    let Some(rows) = entry["rows"].as_u64() else {
        return format!("{kind}: not stored");
    };
    let mut line = format!("{kind}: {rows} row(s), saved {}", entry["saved_at"].as_str().unwrap_or("?"));
    if let Some(source) = entry["source"].as_str() {
        line.push_str(&format!(" from {source}"));
    }
    if let Some(columns) = entry["columns"].as_array() {
        let labels: Vec<&str> = columns.iter().filter_map(|c| c.as_str()).collect();
        line.push_str(&format!("\n  columns: {}", labels.join(", ")));
    }
    line
}
