//! Resolving command-line inputs into datasets and a policy.

use std::path::{Path, PathBuf};

use rollcall_io::LoadOptions;
use rollcall_recon::{AttendancePolicy, Dataset, SnapshotKey, SnapshotStore};

use crate::{CliError, Context};

pub fn load_file(path: &Path, headers: bool) -> Result<Dataset, CliError> {
    let rows = rollcall_io::load_dataset(path, LoadOptions { headers })
        .map_err(CliError::parse)?;
    log::info!("{}: {} row(s)", path.display(), rows.len());
    Ok(rows)
}

/// Explicit file first, else the stored snapshot, else `None`.
pub fn file_or_snapshot(
    ctx: &Context,
    explicit: Option<&Path>,
    key: SnapshotKey,
    headers: bool,
) -> Result<Option<Dataset>, CliError> {
    if let Some(path) = explicit {
        return load_file(path, headers).map(Some);
    }
    let stored = ctx.store.load(key).map_err(CliError::recon)?;
    match &stored {
        Some(rows) => log::info!("using stored {key} snapshot ({} row(s))", rows.len()),
        None => log::debug!("no stored {key} snapshot"),
    }
    Ok(stored)
}

/// `--policy`, else the settings default, else built-in rules.
pub fn resolve_policy(ctx: &Context, explicit: Option<PathBuf>) -> Result<AttendancePolicy, CliError> {
    match explicit.or_else(|| ctx.settings.policy_path.clone()) {
        Some(path) => load_policy(&path),
        None => Ok(AttendancePolicy::default()),
    }
}

pub fn load_policy(path: &Path) -> Result<AttendancePolicy, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::config(format!("cannot read policy {}: {e}", path.display())))?;
    AttendancePolicy::from_toml(&text)
        .map_err(|e| CliError::recon(e).with_hint(format!("check {}", path.display())))
}
