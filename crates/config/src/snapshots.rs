//! Roster and schedule snapshots persisted as JSON between runs.
//!
//! Layout: `<root>/snapshots/<key name>.json`, e.g.
//! `~/.config/rollcall/snapshots/master-staff-data.json`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rollcall_recon::{Dataset, ReconError, SnapshotKey, SnapshotStore};

/// Bump when the on-disk shape changes in a way older builds can't read.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotFile {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    /// Where the rows were imported from, for `snapshot show`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub rows: Dataset,
}

#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    root: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store under the platform config dir.
    pub fn default_location() -> Self {
        Self::new(crate::default_data_dir())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, key: SnapshotKey) -> PathBuf {
        self.root.join("snapshots").join(format!("{}.json", key.name()))
    }

    /// Full snapshot including metadata. `Ok(None)` when nothing is saved.
    pub fn load_file(&self, key: SnapshotKey) -> Result<Option<SnapshotFile>, ReconError> {
        let path = self.path(key);
        let contents = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(store_error(&path, e)),
        };

        let file: SnapshotFile = serde_json::from_str(&contents)
            .map_err(|e| ReconError::Snapshot(format!("{} is corrupt: {e}", path.display())))?;
        if file.version > SNAPSHOT_FORMAT_VERSION {
            return Err(ReconError::Snapshot(format!(
                "{} was written by a newer version (format {}, this build reads up to {})",
                path.display(),
                file.version,
                SNAPSHOT_FORMAT_VERSION
            )));
        }
        Ok(Some(file))
    }

    /// Save with a note of where the rows came from.
    pub fn save_from(
        &self,
        key: SnapshotKey,
        dataset: &Dataset,
        source: Option<&str>,
    ) -> Result<(), ReconError> {
        let path = self.path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| store_error(parent, e))?;
        }

        let file = SnapshotFile {
            version: SNAPSHOT_FORMAT_VERSION,
            saved_at: Utc::now(),
            source: source.map(str::to_string),
            rows: dataset.clone(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| ReconError::Snapshot(e.to_string()))?;

        // Write-then-rename: readers never see a partial snapshot
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| store_error(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| store_error(&path, e))?;

        log::debug!("saved {} row(s) to {}", dataset.len(), path.display());
        Ok(())
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self, key: SnapshotKey) -> Result<Option<Dataset>, ReconError> {
        Ok(self.load_file(key)?.map(|f| f.rows))
    }

    fn save(&self, key: SnapshotKey, dataset: &Dataset) -> Result<(), ReconError> {
        self.save_from(key, dataset, None)
    }

    fn clear(&self, key: SnapshotKey) -> Result<bool, ReconError> {
        let path = self.path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(store_error(&path, e)),
        }
    }
}

fn store_error(path: &Path, e: std::io::Error) -> ReconError {
    ReconError::Snapshot(format!("{}: {e}", path.display()))
}
