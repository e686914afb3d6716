// Configuration loading and on-disk state

use std::path::PathBuf;

pub mod settings;
pub mod snapshots;

pub use settings::Settings;
pub use snapshots::FileSnapshotStore;

/// Default data directory: `<platform config dir>/rollcall`.
pub fn default_data_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rollcall")
}
