use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Policy TOML used when `--policy` is not given.
    #[serde(rename = "policy.path")]
    pub policy_path: Option<PathBuf>,

    /// Treat any late arrival or missing sign-in as a failing exit code.
    #[serde(rename = "check.strict")]
    pub strict: bool,

    /// Schedule exports usually carry a header row read as labels.
    #[serde(rename = "schedule.headers")]
    pub schedule_headers: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            policy_path: None,
            strict: false,
            schedule_headers: true,
        }
    }
}

impl Settings {
    /// Settings file inside a data directory
    pub fn path_in(root: &Path) -> PathBuf {
        root.join("settings.json")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load_from(root: &Path) -> Self {
        let path = Self::path_in(root);

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                log::warn!("error reading {}: {}", path.display(), e);
                return Self::default();
            }
        };

        // Strip comments (lines starting with //)
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        match serde_json::from_str(&cleaned) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("error parsing {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save current settings to disk
    pub fn save_to(&self, root: &Path) -> Result<(), String> {
        let path = Self::path_in(root);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;

        fs::write(&path, json).map_err(|e| e.to_string())
    }
}
