//! Port for datasets that survive between runs (the master roster and the
//! schedule sheet). The engine never calls it; front ends resolve
//! "explicit file, else stored snapshot" before reconciling.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use crate::error::ReconError;
use crate::model::Dataset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotKey {
    Roster,
    Schedule,
}

impl SnapshotKey {
    pub const ALL: [SnapshotKey; 2] = [SnapshotKey::Roster, SnapshotKey::Schedule];

    /// Stable storage name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Roster => "master-staff-data",
            Self::Schedule => "schedule-data",
        }
    }
}

impl fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Roster => write!(f, "roster"),
            Self::Schedule => write!(f, "schedule"),
        }
    }
}

pub trait SnapshotStore {
    /// `Ok(None)` when nothing has been saved under `key`.
    fn load(&self, key: SnapshotKey) -> Result<Option<Dataset>, ReconError>;

    fn save(&self, key: SnapshotKey, dataset: &Dataset) -> Result<(), ReconError>;

    /// Returns whether anything was removed.
    fn clear(&self, key: SnapshotKey) -> Result<bool, ReconError>;
}

/// In-process store, for tests and one-shot embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RefCell<HashMap<SnapshotKey, Dataset>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: SnapshotKey) -> Result<Option<Dataset>, ReconError> {
        Ok(self.slots.borrow().get(&key).cloned())
    }

    fn save(&self, key: SnapshotKey, dataset: &Dataset) -> Result<(), ReconError> {
        self.slots.borrow_mut().insert(key, dataset.clone());
        Ok(())
    }

    fn clear(&self, key: SnapshotKey) -> Result<bool, ReconError> {
        Ok(self.slots.borrow_mut().remove(&key).is_some())
    }
}
