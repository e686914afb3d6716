//! `rollcall-recon`: daily attendance reconciliation engine.
//!
//! Pure engine crate: receives already-parsed datasets (roster, sign-in log,
//! schedule sheet, PTO list), returns late / no-sign-in reports and schedule
//! lookups. No CLI or IO dependencies.

pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod roster;
pub mod schedule;
pub mod shift;
pub mod snapshot;
pub mod time;

pub use config::AttendancePolicy;
pub use engine::{reconcile, reconcile_with};
pub use error::ReconError;
pub use matcher::{find_match, NameIndex};
pub use model::{AttendanceInput, AttendanceReport, CellValue, Dataset, Record, ScheduleInfo};
pub use normalize::normalize;
pub use schedule::{lookup, lookup_with};
pub use shift::classify;
pub use snapshot::{MemoryStore, SnapshotKey, SnapshotStore};
pub use time::parse_time;
