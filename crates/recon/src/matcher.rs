use std::collections::HashMap;

use crate::extract::{extract_text, FIRST_NAME, LAST_NAME};
use crate::model::Record;
use crate::normalize::{normalize, NameKey};

/// Header labels that show up as data when a sheet's header row was not
/// consumed by the parser.
const HEADER_FIRST_NAME_LABELS: [&str; 2] = ["first name", "firstname"];

/// Normalized `(first, last)` of a candidate row, or `None` for a stray
/// header row.
pub fn candidate_key(record: &Record) -> Option<NameKey> {
    let first = normalize(&extract_text(record, FIRST_NAME));
    if HEADER_FIRST_NAME_LABELS.contains(&first.as_str()) {
        return None;
    }
    let last = normalize(&extract_text(record, LAST_NAME));
    Some(NameKey { first, last })
}

/// First row of `dataset` whose names equal the target's. Later rows with
/// the same name are never returned.
pub fn find_match<'d>(
    target_first: &str,
    target_last: &str,
    dataset: &'d [Record],
) -> Option<&'d Record> {
    let target = NameKey::new(target_first, target_last);
    dataset
        .iter()
        .find(|rec| candidate_key(rec).is_some_and(|k| k == target))
}

/// Name → first-row lookup over one dataset.
///
/// Built once per run so matching is not a scan per sign-in row. Returns
/// exactly what [`find_match`] would.
#[derive(Debug)]
pub struct NameIndex<'d> {
    dataset: &'d [Record],
    positions: HashMap<NameKey, usize>,
}

impl<'d> NameIndex<'d> {
    pub fn build(dataset: &'d [Record]) -> Self {
        let mut positions = HashMap::with_capacity(dataset.len());
        let mut duplicates = 0usize;
        for (i, rec) in dataset.iter().enumerate() {
            let Some(key) = candidate_key(rec) else {
                continue;
            };
            if positions.contains_key(&key) {
                duplicates += 1;
                continue;
            }
            positions.insert(key, i);
        }
        if duplicates > 0 {
            log::debug!("name index: {duplicates} duplicate name(s) ignored, first row kept");
        }
        Self { dataset, positions }
    }

    pub fn find(&self, target_first: &str, target_last: &str) -> Option<&'d Record> {
        self.positions
            .get(&NameKey::new(target_first, target_last))
            .map(|&i| &self.dataset[i])
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
