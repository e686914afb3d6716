//! Field extraction for datasets whose columns may be named or only
//! positional.

use crate::model::{columns, CellValue, Record};

/// One way of reading a field out of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldExtractor {
    /// Column with this exact label.
    Named(&'static str),
    /// Zero-based column position, whatever its label.
    Positional(usize),
}

impl FieldExtractor {
    pub fn extract<'r>(&self, record: &'r Record) -> Option<&'r CellValue> {
        match self {
            Self::Named(label) => record.get(label),
            Self::Positional(index) => record.get_index(*index),
        }
    }
}

/// Extractors tried in priority order; the first non-blank value wins.
pub type FieldChain = [FieldExtractor];

pub const FIRST_NAME: &FieldChain = &[
    FieldExtractor::Named(columns::FIRST_NAME),
    FieldExtractor::Positional(0),
];

pub const LAST_NAME: &FieldChain = &[
    FieldExtractor::Named(columns::LAST_NAME),
    FieldExtractor::Positional(1),
];

pub const SCHEDULE: &FieldChain = &[
    FieldExtractor::Named(columns::SCHEDULE),
    FieldExtractor::Positional(2),
];

/// Text of the first extractor in `chain` that yields a non-blank value.
/// Empty when none does.
pub fn extract_text(record: &Record, chain: &FieldChain) -> String {
    chain
        .iter()
        .filter_map(|x| x.extract(record))
        .find(|v| !v.is_blank())
        .map(CellValue::as_text)
        .unwrap_or_default()
}
