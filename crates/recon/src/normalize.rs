//! Comparison keys for names. Display strings keep their original casing;
//! only these keys are compared across datasets.

/// Trim and case-fold a name fragment.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Normalized `(first, last)` pair. Both halves are compared independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NameKey {
    pub first: String,
    pub last: String,
}

impl NameKey {
    pub fn new(first: &str, last: &str) -> Self {
        Self {
            first: normalize(first),
            last: normalize(last),
        }
    }

    /// `"first last"`, the key used for signed-in and PTO sets.
    pub fn full(&self) -> String {
        format!("{} {}", self.first, self.last)
    }
}

/// Display name as `"First Last"` from trimmed fragments.
pub fn display_name(first: &str, last: &str) -> String {
    format!("{} {}", first.trim(), last.trim())
}
