use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconError {
    /// Required dataset(s) not supplied. Nothing was computed.
    MissingInputs { missing: Vec<&'static str> },
    /// Schedule lookup called with a blank search term.
    EmptyQuery,
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Policy validation error (empty keyword list, bad clock label, etc.).
    ConfigValidation(String),
    /// Snapshot store read/write failure.
    Snapshot(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInputs { missing } => write!(
                f,
                "missing required input(s): {}; provide them and retry",
                missing.join(", ")
            ),
            Self::EmptyQuery => write!(f, "please enter a name to look up"),
            Self::ConfigParse(msg) => write!(f, "policy parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "policy validation error: {msg}"),
            Self::Snapshot(msg) => write!(f, "snapshot store error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
