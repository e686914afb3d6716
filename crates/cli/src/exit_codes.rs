//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error, missing required input  |
//! | 3       | Universal        | Input file could not be read or parsed   |
//! | 10-19   | config / store   | Policy and snapshot store codes          |
//! | 20-29   | check            | Attendance outcome codes                 |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use rollcall_recon::ReconError;

// =============================================================================
// Universal (0-3)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing sign-in log or roster.
pub const EXIT_USAGE: u8 = 2;

/// Input file unreadable, unsupported, or malformed (including PTO XML).
pub const EXIT_INPUT_PARSE: u8 = 3;

// =============================================================================
// Config / store (10-19)
// =============================================================================

/// Policy TOML failed to parse or validate.
pub const EXIT_CONFIG_INVALID: u8 = 10;

/// Snapshot store could not be read or written.
pub const EXIT_SNAPSHOT: u8 = 11;

// =============================================================================
// Check (20-29)
// =============================================================================

/// `check --strict` found late arrivals or missing sign-ins.
pub const EXIT_CHECK_EXCEPTIONS: u8 = 20;

/// Map an engine error to its exit code.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::MissingInputs { .. } | ReconError::EmptyQuery => EXIT_USAGE,
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_CONFIG_INVALID,
        ReconError::Snapshot(_) => EXIT_SNAPSHOT,
    }
}
