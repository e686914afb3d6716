// File I/O operations: turn exported files into datasets for the engine

use std::path::Path;

use rollcall_recon::model::Dataset;

pub mod csv;
pub mod pto_xml;
pub mod xlsx;

pub use pto_xml::{parse_pto_xml, PtoXmlError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// First row holds column labels. Off for sheets read positionally.
    pub headers: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { headers: true }
    }
}

/// Load a tabular file, choosing the reader by extension.
pub fn load_dataset(path: &Path, options: LoadOptions) -> Result<Dataset, String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let rows = match ext.as_str() {
        "csv" | "txt" => csv::import(path, options.headers)?,
        "tsv" => csv::import_tsv(path, options.headers)?,
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => xlsx::import(path, options.headers)?,
        "" => return Err(format!("{}: file has no extension", path.display())),
        other => return Err(format!("{}: unsupported file type '.{}'", path.display(), other)),
    };

    if rows.is_empty() {
        log::warn!("{}: no data rows", path.display());
    }
    Ok(rows)
}

/// Read and parse a PTO XML export from disk.
pub fn load_pto_xml(path: &Path) -> Result<Dataset, String> {
    let content = csv::read_file_as_utf8(path)?;
    parse_pto_xml(&content).map_err(|e| format!("{}: {}", path.display(), e))
}
