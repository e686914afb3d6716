// CSV/TSV import into datasets

use std::io::Read;
use std::path::Path;

use rollcall_recon::model::{CellValue, Dataset, Record};

pub fn import(path: &Path, headers: bool) -> Result<Dataset, String> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    import_from_string(&content, delimiter, headers)
}

pub fn import_tsv(path: &Path, headers: bool) -> Result<Dataset, String> {
    let content = read_file_as_utf8(path)?;
    import_from_string(&content, b'\t', headers)
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Must produce >1 field on the first line to be viable
        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // Higher field count breaks ties
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| e.to_string())?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(s)),
        Err(e) => {
            let bytes = e.into_bytes();
            // Excel "Save as CSV" on Windows
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// Parse CSV text into records.
///
/// With `headers`, the first row supplies column labels. Without, columns
/// are labelled `_1`, `_2`, ... and read positionally downstream. Rows whose
/// fields are all blank are dropped.
pub fn import_from_string(content: &str, delimiter: u8, headers: bool) -> Result<Dataset, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut labels: Vec<String> = Vec::new();
    let mut rows = Dataset::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| format!("CSV row {}: {e}", row_idx + 1))?;

        if headers && row_idx == 0 {
            labels = record.iter().map(|h| h.trim().to_string()).collect();
            continue;
        }

        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let mut row = Record::new();
        for (col_idx, field) in record.iter().enumerate() {
            let label = match labels.get(col_idx) {
                Some(l) if headers => l.clone(),
                _ => positional_label(col_idx),
            };
            row.push(&label, typed_cell(field));
        }
        rows.push(row);
    }

    log::debug!("csv: {} row(s), {} label(s)", rows.len(), labels.len());
    Ok(rows)
}

/// `_1`, `_2`, ... for headerless columns.
pub fn positional_label(col_idx: usize) -> String {
    format!("_{}", col_idx + 1)
}

/// Numeric-looking fields become numbers; everything else stays text.
/// Dates and clock times are text (they do not parse as a float).
pub fn typed_cell(field: &str) -> CellValue {
    let trimmed = field.trim();
    let numeric_start = trimmed
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'));
    if numeric_start {
        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                return CellValue::Number(n);
            }
        }
    }
    CellValue::Text(field.to_string())
}
