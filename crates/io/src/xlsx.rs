// Excel import (xlsx, xls, xlsb, ods) into datasets

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::csv::positional_label;
use rollcall_recon::model::{CellValue, Dataset, Record};

/// Import the first worksheet.
///
/// With `headers`, the first non-empty row supplies labels; otherwise
/// columns are `_1`, `_2`, ... like headerless CSV.
pub fn import(path: &Path, headers: bool) -> Result<Dataset, String> {
    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| format!("Failed to open Excel file: {}", e))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let Some(first) = sheet_names.first() else {
        return Err("Excel file contains no sheets".to_string());
    };
    if sheet_names.len() > 1 {
        log::debug!("xlsx: reading '{}', ignoring {} other sheet(s)", first, sheet_names.len() - 1);
    }

    let range = workbook.worksheet_range(first)
        .map_err(|e| format!("Failed to read sheet '{}': {}", first, e))?;

    let mut labels: Option<Vec<String>> = None;
    let mut rows = Dataset::new();

    for row in range.rows() {
        let cells: Vec<Option<CellValue>> = row.iter().map(cell_value).collect();
        if cells.iter().all(|c| c.as_ref().map_or(true, CellValue::is_blank)) {
            continue;
        }

        if headers && labels.is_none() {
            labels = Some(
                cells
                    .iter()
                    .map(|c| c.as_ref().map(|v| v.as_text().trim().to_string()).unwrap_or_default())
                    .collect(),
            );
            continue;
        }

        let mut record = Record::new();
        for (col_idx, cell) in cells.into_iter().enumerate() {
            let Some(value) = cell else { continue };
            let label = labels
                .as_ref()
                .and_then(|l| l.get(col_idx))
                .filter(|l| !l.is_empty())
                .cloned()
                .unwrap_or_else(|| positional_label(col_idx));
            record.push(&label, value);
        }
        rows.push(record);
    }

    log::debug!("xlsx: {} row(s) from '{}'", rows.len(), first);
    Ok(rows)
}

/// `None` for empty cells.
fn cell_value(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::Empty => None,
        Data::String(s) => {
            if s.is_empty() {
                None
            } else {
                Some(CellValue::Text(s.clone()))
            }
        }
        Data::Float(n) => Some(CellValue::Number(*n)),
        Data::Int(n) => Some(CellValue::Number(*n as f64)),
        Data::Bool(b) => Some(CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string())),
        Data::Error(e) => Some(CellValue::Text(format!("#{:?}", e))),
        // Sign-in sheets carry dates and clock times as serials; render them
        // the way the CSV export would so date equality and time parsing hold.
        Data::DateTime(dt) => Some(CellValue::Text(serial_to_text(dt.as_f64()))),
        Data::DateTimeIso(s) => Some(CellValue::Text(s.clone())),
        Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
    }
}

/// 1900-system serial to `YYYY-MM-DD`, `HH:MM:SS`, or both.
fn serial_to_text(serial: f64) -> String {
    let has_date = serial.floor() > 0.0;
    let has_time = serial.fract().abs() > 0.000_01;

    let base = NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN);
    let millis = (serial * 86_400_000.0).round() as i64;
    let dt = base + Duration::milliseconds(millis);

    match (has_date, has_time) {
        (true, true) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        (true, false) => dt.format("%Y-%m-%d").to_string(),
        _ => dt.format("%H:%M:%S").to_string(),
    }
}
