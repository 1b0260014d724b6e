//! Bulk import: filename rules and first-column extraction from CSV and
//! Excel workbooks.

use crate::error::WheelError;
use calamine::{Data, Reader, open_workbook_auto_from_rs};
use std::io::Cursor;

/// Upload formats accepted by `/upload`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Csv,
    Xlsx,
    Xls,
}

impl ImportKind {
    /// Match the text after the last `.` against the allow-list, ignoring case.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            "xls" => Some(Self::Xls),
            _ => None,
        }
    }
}

/// Reduce a client-supplied filename to `[A-Za-z0-9._-]`, with path
/// separators and whitespace runs turned into `_` and no leading or trailing
/// `.`/`_`. `"../../etc/passwd"` becomes `"etc_passwd"`.
pub fn secure_filename(filename: &str) -> String {
    let spaced: String = filename
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Ordered, trimmed, non-empty first-column values of the upload.
pub fn extract_names(bytes: &[u8], kind: ImportKind) -> Result<Vec<String>, WheelError> {
    match kind {
        ImportKind::Csv => csv_names(bytes),
        ImportKind::Xlsx | ImportKind::Xls => spreadsheet_names(bytes),
    }
}

fn csv_names(bytes: &[u8]) -> Result<Vec<String>, WheelError> {
    let text = std::str::from_utf8(bytes).map_err(WheelError::parse)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut names = Vec::new();
    for record in reader.records() {
        let record = record.map_err(WheelError::parse)?;
        if let Some(cell) = record.get(0).map(str::trim)
            && !cell.is_empty()
        {
            names.push(cell.to_string());
        }
    }
    Ok(names)
}

fn spreadsheet_names(bytes: &[u8]) -> Result<Vec<String>, WheelError> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).map_err(WheelError::parse)?;
    let Some(range) = workbook.worksheet_range_at(0) else {
        return Ok(Vec::new());
    };
    let range = range.map_err(WheelError::parse)?;

    // Positions are absolute; the used range may not start at column A.
    let (Some((first_row, first_col)), Some((last_row, _))) = (range.start(), range.end()) else {
        return Ok(Vec::new());
    };
    if first_col > 0 {
        return Ok(Vec::new());
    }

    Ok((first_row..=last_row)
        .filter_map(|row| range.get_value((row, 0)))
        .filter(|cell| !is_blank_cell(cell))
        .map(|cell| cell.to_string().trim().to_string())
        .filter(|name| !name.is_empty())
        .collect())
}

/// Empty cells and falsy values (`0`, `0.0`, `FALSE`, `""`) carry no name.
fn is_blank_cell(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::Int(v) => *v == 0,
        Data::Float(v) => *v == 0.0,
        Data::Bool(v) => !*v,
        Data::String(v) => v.is_empty(),
        _ => false,
    }
}
