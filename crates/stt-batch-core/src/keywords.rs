//! Keyword hints read from a spreadsheet.
//!
//! Keywords live in the first column of the first worksheet, one per row,
//! below a configurable number of header rows. Every cell is normalized to
//! text, since the service expects string keywords.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use calamine::{Data, Range, Reader, open_workbook_auto};

/// Read the keyword column of the spreadsheet at `path`.
///
/// Supports every format calamine detects from the extension
/// (xlsx, xlsm, xlsb, xls, ods).
pub fn extract_keywords(path: &Path, header_rows: usize) -> Result<Vec<String>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open spreadsheet {}", path.display()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("Spreadsheet {} has no worksheets", path.display()))?
        .with_context(|| format!("Failed to read first worksheet of {}", path.display()))?;

    let keywords = first_column(&range, header_rows);
    crate::verbose!(
        "Loaded {} keywords from {}",
        keywords.len(),
        path.display()
    );
    Ok(keywords)
}

/// Collect the first column of `range` as text, skipping `header_rows`.
///
/// Header rows are counted from the first row of the used range, so blank
/// rows above the header are not part of it. Empty cells and error cells
/// produce no keyword.
pub fn first_column(range: &Range<Data>, header_rows: usize) -> Vec<String> {
    range
        .rows()
        .skip(header_rows)
        .filter_map(|row| row.first())
        .filter_map(cell_text)
        .collect()
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::Error(err) => {
            crate::verbose!("Skipping keyword cell with error value {err:?}");
            None
        }
        Data::DateTime(value) => Some(
            value
                .as_datetime()
                .map_or_else(|| cell.to_string(), |datetime| datetime.to_string()),
        ),
        // Whole floats print without a fraction: 42.0 -> "42"
        other => Some(other.to_string()),
    }
}
