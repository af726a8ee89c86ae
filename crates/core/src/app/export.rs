//! Building the spreadsheet table from parsed merge records

use crate::domain::record::MergeRecord;
use crate::domain::table::{Cell, CellValue, Column, SheetTable};
use serde::{Deserialize, Serialize};

/// Column headers, in output order
pub const COLUMN_HEADERS: [&str; 4] = ["Merge Date", "PR Number", "PR Link", "Merge Commit Hash"];

/// Zero-based index of the `PR Link` column
pub const LINK_COLUMN: usize = 2;

/// Text shown in place of a PR URL
pub const LINK_TEXT: &str = "Link";

/// Largest PR number a spreadsheet number cell holds exactly (2^53)
pub const MAX_EXACT_NUMBER: u64 = 1 << 53;

/// Names and formats for the exported table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableLayout {
    pub sheet_name: String,
    pub table_name: String,
    pub date_format: String,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
            table_name: "MergeCommits".to_string(),
            date_format: "yyyy-mm-dd hh:mm:ss".to_string(),
        }
    }
}

/// Build the four-column merge table, one row per record in record order
pub fn build_table(records: &[MergeRecord], layout: &TableLayout) -> SheetTable {
    let rows: Vec<Vec<Cell>> = records.iter().map(record_row).collect();

    let columns = COLUMN_HEADERS
        .iter()
        .enumerate()
        .map(|(i, header)| Column {
            header: header.to_string(),
            width: column_width(header, &rows, i),
        })
        .collect();

    SheetTable {
        sheet_name: layout.sheet_name.clone(),
        table_name: layout.table_name.clone(),
        date_format: layout.date_format.clone(),
        columns,
        rows,
    }
}

fn record_row(record: &MergeRecord) -> Vec<Cell> {
    let number = match record.pr_number {
        Some(n) if n <= MAX_EXACT_NUMBER => CellValue::Number(n as f64),
        // Beyond f64 precision; keep every digit as text
        Some(n) => CellValue::Text(n.to_string()),
        None => CellValue::Empty,
    };

    let link = match &record.pr_link {
        Some(url) => Cell::new(CellValue::Text(url.clone())).with_hyperlink(url.clone(), LINK_TEXT),
        None => Cell::empty(),
    };

    vec![
        Cell::new(CellValue::DateTime(record.merged_at)),
        Cell::new(number),
        link,
        Cell::new(CellValue::Text(record.commit_hash.clone())),
    ]
}

/// Widest of the header and every value in the column, in characters
fn column_width(header: &str, rows: &[Vec<Cell>], col: usize) -> usize {
    rows.iter()
        .filter_map(|row| row.get(col))
        .map(|cell| cell.value.text_len())
        .fold(header.chars().count(), usize::max)
}
