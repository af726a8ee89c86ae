use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format used when a date-time cell is rendered as text
pub const DATETIME_TEXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A spreadsheet table, independent of any spreadsheet library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetTable {
    pub sheet_name: String,
    pub table_name: String,
    /// Number format applied to date-time cells
    pub date_format: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Cell>>,
}

impl SheetTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Table column: header text and width in characters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub header: String,
    pub width: usize,
}

/// Value stored in a table cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    DateTime(DateTime<Utc>),
}

impl CellValue {
    /// Text form of the value, used for column sizing
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::DateTime(dt) => dt.format(DATETIME_TEXT_FORMAT).to_string(),
        }
    }

    /// Length of the text form in characters
    pub fn text_len(&self) -> usize {
        self.to_text().chars().count()
    }
}

/// Link written over a cell's value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hyperlink {
    pub url: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub value: CellValue,
    pub hyperlink: Option<Hyperlink>,
}

impl Cell {
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            hyperlink: None,
        }
    }

    pub fn empty() -> Self {
        Self::new(CellValue::Empty)
    }

    pub fn with_hyperlink(mut self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.hyperlink = Some(Hyperlink {
            url: url.into(),
            text: text.into(),
        });
        self
    }
}
