use crate::domain::table::SheetTable;
use anyhow::Result;
use std::path::Path;

/// Port for writing a table to a spreadsheet file
pub trait SheetSink: Send + Sync {
    /// Write `table` to `dest`, replacing any existing file.
    ///
    /// Cells carrying a hyperlink are written as links showing the
    /// hyperlink text instead of the cell value.
    fn write_table(&self, table: &SheetTable, dest: &Path) -> Result<()>;
}
