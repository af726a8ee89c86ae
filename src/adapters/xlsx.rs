use anyhow::{bail, Context, Result};
use chrono::{DateTime, Datelike, Timelike, Utc};
use mergesheet_core::domain::{Cell, CellValue, SheetTable};
use mergesheet_core::ports::SheetSink;
use rust_xlsxwriter::{ExcelDateTime, Format, Table, TableColumn, Workbook, Worksheet};
use std::path::Path;
use tracing::debug;

/// Sheet sink writing `.xlsx` workbooks with rust_xlsxwriter
#[derive(Debug, Default)]
pub struct XlsxSink;

impl XlsxSink {
    pub fn new() -> Self {
        Self
    }
}

impl SheetSink for XlsxSink {
    fn write_table(&self, table: &SheetTable, dest: &Path) -> Result<()> {
        let mut workbook = build_workbook(table)?;
        workbook
            .save(dest)
            .with_context(|| format!("Failed to write workbook: {}", dest.display()))?;
        Ok(())
    }
}

/// Assemble the whole workbook in memory; nothing touches disk until `save`
pub fn build_workbook(table: &SheetTable) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    write_sheet(worksheet, table)?;
    Ok(workbook)
}

fn write_sheet(worksheet: &mut Worksheet, table: &SheetTable) -> Result<()> {
    if table.columns.is_empty() {
        bail!("Table '{}' has no columns", table.table_name);
    }

    worksheet
        .set_name(&table.sheet_name)
        .with_context(|| format!("Invalid sheet name '{}'", table.sheet_name))?;

    let columns: Vec<TableColumn> = table
        .columns
        .iter()
        .map(|c| TableColumn::new().set_header(&c.header))
        .collect();
    let sheet_table = Table::new()
        .set_name(&table.table_name)
        .set_columns(&columns);

    // A table needs at least one body row below its header
    let last_row = u32::try_from(table.rows.len().max(1)).context("Too many rows for a worksheet")?;
    let last_col = u16::try_from(table.columns.len() - 1).context("Too many columns for a worksheet")?;
    worksheet
        .add_table(0, 0, last_row, last_col, &sheet_table)
        .with_context(|| format!("Failed to add table '{}'", table.table_name))?;

    let date_format = Format::new().set_num_format(&table.date_format);
    for (i, row) in table.rows.iter().enumerate() {
        let row_num = u32::try_from(i + 1)?;
        for (j, cell) in row.iter().enumerate() {
            write_cell(worksheet, row_num, u16::try_from(j)?, cell, &date_format)?;
        }
    }

    for (j, column) in table.columns.iter().enumerate() {
        worksheet.set_column_width(u16::try_from(j)?, column.width as f64)?;
    }

    debug!(
        "Laid out {} rows in table '{}' on sheet '{}'",
        table.rows.len(),
        table.table_name,
        table.sheet_name
    );
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    date_format: &Format,
) -> Result<()> {
    if let Some(link) = &cell.hyperlink {
        worksheet.write_url_with_text(row, col, link.url.as_str(), link.text.as_str())?;
        return Ok(());
    }

    match &cell.value {
        CellValue::Empty => {}
        CellValue::Text(text) => {
            worksheet.write_string(row, col, text)?;
        }
        CellValue::Number(n) => {
            worksheet.write_number(row, col, *n)?;
        }
        CellValue::DateTime(dt) => {
            worksheet.write_datetime_with_format(row, col, &excel_datetime(dt)?, date_format)?;
        }
    }
    Ok(())
}

fn excel_datetime(dt: &DateTime<Utc>) -> Result<ExcelDateTime> {
    let year = u16::try_from(dt.year()).with_context(|| format!("Year out of range: {}", dt))?;
    let datetime = ExcelDateTime::from_ymd(year, dt.month() as u8, dt.day() as u8)?
        .and_hms(dt.hour() as u16, dt.minute() as u8, dt.second())?;
    Ok(datetime)
}
