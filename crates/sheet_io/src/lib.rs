use log::debug;
use quote_model::{AttributeValue, TabularResult};
use std::error::Error;
use std::fmt;
use std::path::Path;
use umya_spreadsheet::{Worksheet, reader, writer};

pub const CURRENT_SHEET: &str = "Stock_Current";
pub const HISTORY_SHEET: &str = "Stock_History";

/// Header attributes and ticker list read from the current sheet.
#[derive(Debug)]
pub struct InputSheets {
    pub attributes: Vec<String>,
    pub tickers: Vec<String>,
}

/// Read the attribute names (row 1, columns 2..) and tickers (column 1,
/// rows 2..) from the current sheet. Both worksheets must exist.
pub fn read_input(path: &Path) -> Result<InputSheets, SheetError> {
    let book = reader::xlsx::read(path).map_err(|e| SheetError::Open(format!("{:?}", e)))?;

    if book.get_sheet_by_name(HISTORY_SHEET).is_none() {
        return Err(SheetError::SheetMissing(HISTORY_SHEET.to_string()));
    }
    let current = book
        .get_sheet_by_name(CURRENT_SHEET)
        .ok_or_else(|| SheetError::SheetMissing(CURRENT_SHEET.to_string()))?;

    let highest_column = current.get_highest_column();
    let highest_row = current.get_highest_row();
    debug!(
        "read_input | columns: {} | rows: {}",
        highest_column, highest_row
    );

    let mut attributes = Vec::new();
    for column in 2..=highest_column {
        let raw = current.get_value((column, 1));
        if raw.trim().is_empty() {
            return Err(SheetError::MalformedHeader { column });
        }
        attributes.push(raw.trim().to_string());
    }

    // Trailing formatted-but-empty cells show up inside the used range.
    let mut tickers = Vec::new();
    for row in 2..=highest_row {
        let value = current.get_value((1, row));
        let ticker = value.trim();
        if !ticker.is_empty() {
            tickers.push(ticker.to_string());
        }
    }

    Ok(InputSheets {
        attributes,
        tickers,
    })
}

/// Overwrite the body of the current sheet from row 2 down. The header row
/// stays; rows beyond the new record count are not cleared.
pub fn write_current(path: &Path, table: &TabularResult) -> Result<(), SheetError> {
    let mut book = reader::xlsx::read(path).map_err(|e| SheetError::Open(format!("{:?}", e)))?;
    let sheet = book
        .get_sheet_by_name_mut(CURRENT_SHEET)
        .ok_or_else(|| SheetError::SheetMissing(CURRENT_SHEET.to_string()))?;

    write_rows(sheet, 2, table);

    writer::xlsx::write(&book, path).map_err(|e| SheetError::Save(format!("{:?}", e)))
}

/// Append the records after the last used row of the history sheet.
pub fn append_history(path: &Path, table: &TabularResult) -> Result<(), SheetError> {
    let mut book = reader::xlsx::read(path).map_err(|e| SheetError::Open(format!("{:?}", e)))?;
    let sheet = book
        .get_sheet_by_name_mut(HISTORY_SHEET)
        .ok_or_else(|| SheetError::SheetMissing(HISTORY_SHEET.to_string()))?;

    let start_row = sheet.get_highest_row() + 1;
    debug!("append_history | start row: {}", start_row);
    write_rows(sheet, start_row, table);

    writer::xlsx::write(&book, path).map_err(|e| SheetError::Save(format!("{:?}", e)))
}

fn write_rows(sheet: &mut Worksheet, start_row: u32, table: &TabularResult) {
    for (row_offset, record) in table.rows.iter().enumerate() {
        for (column_offset, value) in record.iter().enumerate() {
            let cell =
                sheet.get_cell_mut((column_offset as u32 + 1, start_row + row_offset as u32));
            match value {
                AttributeValue::Number(number) => {
                    cell.set_value_number(*number);
                }
                AttributeValue::Date(date) => {
                    cell.set_value_string(date.to_string());
                }
                AttributeValue::Text(text) => {
                    cell.set_value_string(text.clone());
                }
            }
        }
    }
}

#[derive(Debug)]
pub enum SheetError {
    Open(String),
    SheetMissing(String),
    MalformedHeader { column: u32 },
    Save(String),
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SheetError::Open(e) => write!(f, "Could not open workbook: {}", e),
            SheetError::SheetMissing(name) => write!(f, "Worksheet {} not found", name),
            SheetError::MalformedHeader { column } => {
                write!(f, "Blank header cell in column {}", column)
            }
            SheetError::Save(e) => write!(f, "Could not save workbook: {}", e),
        }
    }
}

impl Error for SheetError {}
