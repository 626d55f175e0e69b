use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader as _};
use fractic_server_error::ServerError;

use crate::{
    entities::{RawCell, RawTable},
    errors::{EmptyWorkbook, InvalidWorkbook},
};

pub(crate) trait SalesWorkbookDatasource: Send + Sync {
    /// Reads the first worksheet of an xlsx/xlsm/xlsb/xls/ods workbook.
    fn from_bytes(&self, bytes: Vec<u8>) -> Result<RawTable, ServerError>;
}

pub(crate) struct SalesWorkbookDatasourceImpl;

impl SalesWorkbookDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl SalesWorkbookDatasource for SalesWorkbookDatasourceImpl {
    fn from_bytes(&self, bytes: Vec<u8>) -> Result<RawTable, ServerError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| InvalidWorkbook::with_debug(&e))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(EmptyWorkbook::new)?
            .map_err(|e| InvalidWorkbook::with_debug(&e))?;

        // Ranges start at the first used cell; leading blank rows carry no
        // data and are skipped, leading blank columns are kept.
        let first_column = range.start().map(|(_, column)| column).unwrap_or(0);
        Ok(anchored_table(
            first_column as usize,
            range.rows().map(|row| row.iter().map(raw_cell)),
        ))
    }
}

/// Builds the table so that cell index 0 is always column A.
fn anchored_table<R, C>(first_column: usize, rows: R) -> RawTable
where
    R: Iterator<Item = C>,
    C: Iterator<Item = RawCell>,
{
    let mut rows = rows.map(|cells| {
        std::iter::repeat(RawCell::Empty)
            .take(first_column)
            .chain(cells)
            .collect::<Vec<_>>()
    });
    let header = rows.next().unwrap_or_default();
    RawTable {
        header,
        rows: rows.collect(),
    }
}

fn raw_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty | Data::Error(_) => RawCell::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => RawCell::text(s.as_str()),
        Data::Float(f) => RawCell::Number(*f),
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Bool(b) => RawCell::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| RawCell::Date(d.date()))
            .unwrap_or(RawCell::Number(dt.as_f64())),
    }
}
