use fractic_server_error::ServerError;

use crate::{
    entities::{RawCell, RawTable},
    errors::InvalidCsv,
};

pub(crate) trait SalesCsvDatasource: Send + Sync {
    fn from_string(&self, s: &str) -> Result<RawTable, ServerError>;
}

pub(crate) struct SalesCsvDatasourceImpl;

impl SalesCsvDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl SalesCsvDatasource for SalesCsvDatasourceImpl {
    fn from_string(&self, s: &str) -> Result<RawTable, ServerError> {
        let s = s.trim_start_matches('\u{feff}');
        let mut records = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(detect_delimiter(s))
            .from_reader(s.as_bytes())
            .into_records()
            .map(|r| {
                r.map_err(|e| InvalidCsv::with_debug(&e))
                    .map(|r| r.iter().map(RawCell::text).collect::<Vec<_>>())
            });
        let header = records.next().transpose()?.unwrap_or_default();
        let rows = records.collect::<Result<Vec<_>, _>>()?;
        Ok(RawTable { header, rows })
    }
}

/// French exports use ';' (the comma being the decimal mark), some tools use
/// tabs; anything else is read as plain comma-separated.
fn detect_delimiter(s: &str) -> u8 {
    let first_line = s.lines().next().unwrap_or("");
    if first_line.contains(';') {
        b';'
    } else if first_line.contains('\t') {
        b'\t'
    } else {
        b','
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_semicolon_exports() {
        let table = SalesCsvDatasourceImpl::new()
            .from_string("\u{feff}Date;Facture;Client;HT;TTC\n02/01/2024;F1;Dupont;100,00;120,00\n")
            .unwrap();
        assert_eq!(table.header[0], RawCell::text("Date"));
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][3], RawCell::text("100,00"));
    }

    #[test]
    fn reads_comma_exports_with_blank_cells() {
        let table = SalesCsvDatasourceImpl::new()
            .from_string("Date,Facture,Client,HT,TTC\n,F1,,100,120\n")
            .unwrap();
        assert_eq!(table.rows[0][0], RawCell::Empty);
        assert_eq!(table.rows[0][4], RawCell::text("120"));
    }

    #[test]
    fn empty_input_is_an_empty_table() {
        let table = SalesCsvDatasourceImpl::new().from_string("").unwrap();
        assert!(table.header.is_empty());
        assert!(table.rows.is_empty());
    }
}
