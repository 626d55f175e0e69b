use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::{
    data::{
        datasources::{
            sales_csv_datasource::{SalesCsvDatasource, SalesCsvDatasourceImpl},
            sales_workbook_datasource::{SalesWorkbookDatasource, SalesWorkbookDatasourceImpl},
        },
        models::{amount_model::AmountModel, date_model::DateModel, vat_rate_model::VatRateModel},
    },
    domain::repositories::sales_repository::SalesRepository,
    entities::{
        InvoiceId, InvoiceLine, RawCell, RawTable, SalesInput, SalesRecordSpecs, SchemaStrategy,
        SourceRow,
    },
    errors::{ReadError, UnsupportedInputFormat},
};

const CSV_EXTENSIONS: &[&str] = &["csv", "txt"];
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

pub(crate) struct SalesRepositoryImpl<DS1, DS2>
where
    DS1: SalesCsvDatasource,
    DS2: SalesWorkbookDatasource,
{
    csv_datasource: DS1,
    workbook_datasource: DS2,
    strategy: SchemaStrategy,
}

#[async_trait]
impl<DS1, DS2> SalesRepository for SalesRepositoryImpl<DS1, DS2>
where
    DS1: SalesCsvDatasource,
    DS2: SalesWorkbookDatasource,
{
    fn from_input(&self, input: SalesInput) -> Result<SalesRecordSpecs, ServerError> {
        let table = match input {
            SalesInput::Csv(s) => self.csv_datasource.from_string(&s)?,
            SalesInput::Workbook(bytes) => self.workbook_datasource.from_bytes(bytes)?,
        };
        self.sanitize(&table)
    }

    async fn from_file<P>(&self, path: P) -> Result<SalesRecordSpecs, ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        let input = if CSV_EXTENSIONS.contains(&extension.as_str()) {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|e| ReadError::with_debug(&e))?;
            SalesInput::Csv(decode_text(bytes))
        } else if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
            SalesInput::Workbook(
                tokio::fs::read(path)
                    .await
                    .map_err(|e| ReadError::with_debug(&e))?,
            )
        } else {
            return Err(UnsupportedInputFormat::new(&extension));
        };
        log::info!("reading sales from '{}'", path.display());
        self.from_input(input)
    }
}

impl<DS1, DS2> SalesRepositoryImpl<DS1, DS2>
where
    DS1: SalesCsvDatasource,
    DS2: SalesWorkbookDatasource,
{
    fn sanitize(&self, table: &RawTable) -> Result<SalesRecordSpecs, ServerError> {
        let (schema, rows) = self.strategy.extract(table)?;
        log::debug!("resolved {:?} schema: {:?}", schema.kind, schema);

        let mut parse_warnings = 0;
        let source_rows = rows.len();
        let lines = rows
            .into_iter()
            .map(|row| sanitize_row(row, &mut parse_warnings))
            .collect();
        if parse_warnings > 0 {
            log::warn!(
                "{} cell(s) could not be parsed and were left blank or zero",
                parse_warnings
            );
        }
        Ok(SalesRecordSpecs {
            schema: schema.kind,
            source_rows,
            lines,
            parse_warnings,
        })
    }
}

/// Coerces the raw cells of a row. Unparseable non-empty cells become zero
/// (amounts) or blank (dates, rates) and are counted as warnings.
fn sanitize_row(row: SourceRow, warnings: &mut usize) -> InvoiceLine {
    let n = row.row_number;
    let gross_amount = lenient::<AmountModel>(n, &row.gross_amount, warnings);
    let net_amount = lenient::<AmountModel>(n, &row.net_amount, warnings);
    let date = lenient::<DateModel>(n, &row.date, warnings);
    let explicit_rate = row
        .vat_rate
        .as_ref()
        .and_then(|cell| lenient::<VatRateModel>(n, cell, warnings));

    InvoiceLine {
        row_number: n,
        date: date.map(Into::into),
        invoice_id: InvoiceId(row.invoice_id.display()),
        client_name: row.client_name.display(),
        net_amount: net_amount.map(Into::into).unwrap_or_default(),
        gross_amount: gross_amount.map(Into::into).unwrap_or_default(),
        explicit_rate: explicit_rate.map(Into::into),
    }
}

fn lenient<'a, T>(row_number: usize, cell: &'a RawCell, warnings: &mut usize) -> Option<T>
where
    T: TryFrom<&'a RawCell, Error = ServerError>,
{
    if cell.is_empty() {
        // Blank amounts count as zero, blank dates and rates stay unset.
        return T::try_from(cell).ok();
    }
    match T::try_from(cell) {
        Ok(value) => Some(value),
        Err(_) => {
            log::debug!("row {}: unparseable cell {:?}", row_number, cell);
            *warnings += 1;
            None
        }
    }
}

/// UTF-8 when valid, Windows-1252 style single-byte text otherwise (Latin-1
/// covers the accented letters of French exports).
fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            log::debug!("input is not UTF-8, decoding as Latin-1");
            e.into_bytes().into_iter().map(char::from).collect()
        }
    }
}

impl SalesRepositoryImpl<SalesCsvDatasourceImpl, SalesWorkbookDatasourceImpl> {
    pub(crate) fn new() -> Self {
        SalesRepositoryImpl {
            csv_datasource: SalesCsvDatasourceImpl::new(),
            workbook_datasource: SalesWorkbookDatasourceImpl::new(),
            strategy: SchemaStrategy::default(),
        }
    }
}
