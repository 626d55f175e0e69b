use std::str::FromStr as _;

use fractic_server_error::ServerError;

use crate::{
    data::models::amount_model::AmountModel,
    entities::{
        ColumnRef, ExtractionRule, RawCell, RawTable, ResolvedSchema, SchemaStrategy, SourceRow,
        POSITIONAL_MIN_COLUMNS,
    },
    errors::MissingColumns,
};

impl SchemaStrategy {
    /// Resolves the first rule matching the table.
    pub fn resolve(&self, table: &RawTable) -> Result<ResolvedSchema, ServerError> {
        self.rules
            .iter()
            .find_map(|rule| rule.resolve(table))
            .ok_or_else(|| MissingColumns::new(&self.requirement()))
    }

    /// Resolves the schema and extracts the canonical rows. Fully empty rows
    /// are dropped.
    pub fn extract(
        &self,
        table: &RawTable,
    ) -> Result<(ResolvedSchema, Vec<SourceRow>), ServerError> {
        let schema = self.resolve(table)?;
        let header_as_data = schema
            .first_row_is_data
            .then_some((1, &table.header));
        let rows = header_as_data
            .into_iter()
            .chain(table.rows.iter().enumerate().map(|(i, r)| (i + 2, r)))
            .filter(|(_, row)| !row.iter().all(RawCell::is_empty))
            .map(|(row_number, row)| schema.source_row(row_number, row))
            .collect();
        Ok((schema, rows))
    }

    fn requirement(&self) -> String {
        self.rules
            .iter()
            .map(ExtractionRule::requirement)
            .collect::<Vec<_>>()
            .join(", or ")
    }
}

impl ExtractionRule {
    fn resolve(&self, table: &RawTable) -> Option<ResolvedSchema> {
        let width = table.width();
        let locate = |column: &ColumnRef| -> Option<usize> {
            match column {
                ColumnRef::Named(names) => table.header.iter().position(|cell| match cell {
                    RawCell::Text(h) => names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)),
                    _ => false,
                }),
                ColumnRef::Position(i) if width >= POSITIONAL_MIN_COLUMNS && *i < width => {
                    Some(*i)
                }
                ColumnRef::Position(_) => None,
            }
        };
        let gross_amount = locate(&self.gross_amount)?;
        let net_amount = locate(&self.net_amount)?;
        let positional = matches!(self.gross_amount, ColumnRef::Position(_));
        Some(ResolvedSchema {
            kind: self.kind,
            date: locate(&self.date)?,
            invoice_id: locate(&self.invoice_id)?,
            client_name: locate(&self.client_name)?,
            gross_amount,
            net_amount,
            vat_rate: self.vat_rate.as_ref().and_then(locate),
            first_row_is_data: positional
                && is_strict_amount(table.header.get(gross_amount))
                && is_strict_amount(table.header.get(net_amount)),
        })
    }

    fn requirement(&self) -> String {
        let fields = [
            &self.date,
            &self.invoice_id,
            &self.client_name,
            &self.gross_amount,
            &self.net_amount,
        ];
        if fields.iter().all(|f| matches!(f, ColumnRef::Named(_))) {
            let names = fields
                .iter()
                .map(|f| match f {
                    ColumnRef::Named(names) => names.join("/"),
                    ColumnRef::Position(i) => i.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("header columns {}", names)
        } else {
            format!("at least {} columns (C, D, E, I, J)", POSITIONAL_MIN_COLUMNS)
        }
    }
}

impl ResolvedSchema {
    fn source_row(&self, row_number: usize, row: &[RawCell]) -> SourceRow {
        let cell = |i: usize| row.get(i).cloned().unwrap_or(RawCell::Empty);
        SourceRow {
            row_number,
            date: cell(self.date),
            invoice_id: cell(self.invoice_id),
            client_name: cell(self.client_name),
            gross_amount: cell(self.gross_amount),
            net_amount: cell(self.net_amount),
            vat_rate: self.vat_rate.map(cell),
        }
    }
}

/// A header row never holds amounts, a data row of a headerless file does.
fn is_strict_amount(cell: Option<&RawCell>) -> bool {
    match cell {
        Some(RawCell::Number(n)) => n.is_finite(),
        Some(RawCell::Text(s)) => AmountModel::from_str(s).is_ok(),
        _ => false,
    }
}
