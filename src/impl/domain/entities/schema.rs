use serde_derive::Serialize;

/// How a canonical field is located in the source sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRef {
    /// Any of the given header names (matched trimmed, case-insensitively).
    Named(&'static [&'static str]),
    /// Fixed 0-based column index.
    Position(usize),
}

/// Which kind of rule matched the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SchemaKind {
    Named,
    Positional,
}

/// Static mapping from canonical fields to source columns.
#[derive(Debug, Clone)]
pub struct ExtractionRule {
    pub kind: SchemaKind,
    pub date: ColumnRef,
    pub invoice_id: ColumnRef,
    pub client_name: ColumnRef,
    pub gross_amount: ColumnRef,
    pub net_amount: ColumnRef,
    /// Optional: the rule still matches when this column is absent.
    pub vat_rate: Option<ColumnRef>,
}

/// Ordered list of candidate rules, first match wins.
#[derive(Debug, Clone)]
pub struct SchemaStrategy {
    pub rules: Vec<ExtractionRule>,
}

/// Column indices resolved for one particular table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSchema {
    pub kind: SchemaKind,
    pub date: usize,
    pub invoice_id: usize,
    pub client_name: usize,
    pub gross_amount: usize,
    pub net_amount: usize,
    pub vat_rate: Option<usize>,
    /// Whether the first row of the table holds data rather than headers.
    pub first_row_is_data: bool,
}

// Canonical layouts.
// ---

pub const DATE_NAMES: &[&str] = &["Date"];
pub const INVOICE_ID_NAMES: &[&str] = &["Facture", "N° Facture"];
pub const CLIENT_NAME_NAMES: &[&str] = &["Client", "Nom Facture"];
pub const GROSS_AMOUNT_NAMES: &[&str] = &["TTC", "Total TTC"];
pub const NET_AMOUNT_NAMES: &[&str] = &["HT", "Total HT"];
pub const VAT_RATE_NAMES: &[&str] = &["Taux de tva", "Taux TVA"];

/// Columns C, D, E, I, J. Column I carries the gross (TTC) amount and column J
/// the net (HT) amount.
pub const POSITIONAL_MIN_COLUMNS: usize = 10;

impl Default for SchemaStrategy {
    fn default() -> Self {
        Self {
            rules: vec![
                ExtractionRule {
                    kind: SchemaKind::Named,
                    date: ColumnRef::Named(DATE_NAMES),
                    invoice_id: ColumnRef::Named(INVOICE_ID_NAMES),
                    client_name: ColumnRef::Named(CLIENT_NAME_NAMES),
                    gross_amount: ColumnRef::Named(GROSS_AMOUNT_NAMES),
                    net_amount: ColumnRef::Named(NET_AMOUNT_NAMES),
                    vat_rate: Some(ColumnRef::Named(VAT_RATE_NAMES)),
                },
                ExtractionRule {
                    kind: SchemaKind::Positional,
                    date: ColumnRef::Position(2),
                    invoice_id: ColumnRef::Position(3),
                    client_name: ColumnRef::Position(4),
                    gross_amount: ColumnRef::Position(8),
                    net_amount: ColumnRef::Position(9),
                    vat_rate: None,
                },
            ],
        }
    }
}
