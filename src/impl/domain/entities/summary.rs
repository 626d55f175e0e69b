use rust_decimal::Decimal;
use serde_derive::Serialize;

use super::{invoice::InvoiceId, schema::SchemaKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub schema: SchemaKind,
    pub source_rows: usize,
    pub invoices_processed: usize,
    /// Invoices with zero net and gross, which produce no entries.
    pub invoices_skipped: usize,
    /// "Mixed" invoices without line detail, posted on the mixed bucket.
    pub undecomposed_mixed: usize,
    pub journal_lines: usize,
    /// Non-empty amounts, dates or rates that could not be parsed.
    pub parse_warnings: usize,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    pub imbalanced_count: usize,
    /// First imbalanced invoice ids, capped at the display limit.
    pub imbalanced_sample: Vec<InvoiceId>,
}
