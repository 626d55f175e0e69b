use super::{invoice::InvoiceLine, schema::SchemaKind};

// Before journal generation.
// ---

/// Sanitized content of one input sheet.
#[derive(Debug, Clone)]
pub struct SalesRecordSpecs {
    pub schema: SchemaKind,
    /// Non-empty source rows read.
    pub source_rows: usize,
    pub lines: Vec<InvoiceLine>,
    /// Non-empty cells that had to be coerced to zero or blank.
    pub parse_warnings: usize,
}
