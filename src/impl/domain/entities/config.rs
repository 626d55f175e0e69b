use super::account::ChartOfAccounts;

/// What a source row stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowLayout {
    /// Rows are invoice lines; rows sharing an invoice id are merged.
    #[default]
    InvoiceLines,
    /// Each row is a whole invoice.
    InvoiceTotals,
}

/// Rendering options for exported sheets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetFormat {
    pub delimiter: u8,
    pub decimal_comma: bool,
    /// chrono format string.
    pub date_format: String,
    pub byte_order_mark: bool,
}

impl Default for SheetFormat {
    fn default() -> Self {
        // Settings under which a French Excel opens the file directly.
        Self {
            delimiter: b';',
            decimal_comma: true,
            date_format: "%d/%m/%Y".to_string(),
            byte_order_mark: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    pub journal_code: String,
    pub chart: ChartOfAccounts,
    pub layout: RowLayout,
    pub sheet_format: SheetFormat,
    /// How many imbalanced invoice ids the summary lists.
    pub imbalance_display_limit: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            journal_code: "VT".to_string(),
            chart: ChartOfAccounts::default(),
            layout: RowLayout::default(),
            sheet_format: SheetFormat::default(),
            imbalance_display_limit: 10,
        }
    }
}
