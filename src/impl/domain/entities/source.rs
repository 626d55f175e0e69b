use chrono::NaiveDate;

/// Cell value as delivered by a tabular datasource, before any sanitizing.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Bool(bool),
}

impl RawCell {
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.trim().is_empty() {
            RawCell::Empty
        } else {
            RawCell::Text(s)
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RawCell::Empty => true,
            RawCell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Textual form of the cell, as a spreadsheet would display it for an
    /// identifier or a name (integral numbers without a trailing ".0").
    pub fn display(&self) -> String {
        match self {
            RawCell::Empty => String::new(),
            RawCell::Text(s) => s.trim().to_string(),
            RawCell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            RawCell::Number(n) => n.to_string(),
            RawCell::Date(d) => d.format("%Y-%m-%d").to_string(),
            RawCell::Bool(b) => b.to_string(),
        }
    }
}

/// Raw sheet: the first row of the source is kept apart as `header`, exactly
/// as read. Whether it really is a header is decided by schema resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub header: Vec<RawCell>,
    pub rows: Vec<Vec<RawCell>>,
}

impl RawTable {
    /// Widest row of the table (header included).
    pub fn width(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0)
    }
}

/// Record in canonical field order, still holding raw cell values.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    /// 1-based row number in the source sheet (header is row 1).
    pub row_number: usize,
    pub date: RawCell,
    pub invoice_id: RawCell,
    pub client_name: RawCell,
    pub gross_amount: RawCell,
    pub net_amount: RawCell,
    pub vat_rate: Option<RawCell>,
}

/// Input handed over by the upload glue.
#[derive(Debug, Clone)]
pub enum SalesInput {
    Csv(String),
    Workbook(Vec<u8>),
}
