use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_derive::Serialize;

use super::vat_rate::VatRate;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct InvoiceId(pub String);

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sanitized source row. Amounts are already rounded to cents.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceLine {
    pub row_number: usize,
    pub date: Option<NaiveDate>,
    pub invoice_id: InvoiceId,
    pub client_name: String,
    pub net_amount: Decimal,
    pub gross_amount: Decimal,
    /// Explicit rate in percent, when the source carries a rate column.
    pub explicit_rate: Option<Decimal>,
}

impl InvoiceLine {
    pub fn is_zero(&self) -> bool {
        self.net_amount.is_zero() && self.gross_amount.is_zero()
    }
}

/// Subtotal of an invoice for one VAT rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateBreakdown {
    pub rate: VatRate,
    pub net: Decimal,
    pub gross: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedInvoice {
    pub id: InvoiceId,
    pub date: Option<NaiveDate>,
    pub client_name: String,
    pub net_amount: Decimal,
    pub gross_amount: Decimal,
    /// `Mixed` when the breakdown holds more than one rate.
    pub vat_rate: VatRate,
    /// Per-rate subtotals in first-appearance order. Empty for zero-value
    /// invoices.
    pub breakdown: Vec<RateBreakdown>,
}

impl NormalizedInvoice {
    pub fn is_zero(&self) -> bool {
        self.net_amount.is_zero() && self.gross_amount.is_zero()
    }

    pub fn is_credit_note(&self) -> bool {
        self.gross_amount.is_sign_negative() && !self.gross_amount.is_zero()
    }

    pub fn is_multi_rate(&self) -> bool {
        self.breakdown.len() > 1
    }
}
