use rust_decimal::Decimal;
use serde_derive::Serialize;

use super::invoice::InvoiceId;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceBalanceRecord {
    pub invoice_id: InvoiceId,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    /// `round(total_debit - total_credit, 2)`.
    pub diff: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BalanceReport {
    /// One record per invoice id, in order of first appearance.
    pub records: Vec<InvoiceBalanceRecord>,
    /// Records whose diff exceeds the cent tolerance.
    pub imbalanced: Vec<InvoiceBalanceRecord>,
}

impl BalanceReport {
    pub fn is_balanced(&self) -> bool {
        self.imbalanced.is_empty()
    }

    pub fn get(&self, invoice_id: &InvoiceId) -> Option<&InvoiceBalanceRecord> {
        self.records.iter().find(|r| &r.invoice_id == invoice_id)
    }
}
