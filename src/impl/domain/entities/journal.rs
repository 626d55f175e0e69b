use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_derive::Serialize;

use super::{
    account::AccountCode, balance::BalanceReport, invoice::InvoiceId, summary::RunSummary,
};

/// Side and (positive) amount of a journal line. Holding a single variant
/// keeps the other side empty rather than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Movement {
    Debit(Decimal),
    Credit(Decimal),
}

impl Movement {
    /// Debit for a positive amount, credit (of the absolute value) for a
    /// negative one.
    pub fn debit_signed(amount: Decimal) -> Self {
        if amount.is_sign_negative() {
            Movement::Credit(amount.abs())
        } else {
            Movement::Debit(amount)
        }
    }

    /// Credit for a positive amount, debit (of the absolute value) for a
    /// negative one.
    pub fn credit_signed(amount: Decimal) -> Self {
        if amount.is_sign_negative() {
            Movement::Debit(amount.abs())
        } else {
            Movement::Credit(amount)
        }
    }

    pub fn debit(&self) -> Option<Decimal> {
        match self {
            Movement::Debit(d) => Some(*d),
            Movement::Credit(_) => None,
        }
    }

    pub fn credit(&self) -> Option<Decimal> {
        match self {
            Movement::Debit(_) => None,
            Movement::Credit(c) => Some(*c),
        }
    }

    pub fn amount(&self) -> Decimal {
        match self {
            Movement::Debit(a) | Movement::Credit(a) => *a,
        }
    }

    /// Same amount on the opposite side.
    pub fn flipped(&self) -> Self {
        match self {
            Movement::Debit(a) => Movement::Credit(*a),
            Movement::Credit(a) => Movement::Debit(*a),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalLine {
    pub date: Option<NaiveDate>,
    pub journal_code: String,
    pub account: AccountCode,
    pub piece_number: InvoiceId,
    pub label: String,
    pub movement: Movement,
}

/// Output of one generation run.
#[derive(Debug, Clone, Serialize)]
pub struct SalesJournal {
    pub lines: Vec<JournalLine>,
    pub balances: BalanceReport,
    pub summary: RunSummary,
}
