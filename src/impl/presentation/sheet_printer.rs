use rust_decimal::Decimal;

use crate::entities::{InvoiceBalanceRecord, JournalLine, SalesJournal, Sheet, SheetFormat};

use super::utils::format_cell_amount;

pub const JOURNAL_SHEET: &str = "Ecritures_Ventes";
pub const BALANCE_SHEET: &str = "Controle_Equilibre";
pub const IMBALANCE_SHEET: &str = "Desequilibres";

const JOURNAL_HEADER: [&str; 7] = [
    "Date",
    "Journal",
    "Numéro de compte",
    "Numéro de pièce",
    "Libellé",
    "Débit",
    "Crédit",
];
const BALANCE_HEADER: [&str; 4] = [
    "Facture",
    "Total Débit",
    "Total Crédit",
    "Diff (Débit - Crédit)",
];

/// Renders a generated journal into export sheets, in a fixed order.
pub struct SheetPrinter {
    format: SheetFormat,
}

impl SheetPrinter {
    pub fn new(format: SheetFormat) -> Self {
        Self { format }
    }

    /// Journal and balance sheets, followed by the imbalance sheet when at
    /// least one invoice is imbalanced.
    pub fn print_sheets(&self, journal: &SalesJournal) -> Vec<Sheet> {
        let mut sheets = vec![
            self.journal_sheet(&journal.lines),
            self.balance_sheet(BALANCE_SHEET, &journal.balances.records),
        ];
        if !journal.balances.imbalanced.is_empty() {
            sheets.push(self.balance_sheet(IMBALANCE_SHEET, &journal.balances.imbalanced));
        }
        sheets
    }

    fn journal_sheet(&self, lines: &[JournalLine]) -> Sheet {
        Sheet {
            name: JOURNAL_SHEET.to_string(),
            header: JOURNAL_HEADER.iter().map(|h| h.to_string()).collect(),
            rows: lines
                .iter()
                .map(|line| {
                    vec![
                        line.date
                            .map(|d| d.format(&self.format.date_format).to_string())
                            .unwrap_or_default(),
                        line.journal_code.clone(),
                        line.account.to_string(),
                        line.piece_number.to_string(),
                        line.label.clone(),
                        self.optional_amount(line.movement.debit()),
                        self.optional_amount(line.movement.credit()),
                    ]
                })
                .collect(),
        }
    }

    fn balance_sheet(&self, name: &str, records: &[InvoiceBalanceRecord]) -> Sheet {
        Sheet {
            name: name.to_string(),
            header: BALANCE_HEADER.iter().map(|h| h.to_string()).collect(),
            rows: records
                .iter()
                .map(|r| {
                    vec![
                        r.invoice_id.to_string(),
                        self.amount(r.total_debit),
                        self.amount(r.total_credit),
                        self.amount(r.diff),
                    ]
                })
                .collect(),
        }
    }

    fn amount(&self, amount: Decimal) -> String {
        format_cell_amount(amount, self.format.decimal_comma)
    }

    /// Side not taken by the movement stays blank.
    fn optional_amount(&self, amount: Option<Decimal>) -> String {
        amount.map(|a| self.amount(a)).unwrap_or_default()
    }
}
