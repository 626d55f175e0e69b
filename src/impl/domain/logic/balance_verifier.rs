use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::entities::{BalanceReport, InvoiceBalanceRecord, InvoiceId, JournalLine};

use super::utils::{round_cents, CENT};

/// Sums debits and credits per invoice and flags every invoice whose
/// difference exceeds one cent. This only reports; nothing is corrected.
pub fn verify(lines: &[JournalLine]) -> BalanceReport {
    let mut order: Vec<InvoiceId> = Vec::new();
    let mut sums: HashMap<&InvoiceId, (Decimal, Decimal)> = HashMap::new();
    for line in lines {
        let entry = sums.entry(&line.piece_number).or_insert_with(|| {
            order.push(line.piece_number.clone());
            (Decimal::ZERO, Decimal::ZERO)
        });
        entry.0 = entry.0.saturating_add(line.movement.debit().unwrap_or_default());
        entry.1 = entry.1.saturating_add(line.movement.credit().unwrap_or_default());
    }

    let records: Vec<InvoiceBalanceRecord> = order
        .into_iter()
        .map(|invoice_id| {
            let (debit, credit) = sums.get(&invoice_id).copied().unwrap_or_default();
            let total_debit = round_cents(debit);
            let total_credit = round_cents(credit);
            InvoiceBalanceRecord {
                invoice_id,
                total_debit,
                total_credit,
                diff: round_cents(total_debit.saturating_sub(total_credit)),
            }
        })
        .collect();
    let imbalanced = records
        .iter()
        .filter(|r| r.diff.abs() > CENT)
        .cloned()
        .collect();

    BalanceReport {
        records,
        imbalanced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{account, Movement};
    use rust_decimal_macros::dec;

    fn line(piece: &str, movement: Movement) -> JournalLine {
        JournalLine {
            date: None,
            journal_code: "VT".to_string(),
            account: account("411"),
            piece_number: InvoiceId(piece.to_string()),
            label: String::new(),
            movement,
        }
    }

    #[test]
    fn accumulates_per_invoice_in_order() {
        let report = verify(&[
            line("F2", Movement::Debit(dec!(120))),
            line("F1", Movement::Debit(dec!(10))),
            line("F2", Movement::Credit(dec!(100))),
            line("F2", Movement::Credit(dec!(20))),
            line("F1", Movement::Credit(dec!(10))),
        ]);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].invoice_id.0, "F2");
        assert_eq!(report.records[0].total_debit, dec!(120));
        assert_eq!(report.records[0].total_credit, dec!(120));
        assert_eq!(report.records[0].diff, Decimal::ZERO);
        assert!(report.is_balanced());
    }

    #[test]
    fn one_cent_is_tolerated_two_are_not() {
        let report = verify(&[
            line("F1", Movement::Debit(dec!(100.01))),
            line("F1", Movement::Credit(dec!(100))),
            line("F2", Movement::Debit(dec!(100.02))),
            line("F2", Movement::Credit(dec!(100))),
        ]);
        assert_eq!(report.imbalanced.len(), 1);
        assert_eq!(report.imbalanced[0].invoice_id.0, "F2");
        assert_eq!(report.imbalanced[0].diff, dec!(0.02));
    }

    #[test]
    fn out_of_range_sums_do_not_abort() {
        let report = verify(&[
            line("F1", Movement::Debit(Decimal::MAX)),
            line("F1", Movement::Debit(Decimal::MAX)),
            line("F1", Movement::Credit(dec!(1))),
        ]);
        assert_eq!(report.records[0].total_debit, Decimal::MAX);
        assert_eq!(report.imbalanced.len(), 1);
    }

    #[test]
    fn no_lines_no_records() {
        assert!(verify(&[]).records.is_empty());
    }
}
