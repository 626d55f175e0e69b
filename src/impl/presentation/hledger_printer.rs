use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;
use iso_currency::Currency;
use rust_decimal::Decimal;

use crate::entities::{AccountCode, InvoiceId, JournalLine, SalesJournal};

use super::utils::format_amount;

impl AccountCode {
    /// French chart class: 41x are receivables, 44x tax liabilities and 7xx
    /// revenue.
    fn ledger(&self) -> String {
        match self.type_tag() {
            'A' => format!("Assets:Receivable:{}", self.as_str()),
            'L' => format!("Liabilities:VAT:{}", self.as_str()),
            'R' => format!("Income:Sales:{}", self.as_str()),
            _ => format!("Equity:Other:{}", self.as_str()),
        }
    }

    fn type_tag(&self) -> char {
        let code = self.as_str();
        if code.starts_with("44") {
            'L'
        } else if code.starts_with('4') {
            'A'
        } else if code.starts_with('7') {
            'R'
        } else {
            'E'
        }
    }
}

pub(crate) struct HledgerPrinter {
    currency: Currency,
}

impl HledgerPrinter {
    pub(crate) fn new() -> Self {
        Self {
            currency: Currency::EUR,
        }
    }

    pub(crate) fn print_ledger(&self, journal: &SalesJournal) -> String {
        let mut ledger_output = String::new();

        ledger_output.push_str(
            "; --- Accounts -----------------------------------------------------------------\n\n",
        );
        self.print_accounts(&mut ledger_output, journal);
        ledger_output.push_str("\n\n");

        ledger_output.push_str(
            "; --- Commodities --------------------------------------------------------------\n\n",
        );
        ledger_output.push_str(&format!(
            "commodity {}\n",
            format_amount(Decimal::ONE_THOUSAND, self.currency)
        ));
        ledger_output.push_str("\n\n");

        ledger_output.push_str(
            "; --- Payees -------------------------------------------------------------------\n\n",
        );
        self.print_payees(&mut ledger_output, journal);
        ledger_output.push_str("\n\n");

        ledger_output.push_str(
            "; --- Transactions -------------------------------------------------------------\n\n",
        );
        self.print_transactions(&mut ledger_output, journal);

        ledger_output
    }

    fn print_accounts(&self, ledger_output: &mut String, journal: &SalesJournal) {
        let accounts: BTreeSet<&AccountCode> = journal.lines.iter().map(|l| &l.account).collect();
        for account in accounts {
            ledger_output.push_str(&format!(
                "account {:61}  ; type: {}\n",
                account.ledger(),
                account.type_tag()
            ));
        }
    }

    fn print_payees(&self, ledger_output: &mut String, journal: &SalesJournal) {
        let payees: BTreeSet<&str> = journal
            .lines
            .iter()
            .filter_map(|l| payee(&l.label))
            .collect();
        for p in payees {
            ledger_output.push_str(&format!("payee {}\n", p));
        }
    }

    /// One transaction per invoice id, in order of first appearance, matching
    /// the balance records. Undated invoices take the earliest date of the run
    /// and are marked as such.
    fn print_transactions(&self, ledger_output: &mut String, journal: &SalesJournal) {
        let fallback_date = journal
            .lines
            .iter()
            .filter_map(|l| l.date)
            .min()
            .unwrap_or_default();
        let imbalances: BTreeMap<&str, (Decimal, Decimal)> = journal
            .balances
            .imbalanced
            .iter()
            .map(|r| (r.invoice_id.0.as_str(), (r.total_debit, r.total_credit)))
            .collect();

        let mut order: Vec<&InvoiceId> = Vec::new();
        let mut transactions: HashMap<&InvoiceId, Vec<&JournalLine>> = HashMap::new();
        for line in &journal.lines {
            transactions
                .entry(&line.piece_number)
                .or_insert_with(|| {
                    order.push(&line.piece_number);
                    Vec::new()
                })
                .push(line);
        }

        for id in order {
            let Some(tx) = transactions.get(id) else {
                continue;
            };
            let Some(first) = tx.first() else {
                continue;
            };
            let date: NaiveDate = first.date.unwrap_or(fallback_date);
            ledger_output.push_str(&format!(
                "{} ({}) {}\n",
                date, first.piece_number, first.label
            ));
            if first.date.is_none() {
                ledger_output.push_str("    ; date missing in source\n");
            }
            for posting in tx {
                ledger_output.push_str(&self.posting(posting));
            }
            if let Some((debit, credit)) = imbalances.get(first.piece_number.0.as_str()) {
                let s = format!(
                    "Imbalanced invoice: total debit {} against total credit {}, hledger will \
                     reject this transaction until the source amounts are corrected.",
                    format_amount(*debit, self.currency),
                    format_amount(*credit, self.currency),
                );
                let prefix = "    ;";
                ledger_output.push_str(&format!("{}\n", prefix));
                for line in textwrap::wrap(&s, 74) {
                    ledger_output.push_str(&format!("{} {}\n", prefix, line));
                }
            }
            ledger_output.push('\n');
        }
    }

    /// Debits are positive, credits negative.
    fn posting(&self, line: &JournalLine) -> String {
        let amount = match line.movement.debit() {
            Some(debit) => debit,
            None => -line.movement.amount(),
        };
        format!(
            "    {:55} {:>20}\n",
            line.account.ledger(),
            format_amount(amount, self.currency),
        )
    }
}

/// Client name part of a "Facture F1 - Client" label.
fn payee(label: &str) -> Option<&str> {
    label
        .split_once(" - ")
        .map(|(_, client)| client.trim())
        .filter(|c| !c.is_empty())
}
