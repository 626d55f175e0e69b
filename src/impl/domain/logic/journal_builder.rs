use rust_decimal::Decimal;

use crate::entities::{
    AccountCode, GenerationConfig, JournalLine, Movement, NormalizedInvoice, RateBreakdown,
};

use super::{
    account_mapper::AccountMapper,
    utils::{round_cents, CENT},
};

/// Builds the sales journal entries of each invoice.
///
/// Client legs are debits and revenue/VAT legs are credits; a negative amount
/// (credit note) lands on the opposite side with its absolute value. Legs
/// that round to zero are left out.
#[derive(Debug, Clone)]
pub struct JournalBuilder {
    journal_code: String,
    mapper: AccountMapper,
}

impl JournalBuilder {
    pub fn new(journal_code: impl Into<String>, mapper: AccountMapper) -> Self {
        Self {
            journal_code: journal_code.into(),
            mapper,
        }
    }

    pub fn from_config(config: &GenerationConfig) -> Self {
        Self::new(
            config.journal_code.clone(),
            AccountMapper::new(config.chart.clone()),
        )
    }

    /// Journal lines of one invoice: client leg first, then revenue and VAT
    /// legs. Zero-value invoices produce nothing.
    pub fn build(&self, invoice: &NormalizedInvoice) -> Vec<JournalLine> {
        if invoice.is_zero() {
            return Vec::new();
        }

        let mut legs: Vec<(AccountCode, Movement)> = vec![(
            self.mapper.client_account(&invoice.client_name),
            Movement::debit_signed(invoice.gross_amount),
        )];

        if invoice.is_multi_rate() {
            // Each rate bucket carries its own VAT, never a blended one.
            for bucket in &invoice.breakdown {
                legs.push((
                    self.mapper.revenue_account(bucket.rate).clone(),
                    Movement::credit_signed(bucket.net),
                ));
                legs.push((
                    self.mapper.vat_account().clone(),
                    Movement::credit_signed(bucket_vat(bucket)),
                ));
            }
        } else {
            legs.push((
                self.mapper.revenue_account(invoice.vat_rate).clone(),
                Movement::credit_signed(invoice.net_amount),
            ));
            let vat = invoice.gross_amount.saturating_sub(invoice.net_amount);
            if vat.abs() > CENT {
                legs.push((
                    self.mapper.vat_account().clone(),
                    Movement::credit_signed(vat),
                ));
            }
        }

        let label = label(invoice);
        legs.into_iter()
            .filter(|(_, movement)| !movement.amount().is_zero())
            .map(|(account, movement)| JournalLine {
                date: invoice.date,
                journal_code: self.journal_code.clone(),
                account,
                piece_number: invoice.id.clone(),
                label: label.clone(),
                movement,
            })
            .collect()
    }

    pub fn build_all<'a, I>(&self, invoices: I) -> Vec<JournalLine>
    where
        I: IntoIterator<Item = &'a NormalizedInvoice>,
    {
        invoices
            .into_iter()
            .flat_map(|invoice| self.build(invoice))
            .collect()
    }
}

impl Default for JournalBuilder {
    fn default() -> Self {
        Self::from_config(&GenerationConfig::default())
    }
}

/// VAT of a rate bucket, computed from its net subtotal. Buckets without a
/// single rate keep the VAT found in the source.
fn bucket_vat(bucket: &RateBreakdown) -> Decimal {
    match bucket.rate.percent() {
        Some(percent) => round_cents(bucket.net.saturating_mul(percent) / Decimal::ONE_HUNDRED),
        None => bucket.gross.saturating_sub(bucket.net),
    }
}

fn label(invoice: &NormalizedInvoice) -> String {
    let kind = if invoice.is_credit_note() {
        "Avoir"
    } else {
        "Facture"
    };
    if invoice.client_name.is_empty() {
        format!("{} {}", kind, invoice.id)
    } else {
        format!("{} {} - {}", kind, invoice.id, invoice.client_name)
    }
}
