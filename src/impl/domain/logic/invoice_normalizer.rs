use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::entities::{
    InvoiceId, InvoiceLine, NormalizedInvoice, RateBreakdown, RowLayout, VatRate,
};

use super::vat_classifier::classify_line;

pub(crate) struct InvoiceNormalizer {
    layout: RowLayout,
}

/// Accumulator for one invoice.
struct Group {
    invoice: NormalizedInvoice,
}

impl Group {
    fn new(line: &InvoiceLine) -> Self {
        Self {
            invoice: NormalizedInvoice {
                id: line.invoice_id.clone(),
                date: None,
                client_name: String::new(),
                net_amount: Decimal::ZERO,
                gross_amount: Decimal::ZERO,
                vat_rate: VatRate::Exempt,
                breakdown: Vec::new(),
            },
        }
    }

    fn add(&mut self, line: InvoiceLine) {
        let invoice = &mut self.invoice;
        if invoice.date.is_none() {
            invoice.date = line.date;
        }
        if invoice.client_name.is_empty() {
            invoice.client_name = line.client_name.clone();
        }
        if line.is_zero() {
            return;
        }
        invoice.net_amount = invoice.net_amount.saturating_add(line.net_amount);
        invoice.gross_amount = invoice.gross_amount.saturating_add(line.gross_amount);

        let rate = classify_line(line.net_amount, line.gross_amount, line.explicit_rate);
        match invoice.breakdown.iter_mut().find(|b| b.rate == rate) {
            Some(bucket) => {
                bucket.net = bucket.net.saturating_add(line.net_amount);
                bucket.gross = bucket.gross.saturating_add(line.gross_amount);
            }
            None => invoice.breakdown.push(RateBreakdown {
                rate,
                net: line.net_amount,
                gross: line.gross_amount,
            }),
        }
    }

    fn finish(self) -> NormalizedInvoice {
        let mut invoice = self.invoice;
        invoice.vat_rate = match invoice.breakdown.as_slice() {
            [] => VatRate::Exempt,
            [single] => single.rate,
            _ => VatRate::Mixed,
        };
        invoice
    }
}

impl InvoiceNormalizer {
    pub(crate) fn new(layout: RowLayout) -> Self {
        Self { layout }
    }

    /// Turns sanitized lines into invoices, in order of first appearance.
    pub(crate) fn process(&self, lines: Vec<InvoiceLine>) -> Vec<NormalizedInvoice> {
        let mut groups: Vec<Group> = Vec::new();
        let mut index: HashMap<InvoiceId, usize> = HashMap::new();
        for line in lines {
            // Lines without an invoice number cannot be told apart.
            let key = match self.layout {
                RowLayout::InvoiceLines if !line.invoice_id.0.is_empty() => {
                    Some(line.invoice_id.clone())
                }
                _ => None,
            };
            let existing = key.as_ref().and_then(|k| index.get(k).copied());
            let slot = match existing {
                Some(i) => i,
                None => {
                    groups.push(Group::new(&line));
                    if let Some(k) = key {
                        index.insert(k, groups.len() - 1);
                    }
                    groups.len() - 1
                }
            };
            groups[slot].add(line);
        }
        groups.into_iter().map(Group::finish).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(id: &str, client: &str, net: Decimal, gross: Decimal) -> InvoiceLine {
        InvoiceLine {
            row_number: 0,
            date: None,
            invoice_id: InvoiceId(id.to_string()),
            client_name: client.to_string(),
            net_amount: net,
            gross_amount: gross,
            explicit_rate: None,
        }
    }

    #[test]
    fn single_rate_lines_merge_into_one_bucket() {
        let invoices = InvoiceNormalizer::new(RowLayout::InvoiceLines).process(vec![
            line("F1", "Dupont", dec!(100), dec!(120)),
            line("F2", "Martin", dec!(10), dec!(11)),
            line("F1", "", dec!(50), dec!(60)),
        ]);
        assert_eq!(invoices.len(), 2);
        assert_eq!(invoices[0].id.0, "F1");
        assert_eq!(invoices[0].client_name, "Dupont");
        assert_eq!(invoices[0].net_amount, dec!(150));
        assert_eq!(invoices[0].gross_amount, dec!(180));
        assert_eq!(invoices[0].vat_rate, VatRate::Standard);
        assert_eq!(invoices[0].breakdown.len(), 1);
        assert_eq!(invoices[1].vat_rate, VatRate::Intermediate);
    }

    #[test]
    fn distinct_rates_make_a_mixed_invoice() {
        let invoices = InvoiceNormalizer::new(RowLayout::InvoiceLines).process(vec![
            line("F1", "Dupont", dec!(100), dec!(120)),
            line("F1", "Dupont", dec!(50), dec!(55)),
        ]);
        assert_eq!(invoices.len(), 1);
        let invoice = &invoices[0];
        assert_eq!(invoice.vat_rate, VatRate::Mixed);
        assert_eq!(
            invoice.breakdown,
            vec![
                RateBreakdown {
                    rate: VatRate::Standard,
                    net: dec!(100),
                    gross: dec!(120),
                },
                RateBreakdown {
                    rate: VatRate::Intermediate,
                    net: dec!(50),
                    gross: dec!(55),
                },
            ]
        );
    }

    #[test]
    fn explicit_rates_drive_the_breakdown() {
        let mut first = line("F1", "Dupont", dec!(100), dec!(120));
        first.explicit_rate = Some(dec!(20));
        let mut second = line("F1", "Dupont", dec!(50), dec!(52.75));
        second.explicit_rate = Some(dec!(5.5));
        let invoices = InvoiceNormalizer::new(RowLayout::InvoiceLines).process(vec![first, second]);
        assert_eq!(invoices[0].breakdown[0].rate, VatRate::Standard);
        assert_eq!(invoices[0].breakdown[1].rate, VatRate::Reduced);
    }

    #[test]
    fn zero_lines_do_not_add_rates() {
        let invoices = InvoiceNormalizer::new(RowLayout::InvoiceLines).process(vec![
            line("F1", "Dupont", dec!(100), dec!(120)),
            line("F1", "Dupont", dec!(0), dec!(0)),
            line("F2", "Martin", dec!(0), dec!(0)),
        ]);
        assert_eq!(invoices[0].vat_rate, VatRate::Standard);
        assert!(invoices[1].is_zero());
        assert!(invoices[1].breakdown.is_empty());
    }

    #[test]
    fn totals_layout_and_blank_ids_stay_separate() {
        let invoices = InvoiceNormalizer::new(RowLayout::InvoiceTotals).process(vec![
            line("F1", "Dupont", dec!(100), dec!(120)),
            line("F1", "Dupont", dec!(50), dec!(60)),
        ]);
        assert_eq!(invoices.len(), 2);

        let invoices = InvoiceNormalizer::new(RowLayout::InvoiceLines).process(vec![
            line("", "Dupont", dec!(100), dec!(120)),
            line("", "Martin", dec!(50), dec!(60)),
        ]);
        assert_eq!(invoices.len(), 2);
        assert_eq!(invoices[1].client_name, "Martin");
    }
}
