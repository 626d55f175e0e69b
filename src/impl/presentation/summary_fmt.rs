use std::fmt;

use iso_currency::Currency;
use num_format::{Locale, ToFormattedString as _};

use crate::entities::{RunSummary, SchemaKind};

use super::utils::format_amount;

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaKind::Named => write!(f, "named columns"),
            SchemaKind::Positional => write!(f, "fixed column positions"),
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = |n: usize| n.to_formatted_string(&Locale::en);
        writeln!(f, "Layout:              {}", self.schema)?;
        writeln!(f, "Source rows:         {}", count(self.source_rows))?;
        writeln!(f, "Invoices processed:  {}", count(self.invoices_processed))?;
        writeln!(f, "Invoices skipped:    {}", count(self.invoices_skipped))?;
        if self.undecomposed_mixed > 0 {
            writeln!(f, "Mixed, no detail:    {}", count(self.undecomposed_mixed))?;
        }
        if self.parse_warnings > 0 {
            writeln!(f, "Unparsed cells:      {}", count(self.parse_warnings))?;
        }
        writeln!(f, "Journal lines:       {}", count(self.journal_lines))?;
        writeln!(
            f,
            "Total debit:         {}",
            format_amount(self.total_debit, Currency::EUR)
        )?;
        writeln!(
            f,
            "Total credit:        {}",
            format_amount(self.total_credit, Currency::EUR)
        )?;

        if self.imbalanced_count == 0 {
            return writeln!(f, "All invoices balanced.");
        }
        writeln!(f, "Imbalanced invoices: {}", count(self.imbalanced_count))?;
        let mut ids = self
            .imbalanced_sample
            .iter()
            .map(|id| id.0.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        if self.imbalanced_count > self.imbalanced_sample.len() {
            ids.push_str(&format!(
                " (+{} more)",
                self.imbalanced_count - self.imbalanced_sample.len()
            ));
        }
        let options = textwrap::Options::new(78)
            .initial_indent("  ")
            .subsequent_indent("  ");
        for line in textwrap::wrap(&ids, options) {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
