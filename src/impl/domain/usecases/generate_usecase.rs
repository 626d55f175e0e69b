use async_trait::async_trait;
use fractic_server_error::ServerError;
use rust_decimal::Decimal;

use crate::{
    data::{
        datasources::{
            sales_csv_datasource::SalesCsvDatasourceImpl,
            sales_workbook_datasource::SalesWorkbookDatasourceImpl,
        },
        repositories::sales_repository_impl::SalesRepositoryImpl,
    },
    domain::{
        logic::{
            balance_verifier::verify, invoice_normalizer::InvoiceNormalizer,
            journal_builder::JournalBuilder,
        },
        repositories::sales_repository::SalesRepository,
    },
    entities::{
        GenerationConfig, NormalizedInvoice, RunSummary, SalesInput, SalesJournal,
        SalesRecordSpecs, VatRate,
    },
};

#[async_trait]
pub trait GenerateUsecase: Send + Sync {
    async fn from_input(&self, input: SalesInput) -> Result<SalesJournal, ServerError>;

    async fn from_file<P>(&self, path: P) -> Result<SalesJournal, ServerError>
    where
        P: AsRef<std::path::Path> + Send;
}

pub(crate) struct GenerateUsecaseImpl<
    R = SalesRepositoryImpl<SalesCsvDatasourceImpl, SalesWorkbookDatasourceImpl>, // Default.
> where
    R: SalesRepository,
{
    sales_repository: R,
    config: GenerationConfig,
}

#[async_trait]
impl<R> GenerateUsecase for GenerateUsecaseImpl<R>
where
    R: SalesRepository,
{
    async fn from_input(&self, input: SalesInput) -> Result<SalesJournal, ServerError> {
        let specs = self.sales_repository.from_input(input)?;
        Ok(self.generate(specs))
    }

    async fn from_file<P>(&self, path: P) -> Result<SalesJournal, ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let specs = self.sales_repository.from_file(path).await?;
        Ok(self.generate(specs))
    }
}

impl<R> GenerateUsecaseImpl<R>
where
    R: SalesRepository,
{
    fn generate(&self, specs: SalesRecordSpecs) -> SalesJournal {
        let invoices = InvoiceNormalizer::new(self.config.layout).process(specs.lines);
        let lines = JournalBuilder::from_config(&self.config).build_all(&invoices);
        let balances = verify(&lines);

        let (total_debit, total_credit) =
            lines
                .iter()
                .fold((Decimal::ZERO, Decimal::ZERO), |(debit, credit), line| {
                    (
                        debit + line.movement.debit().unwrap_or_default(),
                        credit + line.movement.credit().unwrap_or_default(),
                    )
                });
        let invoices_skipped = invoices.iter().filter(|i| i.is_zero()).count();
        let summary = RunSummary {
            schema: specs.schema,
            source_rows: specs.source_rows,
            invoices_processed: invoices.len() - invoices_skipped,
            invoices_skipped,
            undecomposed_mixed: invoices.iter().filter(|i| is_undecomposed(i)).count(),
            journal_lines: lines.len(),
            parse_warnings: specs.parse_warnings,
            total_debit,
            total_credit,
            imbalanced_count: balances.imbalanced.len(),
            imbalanced_sample: balances
                .imbalanced
                .iter()
                .take(self.config.imbalance_display_limit)
                .map(|r| r.invoice_id.clone())
                .collect(),
        };

        log::info!(
            "{} invoice(s) processed, {} skipped, {} journal line(s)",
            summary.invoices_processed,
            summary.invoices_skipped,
            summary.journal_lines
        );
        if summary.undecomposed_mixed > 0 {
            log::warn!(
                "{} invoice(s) with mixed VAT and no line detail posted on the mixed account",
                summary.undecomposed_mixed
            );
        }
        if !balances.is_balanced() {
            log::warn!(
                "{} imbalanced invoice(s): {:?}",
                summary.imbalanced_count,
                summary
                    .imbalanced_sample
                    .iter()
                    .map(|id| id.0.as_str())
                    .collect::<Vec<_>>()
            );
        }

        SalesJournal {
            lines,
            balances,
            summary,
        }
    }
}

/// Invoice whose rates could not be told apart, posted on a single bucket.
fn is_undecomposed(invoice: &NormalizedInvoice) -> bool {
    !invoice.is_zero()
        && !invoice.is_multi_rate()
        && matches!(invoice.vat_rate, VatRate::Mixed | VatRate::Other(_))
}

impl GenerateUsecaseImpl {
    pub(crate) fn new(config: GenerationConfig) -> Self {
        GenerateUsecaseImpl {
            sales_repository: SalesRepositoryImpl::new(),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Movement, RowLayout};
    use rust_decimal_macros::dec;

    const SALES: &str = "Date;Facture;Client;TTC;HT\n\
                         02/01/2024;F001;Dupont;120,00;100,00\n\
                         03/01/2024;F002;Martin;175,00;150,00\n\
                         04/01/2024;F003;Durand;0;0\n\
                         05/01/2024;A001;Dupont;-105,50;-100,00\n";

    #[tokio::test]
    async fn generates_a_balanced_journal() {
        let journal = GenerateUsecaseImpl::new(GenerationConfig::default())
            .from_input(SalesInput::Csv(SALES.to_string()))
            .await
            .unwrap();
        let summary = &journal.summary;
        assert_eq!(summary.source_rows, 4);
        assert_eq!(summary.invoices_processed, 3);
        assert_eq!(summary.invoices_skipped, 1);
        assert_eq!(summary.undecomposed_mixed, 1);
        assert_eq!(summary.journal_lines, 9);
        assert_eq!(summary.total_debit, summary.total_credit);
        assert!(journal.balances.is_balanced());
        assert_eq!(journal.balances.records.len(), 3);

        let refund: Vec<_> = journal
            .lines
            .iter()
            .filter(|l| l.piece_number.0 == "A001")
            .collect();
        assert_eq!(refund[0].movement, Movement::Credit(dec!(105.50)));
        assert_eq!(refund[1].movement, Movement::Debit(dec!(100)));
    }

    #[tokio::test]
    async fn totals_layout_keeps_rows_apart() {
        let config = GenerationConfig {
            layout: RowLayout::InvoiceTotals,
            ..GenerationConfig::default()
        };
        let journal = GenerateUsecaseImpl::new(config)
            .from_input(SalesInput::Csv(
                "Date;Facture;Client;TTC;HT\n;F1;A;120;100\n;F1;A;110;100\n".to_string(),
            ))
            .await
            .unwrap();
        assert_eq!(journal.summary.invoices_processed, 2);
        assert_eq!(journal.balances.records.len(), 1);
    }
}
