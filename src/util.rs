use std::path::PathBuf;

use fractic_server_error::ServerError;

use crate::{
    data::datasources::sheet_csv_sink::CsvSheetSink,
    domain::{
        repositories::sheet_sink::SheetSink,
        usecases::generate_usecase::{GenerateUsecase as _, GenerateUsecaseImpl},
    },
    entities::{GenerationConfig, SalesInput, SalesJournal},
    presentation::{hledger_printer::HledgerPrinter, sheet_printer::SheetPrinter},
};

pub type Ledger = String;

pub struct SalesJournalUtil {
    generate_usecase: GenerateUsecaseImpl,
    sheet_printer: SheetPrinter,
    printer: HledgerPrinter,
    config: GenerationConfig,
}

impl SalesJournalUtil {
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            generate_usecase: GenerateUsecaseImpl::new(config.clone()),
            sheet_printer: SheetPrinter::new(config.sheet_format.clone()),
            printer: HledgerPrinter::new(),
            config,
        }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub async fn from_input(&self, input: SalesInput) -> Result<SalesJournal, ServerError> {
        self.generate_usecase.from_input(input).await
    }

    pub async fn from_file<T>(&self, path: T) -> Result<SalesJournal, ServerError>
    where
        T: AsRef<std::path::Path> + Send,
    {
        self.generate_usecase.from_file(path).await
    }

    /// Hands every sheet of the journal to `sink`, in export order.
    pub fn export_sheets<S: SheetSink>(
        &self,
        journal: &SalesJournal,
        sink: &mut S,
    ) -> Result<(), ServerError> {
        for sheet in self.sheet_printer.print_sheets(journal) {
            sink.write_sheet(&sheet)?;
        }
        Ok(())
    }

    /// Writes the sheets as CSV files under `dir` and returns their paths.
    pub fn export_to_dir(
        &self,
        journal: &SalesJournal,
        dir: impl Into<PathBuf>,
    ) -> Result<Vec<PathBuf>, ServerError> {
        let mut sink = CsvSheetSink::new(dir, &self.config.sheet_format);
        self.export_sheets(journal, &mut sink)?;
        Ok(sink.written().to_vec())
    }

    pub fn print_ledger(&self, journal: &SalesJournal) -> Ledger {
        self.printer.print_ledger(journal)
    }

    pub fn print_summary(&self, journal: &SalesJournal) -> String {
        journal.summary.to_string()
    }
}

impl Default for SalesJournalUtil {
    fn default() -> Self {
        Self::new(GenerationConfig::default())
    }
}
