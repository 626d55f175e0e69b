use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, ValueEnum};
use fractic_sales_journal::{
    entities::{account, GenerationConfig, RevenueAccounts, RowLayout},
    errors::{ReadError, WriteError},
    ext::session::{Session, StaticCredentials},
};
use fractic_server_error::ServerError;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Layout {
    /// One row per invoice line; rows sharing an invoice number are merged.
    Lines,
    /// One row per invoice.
    Totals,
}

#[derive(Parser, Debug)]
#[command(
    name = "vt-journal",
    version,
    about = "Generate the sales journal (VT) from a sales invoice spreadsheet"
)]
struct Cli {
    /// Sales export (csv, xlsx, xlsm, xlsb, xls or ods).
    #[arg(short = 'i', long = "input")]
    input: PathBuf,

    /// Directory receiving one CSV file per sheet.
    #[arg(short = 'o', long = "output-dir", default_value = ".")]
    output_dir: PathBuf,

    /// RON generation settings.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    #[arg(long = "journal-code")]
    journal_code: Option<String>,

    #[arg(long = "vat-account")]
    vat_account: Option<String>,

    /// Comma-separated revenue accounts for 5.5, 10, 20, mixed and exempt.
    #[arg(long = "revenue-accounts")]
    revenue_accounts: Option<String>,

    #[arg(long = "layout", value_enum)]
    layout: Option<Layout>,

    /// Also write an hledger journal to this file.
    #[arg(long = "hledger")]
    hledger: Option<PathBuf>,

    /// Print the run summary as JSON instead of text.
    #[arg(long = "summary-json")]
    summary_json: bool,

    /// RON credential table; when given, a login is required.
    #[arg(long = "credentials")]
    credentials: Option<PathBuf>,

    #[arg(short = 'u', long = "user")]
    user: Option<String>,

    #[arg(long = "password", env = "VT_JOURNAL_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

impl Cli {
    async fn config(&self) -> Result<GenerationConfig, ServerError> {
        let mut config = match &self.config {
            Some(path) => GenerationConfig::from_ron(
                &tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| ReadError::with_debug(&e))?,
            )?,
            None => GenerationConfig::default(),
        };
        if let Some(code) = &self.journal_code {
            config.journal_code = code.clone();
        }
        if let Some(vat_account) = &self.vat_account {
            config.chart.vat_on_collection = account(vat_account.as_str());
        }
        if let Some(list) = &self.revenue_accounts {
            config.chart.revenue = RevenueAccounts::from_list(list);
        }
        match self.layout {
            Some(Layout::Lines) => config.layout = RowLayout::InvoiceLines,
            Some(Layout::Totals) => config.layout = RowLayout::InvoiceTotals,
            None => {}
        }
        Ok(config)
    }

    async fn session(&self, config: GenerationConfig) -> Result<Session, ServerError> {
        let Some(path) = &self.credentials else {
            return Ok(Session::unauthenticated(config));
        };
        let credentials = StaticCredentials::from_ron(
            &tokio::fs::read_to_string(path)
                .await
                .map_err(|e| ReadError::with_debug(&e))?,
        )?;
        Session::login(
            &credentials,
            self.user.as_deref().unwrap_or_default(),
            self.password.as_deref().unwrap_or_default(),
            config,
        )
    }
}

async fn run(cli: Cli) -> Result<bool, ServerError> {
    let config = cli.config().await?;
    let session = cli.session(config).await?;
    let util = session.journal_util();

    let journal = util.from_file(&cli.input).await?;
    for path in util.export_to_dir(&journal, &cli.output_dir)? {
        println!("{}", path.display());
    }
    if let Some(path) = &cli.hledger {
        tokio::fs::write(path, util.print_ledger(&journal))
            .await
            .map_err(|e| WriteError::with_debug(&path.display().to_string(), &e))?;
        println!("{}", path.display());
    }

    if cli.summary_json {
        match serde_json::to_string_pretty(&journal.summary) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("could not serialize summary: {}", e),
        }
    } else {
        print!("{}", util.print_summary(&journal));
    }
    Ok(journal.balances.is_balanced())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()).await {
        Ok(true) => ExitCode::SUCCESS,
        // Exported, but some invoices need attention.
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            log::error!("{:?}", e);
            ExitCode::FAILURE
        }
    }
}
