//! Finsight financial statements
//!
//! Fetches a company's financial statements from the financial-data service
//! (or reads a saved payload), renders them as accountant-style tables, and
//! writes standalone HTML or flat CSV/JSON exports.

mod client;
mod config;
mod constants;
mod render;

use anyhow::{Context, Result, bail};
use chrono::Datelike;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finsight_statements::constants as statement_constants;
use finsight_statements::export::{collect_rows, export_csv, export_json, loaded_sections};
use finsight_statements::{EnglishLabelPolicy, StatementsResponse, ViewState, build_report, html};

use client::StatementsClient;
use config::{Config, FileConfig, Overrides};

#[derive(Parser, Debug)]
#[command(name = "finsight")]
#[command(about = "Render and export company financial statements")]
struct Args {
    /// Config file (defaults apply when it does not exist)
    #[arg(short, long, default_value = constants::CONFIG_FILENAME, global = true)]
    config: PathBuf,

    /// Financial-data service base URL
    #[arg(long, env = constants::API_ENV_VAR, global = true)]
    api_url: Option<String>,

    /// Read a saved statements payload instead of calling the service
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct Selection {
    /// Company ticker (e.g., NOVO-B)
    ticker: String,

    /// Fiscal year (default: last year)
    year: Option<i32>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print statements as terminal tables
    Show {
        #[command(flatten)]
        selection: Selection,

        /// Only these statements (repeatable): income_statement, comprehensive_income, balance_sheet, cash_flow, equity_statement
        #[arg(short, long = "statement")]
        statements: Vec<String>,

        /// Hide plain detail lines, keeping totals and headings
        #[arg(long)]
        hide_details: bool,
    },

    /// Write the statements as a standalone HTML page
    Html {
        #[command(flatten)]
        selection: Selection,

        /// Output file (default: <TICKER>_<YEAR>.html)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Hide plain detail lines, keeping totals and headings
        #[arg(long)]
        hide_details: bool,
    },

    /// Export the flat statement rows
    Export {
        #[command(flatten)]
        selection: Selection,

        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        /// Output file (default: finsight_data.csv / finsight_data.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only these statements (repeatable)
        #[arg(short, long = "statement")]
        statements: Vec<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    fn default_filename(&self) -> &'static str {
        match self {
            ExportFormat::Csv => statement_constants::EXPORT_CSV_FILENAME,
            ExportFormat::Json => statement_constants::EXPORT_JSON_FILENAME,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        constants::VERBOSE_LOG_FILTER
    } else {
        constants::DEFAULT_LOG_FILTER
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let file_config = FileConfig::load_or_default(&args.config)?;

    match args.command {
        Command::Show {
            selection,
            statements,
            hide_details,
        } => {
            let config = Config::from_file(
                &file_config,
                Overrides {
                    base_url: args.api_url,
                    hide_details,
                    statements,
                },
            )?;
            let (response, view) = load(&config, args.file.as_deref(), &selection).await?;
            let report = build_report(&response, &view, &EnglishLabelPolicy);
            println!("{}", render::render_report(&report, &config.statements));
            Ok(())
        }

        Command::Html {
            selection,
            output,
            hide_details,
        } => {
            let config = Config::from_file(
                &file_config,
                Overrides {
                    base_url: args.api_url,
                    hide_details,
                    statements: Vec::new(),
                },
            )?;
            let (response, view) = load(&config, args.file.as_deref(), &selection).await?;
            let report = build_report(&response, &view, &EnglishLabelPolicy);

            let path = output.unwrap_or_else(|| default_html_path(&selection.ticker, response.year));
            html::write_report(&report, create(&path)?)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote HTML report");
            println!("Wrote {}", path.display());
            Ok(())
        }

        Command::Export {
            selection,
            format,
            output,
            statements,
        } => {
            let config = Config::from_file(
                &file_config,
                Overrides {
                    base_url: args.api_url,
                    hide_details: false,
                    statements,
                },
            )?;
            let (response, _) = load(&config, args.file.as_deref(), &selection).await?;

            let sections = loaded_sections(&response, &config.statements);
            let rows = collect_rows(&sections);
            if rows.is_empty() {
                println!("No statement rows to export.");
                return Ok(());
            }

            let path = output.unwrap_or_else(|| PathBuf::from(format.default_filename()));
            let writer = create(&path)?;
            let written = match format {
                ExportFormat::Csv => export_csv(&rows, writer),
                ExportFormat::Json => export_json(&rows, writer),
            };
            written.with_context(|| format!("Failed to write {}", path.display()))?;

            println!("Exported {} rows to {}", rows.len(), path.display());
            Ok(())
        }
    }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// `<TICKER>_<YEAR>.html` in the working directory; anything but letters,
/// digits, `-` and `_` becomes `_`
fn default_html_path(ticker: &str, year: i32) -> PathBuf {
    let name: String = ticker
        .trim()
        .to_uppercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    PathBuf::from(format!("{}_{}.html", name, year))
}

fn default_year() -> i32 {
    chrono::Utc::now().year() - 1
}

/// Load the payload from disk or the service, plus the view it is shown with
async fn load(config: &Config, file: Option<&Path>, selection: &Selection) -> Result<(StatementsResponse, ViewState)> {
    if selection.ticker.trim().is_empty() {
        bail!("Ticker must not be empty");
    }
    let year = selection.year.unwrap_or_else(default_year);

    let response = match file {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read statements file: {}", path.display()))?;
            StatementsResponse::from_json(&json)
                .with_context(|| format!("Invalid statements payload in {}", path.display()))?
        }
        None => {
            let client = StatementsClient::new(config)?;
            client.fetch_statements(&selection.ticker, year).await?
        }
    };

    let mut view = ViewState::new(selection.ticker.trim().to_uppercase(), response.year);
    view.show_details = config.show_details;
    Ok((response, view))
}
