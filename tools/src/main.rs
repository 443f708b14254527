//! pulse-report: headless report runner for the Pulse payments warehouse.
//!
//! Usage:
//!   pulse-report --db pulse.db list
//!   pulse-report --db pulse.db run top_contributing_states --format json
//!   pulse-report --db pulse.db section market_expansion --indian Total_Transaction_Value
//!
//! The store location and classification directory are resolved once here,
//! from flags or PULSE_DB_PATH / PULSE_DATA_DIR. The core never reads them.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pulse_core::{PulseStore, ReportCatalog, ReportId, ReportResult, Section};
use std::io::{self, Write};

mod render;

#[derive(Parser)]
#[command(name = "pulse-report")]
#[command(about = "Run the fixed Pulse analytics reports against a warehouse")]
#[command(version)]
struct Cli {
    /// Path to the SQLite warehouse
    #[arg(long, env = "PULSE_DB_PATH", global = true)]
    db: Option<String>,

    /// Directory holding reports/classification.json (built-in defaults if absent)
    #[arg(long, env = "PULSE_DATA_DIR", global = true)]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List reports, optionally only one section
    List {
        #[arg(long)]
        section: Option<String>,
    },

    /// Run a single report
    Run {
        /// Report key, e.g. top_contributing_states
        report: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Run every report of one section
    Section {
        /// Section key, e.g. market_expansion
        section: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Run the whole catalog
    All {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Render these numeric columns with lakh/crore units
    #[arg(long, value_delimiter = ',')]
    indian: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let catalog = match &cli.data_dir {
        Some(dir) => ReportCatalog::from_data_dir(dir)?,
        None => ReportCatalog::default(),
    };

    match cli.command {
        Commands::List { section } => list(section.as_deref()),
        Commands::Run { report, output } => {
            let id: ReportId = report.parse()?;
            let store = open_store(cli.db.as_deref())?;
            let result = catalog.run(&store, id)?;
            emit(&[(id, result)], &output)
        }
        Commands::Section { section, output } => {
            let section: Section = section.parse()?;
            let store = open_store(cli.db.as_deref())?;
            let results = catalog.run_section(&store, section)?;
            emit(&results, &output)
        }
        Commands::All { output } => {
            let store = open_store(cli.db.as_deref())?;
            let results = catalog
                .reports()
                .map(|id| catalog.run(&store, id).map(|r| (id, r)))
                .collect::<Result<Vec<_>, _>>()?;
            emit(&results, &output)
        }
    }
}

fn open_store(db: Option<&str>) -> Result<PulseStore> {
    let db = db.context("no warehouse given: pass --db or set PULSE_DB_PATH")?;
    let store = PulseStore::open(db).with_context(|| format!("opening warehouse {db}"))?;
    log::debug!("warehouse {db} opened");
    Ok(store)
}

fn list(section: Option<&str>) -> Result<()> {
    let sections: Vec<Section> = match section {
        Some(key) => vec![key.parse()?],
        None => Section::ALL.to_vec(),
    };

    let mut out = io::stdout().lock();
    for section in sections {
        writeln!(out, "{} ({})", section.title(), section.key())?;
        for id in section.reports() {
            writeln!(out, "  {:<36} {}", id.key(), id.description())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn emit(results: &[(ReportId, ReportResult)], output: &OutputArgs) -> Result<()> {
    let mut formatted = Vec::with_capacity(results.len());
    for (id, result) in results {
        let mut result = result.clone();
        for column in &output.indian {
            // Section runs mix reports; only rewrite columns a report has.
            if result.column_index(column).is_ok() {
                result.format_column(column)?;
            }
        }
        log::debug!("{id}: {} rows", result.len());
        formatted.push((*id, result));
    }

    let mut out = io::stdout().lock();
    match output.format {
        OutputFormat::Table => render::tables(&mut out, &formatted)?,
        OutputFormat::Json => render::json(&mut out, &formatted)?,
        OutputFormat::Csv => render::csv(&mut out, &formatted)?,
    }
    out.flush()?;
    Ok(())
}
