//! Look up a stock and project it to an expected macro rate
//!
//! `project` shows one stock; `screen` ranks every stock of an event type.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use event_projection::{
    config::DataConfig,
    error::LookupError,
    projection::{screen, ProjectionRequest, DEFAULT_EXPECTED_RATE},
    report, DataSource, EventType,
};
use log::{info, warn};

#[derive(Debug, Parser)]
#[command(author, version, about = "Project stock prices and line items from macro event sensitivities")]
struct Cli {
    /// JSON data layout config; defaults to CSVs under ./data
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the directory the tables are read from
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Project a single stock
    Project {
        /// Stock symbol, matched exactly
        #[arg(long, short)]
        symbol: String,

        #[command(flatten)]
        scenario: Scenario,

        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Project every stock and rank by projected price change
    Screen {
        #[command(flatten)]
        scenario: Scenario,

        /// Only show the first N stocks
        #[arg(long)]
        top: Option<usize>,
    },
}

#[derive(Debug, clap::Args)]
struct Scenario {
    /// Macro event driving the projection (inflation, interest-rate)
    #[arg(long, short, default_value = "inflation")]
    event: EventType,

    /// Expected upcoming rate in percent
    #[arg(long, short, default_value_t = DEFAULT_EXPECTED_RATE, value_parser = finite_rate, allow_negative_numbers = true)]
    rate: f64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Csv,
    Json,
}

fn finite_rate(raw: &str) -> Result<f64, String> {
    let rate: f64 = raw.parse().map_err(|_| format!("`{raw}` is not a number"))?;
    if rate.is_finite() {
        Ok(rate)
    } else {
        Err(format!("`{raw}` is not a finite rate"))
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = DataConfig::load_or_default(cli.config.as_deref())
        .context("Failed to read data config")?;
    if let Some(dir) = cli.data_dir {
        config = config.with_base_dir(dir);
    }

    let start = Instant::now();
    let source = DataSource::load(&config).context("Failed to load reference tables")?;
    info!("Loaded reference tables in {:?}", start.elapsed());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Project { symbol, scenario, format } => {
            let request = ProjectionRequest::new(symbol, scenario.event, scenario.rate);
            match request.run(&source) {
                Ok(projection) => match format {
                    Format::Table => report::render_table(&mut out, &projection)?,
                    Format::Csv => report::write_csv(&mut out, &projection)?,
                    Format::Json => writeln!(out, "{}", report::to_json(&projection)?)?,
                },
                Err(err @ LookupError::NotFound { .. }) => {
                    warn!("{err}");
                    writeln!(out, "Warning: stock symbol not found in the data ({err}).")?;
                }
            }
        }
        Command::Screen { scenario, top } => {
            let proj_start = Instant::now();
            let mut ranked = screen(&source, scenario.event, scenario.rate);
            info!("Projected {} stocks in {:?}", ranked.len(), proj_start.elapsed());

            if let Some(top) = top {
                ranked.truncate(top);
            }
            writeln!(
                out,
                "{} screen at expected {} {:.2}%",
                scenario.event,
                scenario.event.rate_label(),
                scenario.rate
            )?;
            report::render_screen(&mut out, &ranked)?;
        }
    }

    Ok(())
}
