//! Thin command-line front end over a JSON snapshot of payments.

pub mod output;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::config::{ConfigManager, EngineConfig};
use crate::core::services::{PaymentService, ServiceError};
use crate::domain::Payment;
use crate::engine::{parse_date, Clock, Dashboard, FixedClock, SystemClock};
use crate::errors::{ConfigError, EngineError};
use crate::storage::InMemoryPaymentRepository;
use crate::utils::build_info;

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("Cannot read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Snapshot {path} is not a valid payment list: {source}")]
    Snapshot {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

#[derive(Debug, Parser)]
#[command(
    name = "bill_reminder_cli",
    about = "Due dates, reminders and alerts for your bills"
)]
pub struct Cli {
    /// Engine configuration file (defaults to ~/.bill_reminder/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Evaluate as if today were this date (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = parse_today)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print urgency, reminders and alerts for a snapshot of payments
    Report {
        /// JSON file holding an array of payments
        snapshot: PathBuf,
    },
    /// Toggle the paid state of one payment and print the updated record
    Toggle {
        /// JSON file holding an array of payments
        snapshot: PathBuf,
        /// Identifier of the payment to toggle
        id: Uuid,
    },
    /// Print build metadata
    Version,
}

fn parse_today(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|err| err.to_string())
}

/// Parses process arguments and runs the selected command.
pub fn run_cli() -> Result<(), CliError> {
    run(Cli::parse())
}

pub fn run(cli: Cli) -> Result<(), CliError> {
    let manager = cli
        .config
        .clone()
        .map(ConfigManager::new)
        .unwrap_or_else(ConfigManager::from_env);
    let config = manager.load()?;
    if !config.ui_color_enabled {
        colored::control::set_override(false);
    }

    let clock: Box<dyn Clock> = match cli.today {
        Some(today) => Box::new(FixedClock::on(today)),
        None => Box::new(SystemClock),
    };

    match cli.command {
        Command::Report { snapshot } => report(&snapshot, &config, clock.as_ref()),
        Command::Toggle { snapshot, id } => toggle(&snapshot, id, clock.as_ref()),
        Command::Version => {
            println!("{}", build_info::current());
            Ok(())
        }
    }
}

fn report(snapshot: &Path, config: &EngineConfig, clock: &dyn Clock) -> Result<(), CliError> {
    let payments = load_snapshot(snapshot)?;
    let dashboard = Dashboard::build(
        &payments,
        clock.today(),
        &config.cadences,
        &config.default_cadence,
    );
    print!("{}", output::render_dashboard(&dashboard));
    Ok(())
}

fn toggle(snapshot: &Path, id: Uuid, clock: &dyn Clock) -> Result<(), CliError> {
    let repo = InMemoryPaymentRepository::with_payments(load_snapshot(snapshot)?);
    let updated = PaymentService::toggle_paid(&repo, id, clock)?;
    println!("{}", serde_json::to_string_pretty(&updated)?);
    Ok(())
}

/// Reads and validates a payment snapshot.
pub fn load_snapshot(path: &Path) -> Result<Vec<Payment>, CliError> {
    let data = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let payments: Vec<Payment> =
        serde_json::from_str(&data).map_err(|source| CliError::Snapshot {
            path: path.to_path_buf(),
            source,
        })?;
    for payment in &payments {
        payment.validate()?;
    }
    debug!(count = payments.len(), path = %path.display(), "loaded payment snapshot");
    Ok(payments)
}
