use crate::commands::{run_afford, run_batch, run_evaluate, AffordArgs, BatchArgs, EvaluateArgs};
use clap::{Parser, Subcommand};
use lead_intel::config::AppConfig;
use lead_intel::error::AppError;
use lead_intel::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "Lead Intelligence Engine",
    about = "Estimate affordability, score leads, and derive CRM tags from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve maximum affordable home price for a household
    Afford(AffordArgs),
    /// Evaluate a single captured lead from a JSON intake file
    Evaluate(EvaluateArgs),
    /// Evaluate every lead in a CRM CSV export
    Batch(BatchArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(
        log_format = ?config.telemetry.format,
        scoring_variant = config.leads.scoring_variant.as_str(),
        "configuration loaded"
    );

    match cli.command {
        Command::Afford(args) => run_afford(args, &config.leads),
        Command::Evaluate(args) => run_evaluate(args, &config.leads),
        Command::Batch(args) => run_batch(args, &config.leads),
    }
}
