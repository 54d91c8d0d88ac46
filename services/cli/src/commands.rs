use crate::render::{render_affordability_card, render_batch_line};
use clap::Args;
use lead_intel::affordability::{solve_affordability, AffordabilityInput};
use lead_intel::config::LeadSettings;
use lead_intel::error::AppError;
use lead_intel::import::LeadCsvImporter;
use lead_intel::leads::{evaluate_lead, LeadIntake, ScoringVariant};
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct AffordArgs {
    /// Gross annual household income
    #[arg(long)]
    pub(crate) income: f64,
    /// Cash available for the down payment
    #[arg(long, default_value_t = 0.0)]
    pub(crate) down_payment: f64,
    /// Other monthly debt payments (car, student loans, cards)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) monthly_debts: f64,
    /// Contract mortgage rate in percent (defaults to LEAD_CONTRACT_RATE)
    #[arg(long)]
    pub(crate) rate: Option<f64>,
    /// Print the result as JSON instead of a card
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// JSON intake file, or '-' for stdin
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Override the scoring variant named in the intake
    #[arg(long, value_parser = parse_variant)]
    pub(crate) variant: Option<ScoringVariant>,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CRM lead export in CSV form
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Emit one JSON document instead of one line per lead
    #[arg(long)]
    pub(crate) json: bool,
}

fn parse_variant(raw: &str) -> Result<ScoringVariant, String> {
    ScoringVariant::parse(raw)
        .ok_or_else(|| format!("unknown scoring variant '{raw}' (use weighted or timeline-first)"))
}

pub(crate) fn run_afford(args: AffordArgs, settings: &LeadSettings) -> Result<(), AppError> {
    let input = AffordabilityInput::new(args.income, args.down_payment)
        .with_monthly_debts(args.monthly_debts)
        .with_contract_rate(args.rate.unwrap_or(settings.default_contract_rate));

    match solve_affordability(&input) {
        Ok(result) if args.json => println!("{}", serde_json::to_string_pretty(&result)?),
        Ok(result) => {
            info!(summary = %result.summary(), "affordability estimate");
            print!("{}", render_affordability_card(&input, &result));
        }
        Err(err) => println!("{err}"),
    }

    Ok(())
}

pub(crate) fn run_evaluate(args: EvaluateArgs, settings: &LeadSettings) -> Result<(), AppError> {
    let raw = if args.input.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(&args.input)?
    };

    let mut intake: LeadIntake = serde_json::from_str(&raw)?;
    if let Some(variant) = args.variant {
        intake.variant = variant;
    }

    let evaluation = evaluate_lead(&intake, &settings.tag_options());
    println!("{}", serde_json::to_string_pretty(&evaluation)?);
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs, settings: &LeadSettings) -> Result<(), AppError> {
    let importer = LeadCsvImporter {
        options: settings.tag_options(),
        variant: settings.scoring_variant,
        default_contract_rate: settings.default_contract_rate,
    };
    let leads = importer.import_path(&args.csv)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&leads)?);
        return Ok(());
    }

    for lead in &leads {
        println!("{}", render_batch_line(lead));
    }
    Ok(())
}
