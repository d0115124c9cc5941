use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use salesdash_core::health::{self, HealthInput};

use crate::config::CliConfig;
use crate::input;

/// Arguments for the business health score
#[derive(Args)]
pub struct HealthArgs {
    /// Path to JSON input file (cash_balance, receivables, profit)
    #[arg(long, conflicts_with_all = ["cash", "receivables", "profit"])]
    pub input: Option<String>,

    /// Cash balance
    #[arg(long, allow_hyphen_values = true, requires_all = ["receivables", "profit"])]
    pub cash: Option<Decimal>,

    /// Total outstanding receivables
    #[arg(long)]
    pub receivables: Option<Decimal>,

    /// Profit for the period
    #[arg(long, allow_hyphen_values = true)]
    pub profit: Option<Decimal>,
}

pub fn run_health(args: HealthArgs, config: &CliConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let mut health_input: HealthInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let (Some(cash), Some(receivables), Some(profit)) =
        (args.cash, args.receivables, args.profit)
    {
        HealthInput {
            cash_balance: cash,
            receivables,
            profit,
            thresholds: None,
        }
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err(
            "--input <file.json>, --cash/--receivables/--profit or stdin required for health score"
                .into(),
        );
    };

    if health_input.thresholds.is_none() {
        health_input.thresholds = config.thresholds.clone();
    }

    let result = health::calculate_health_score(&health_input)?;
    Ok(serde_json::to_value(result)?)
}
