use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use salesdash_core::insights::{self, InsightContext, CONCENTRATION_TOP_N};
use salesdash_core::receivables::{
    self, aging_buckets, concentration_ratio, receivables_by_customer, total_receivables,
    CustomerReceivable,
};

use crate::input;

/// Arguments for the insight narrative
#[derive(Args)]
pub struct InsightArgs {
    /// Path to JSON insight context
    #[arg(long)]
    pub input: Option<String>,

    /// Top-3 customer share of receivables (0 to 1)
    #[arg(long)]
    pub concentration: Option<Decimal>,

    /// Net cash movement for the period (inflows minus outflows)
    #[arg(long, allow_hyphen_values = true)]
    pub net_cash: Option<Decimal>,

    /// Revenue for the current period
    #[arg(long)]
    pub current_revenue: Option<Decimal>,

    /// Revenue for the previous period
    #[arg(long)]
    pub previous_revenue: Option<Decimal>,
}

/// Arguments for receivables aging
#[derive(Args)]
pub struct AgingArgs {
    /// Path to JSON array of receivables (customer, outstanding, days_overdue)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_insights(args: InsightArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let ctx: InsightContext = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let (Some(net_cash), Some(current), Some(previous)) =
        (args.net_cash, args.current_revenue, args.previous_revenue)
    {
        InsightContext {
            receivables_concentration: args.concentration,
            net_cash_movement: net_cash,
            current_period_revenue: current,
            previous_period_revenue: previous,
        }
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err(
            "--input <file.json>, --net-cash/--current-revenue/--previous-revenue or stdin required for insights"
                .into(),
        );
    };

    let result = insights::generate_insights(&ctx);
    Ok(json!({ "insights": result }))
}

pub fn run_aging(args: AgingArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let book: Vec<CustomerReceivable> = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for receivables aging".into());
    };

    receivables::validate_receivables(&book)?;

    Ok(json!({
        "total_receivables": total_receivables(&book),
        "top3_concentration": concentration_ratio(&book, CONCENTRATION_TOP_N),
        "aging": aging_buckets(&book),
        "customers": receivables_by_customer(&book),
    }))
}
