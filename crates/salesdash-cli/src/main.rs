mod commands;
mod config;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::health::HealthArgs;
use commands::insights::{AgingArgs, InsightArgs};
use commands::report::{DataArgs, ExportArgs};
use config::CliConfig;

/// Sales & inventory reporting
#[derive(Parser)]
#[command(
    name = "sdash",
    version,
    about = "Sales & inventory reporting: stock status, KPIs, insights and health score",
    long_about = "Turns per-transaction sales rows and per-product inventory rows into a \
                  reconciled product summary with stock status, KPI totals, a rule-based \
                  insight narrative and a business health score. Reads JSON or CSV sheets."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Settings file (YAML or JSON) with threshold overrides and export directory
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Full report: summary, KPIs, health score and insights
    Report(DataArgs),
    /// Product summary with stock status
    Summary(DataArgs),
    /// KPI totals for the selection
    Kpis(DataArgs),
    /// Write the product summary to a CSV file
    Export(ExportArgs),
    /// List months with their products and sales totals
    Months(DataArgs),
    /// Business health score from cash, receivables and profit
    Health(HealthArgs),
    /// Rule-based insight narrative
    Insights(InsightArgs),
    /// Receivables aging buckets and customer concentration
    Aging(AgingArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("salesdash=warn,sdash=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Report(args) => commands::report::run_report(args, &config),
        Commands::Summary(args) => commands::report::run_summary(args, &config),
        Commands::Kpis(args) => commands::report::run_kpis(args, &config),
        Commands::Export(args) => commands::report::run_export(args, &config),
        Commands::Months(args) => commands::report::run_months(args, &config),
        Commands::Health(args) => commands::health::run_health(args, &config),
        Commands::Insights(args) => commands::insights::run_insights(args),
        Commands::Aging(args) => commands::insights::run_aging(args),
        Commands::Version => {
            println!("sdash {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
