use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Args;
use serde_json::{json, Value};

use salesdash_core::export::{export_file_name, write_summary_csv};
use salesdash_core::filter::products_for_month;
use salesdash_core::report::{build_report, FinancialSnapshot, ReportInput};
use salesdash_core::trend::monthly_revenue;

use crate::config::CliConfig;
use crate::input;

/// Where the sales/inventory data and the selection come from
#[derive(Args)]
pub struct DataArgs {
    /// Path to JSON report input (sales, inventory, month, products, financials)
    #[arg(long, conflicts_with = "sales")]
    pub input: Option<String>,

    /// Sales CSV with columns Month, Product, Units Sold, Total Sales
    #[arg(long)]
    pub sales: Option<String>,

    /// Inventory CSV with columns Product, Current Stock, Reorder Level
    #[arg(long, requires = "sales")]
    pub inventory: Option<String>,

    /// Month to report on (default: first month in the data)
    #[arg(long)]
    pub month: Option<String>,

    /// Product to include; repeat for several (default: all products that month)
    #[arg(long = "product")]
    pub products: Vec<String>,

    /// Path to JSON financial snapshot (cash, profit, receivables, revenues)
    #[arg(long)]
    pub financials: Option<String>,
}

/// Arguments for CSV export
#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Output file (default: sales_stock_summary_<month>.csv)
    #[arg(long)]
    pub out: Option<String>,
}

/// Assemble a `ReportInput` from a JSON file, CSV sheets or stdin, then
/// apply command-line overrides.
pub fn load_input(
    args: &DataArgs,
    config: &CliConfig,
) -> Result<ReportInput, Box<dyn std::error::Error>> {
    let mut report_input: ReportInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(ref sales_path) = args.sales {
        let sales = input::csv_in::read_sales_csv(sales_path)?;
        let inventory = match args.inventory {
            Some(ref inv_path) => input::csv_in::read_inventory_csv(inv_path)?,
            None => Vec::new(),
        };
        ReportInput {
            sales,
            inventory,
            month: None,
            products: None,
            financials: None,
            thresholds: None,
        }
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json>, --sales <file.csv> or stdin required".into());
    };

    if args.month.is_some() {
        report_input.month = args.month.clone();
    }
    if !args.products.is_empty() {
        report_input.products = Some(args.products.clone());
    }
    if let Some(ref path) = args.financials {
        let snapshot: FinancialSnapshot = input::file::read_json(path)?;
        report_input.financials = Some(snapshot);
    }
    if report_input.thresholds.is_none() {
        report_input.thresholds = config.thresholds.clone();
    }

    Ok(report_input)
}

pub fn run_report(args: DataArgs, config: &CliConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let report_input = load_input(&args, config)?;
    let result = build_report(&report_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_summary(args: DataArgs, config: &CliConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let report_input = load_input(&args, config)?;
    let result = build_report(&report_input)?;
    Ok(json!({ "summary": result.result.summary }))
}

pub fn run_kpis(args: DataArgs, config: &CliConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let report_input = load_input(&args, config)?;
    let result = build_report(&report_input)?;
    Ok(serde_json::to_value(result.result.kpis)?)
}

pub fn run_export(args: ExportArgs, config: &CliConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let report_input = load_input(&args.data, config)?;
    let result = build_report(&report_input)?;
    let report = result.result;

    let month = report.month.clone().unwrap_or_else(|| "empty".to_string());
    let path = match args.out {
        Some(p) => PathBuf::from(p),
        None => config.export_path(&export_file_name(&month)),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(&path)
        .map_err(|e| format!("Failed to create '{}': {}", path.display(), e))?;
    write_summary_csv(BufWriter::new(file), &report.summary)?;
    tracing::info!(path = %path.display(), rows = report.summary.len(), "exported summary");

    Ok(json!({
        "file": path.display().to_string(),
        "month": month,
        "rows": report.summary.len(),
        "warnings": result.warnings,
    }))
}

pub fn run_months(args: DataArgs, config: &CliConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let report_input = load_input(&args, config)?;
    let sales = &report_input.sales;

    let months: Vec<Value> = monthly_revenue(sales)
        .into_iter()
        .map(|totals| {
            let products = products_for_month(sales, &totals.month);
            json!({
                "month": totals.month,
                "products": products,
                "units_sold": totals.units_sold,
                "total_sales": totals.total_sales,
            })
        })
        .collect();

    Ok(json!({ "months": months }))
}
