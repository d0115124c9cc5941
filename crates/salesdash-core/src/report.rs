//! Full reporting pipeline: filter, aggregate, derive, score and narrate a
//! single month/product selection.

use std::time::Instant;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::aggregate::summarize;
use crate::filter::{distinct_months, filter_sales, products_for_month, FilterSelection};
use crate::health::{calculate_health_score, HealthInput, HealthScore, HealthThresholds};
use crate::insights::{generate_insights, Insight, InsightContext, CONCENTRATION_TOP_N};
use crate::kpi::{compute_kpis, KpiSet};
use crate::receivables::{
    aging_buckets, concentration_ratio, receivables_by_customer, total_receivables,
    validate_receivables, AgingBucket, CustomerBalance, CustomerReceivable,
};
use crate::records::{validate_inventory, validate_sales, InventoryRecord, SalesRecord};
use crate::summary::{ProductSummary, StockStatus};
use crate::trend::{product_revenue_trend, revenue_trend};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::SalesDashResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Everything needed to build one report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportInput {
    pub sales: Vec<SalesRecord>,
    #[serde(default)]
    pub inventory: Vec<InventoryRecord>,
    /// Month to report on (default: first month in the sales data)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    /// Products to include (default: every product sold that month)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<String>>,
    /// Company-level figures for the health score and insights
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financials: Option<FinancialSnapshot>,
    /// Health score threshold overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<HealthThresholds>,
}

/// Period-level financial position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    pub cash_balance: Money,
    pub profit: Money,
    #[serde(default)]
    pub cash_inflows: Money,
    #[serde(default)]
    pub cash_outflows: Money,
    /// Defaults to the selected month's sales when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_period_revenue: Option<Money>,
    /// Defaults to the preceding month's sales when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_period_revenue: Option<Money>,
    #[serde(default)]
    pub receivables: Vec<CustomerReceivable>,
}

impl FinancialSnapshot {
    pub fn net_cash_movement(&self) -> Money {
        self.cash_inflows - self.cash_outflows
    }
}

/// The report for one selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesReport {
    /// Selected month; `None` when the sales data is empty
    pub month: Option<String>,
    pub available_months: Vec<String>,
    /// Products sold in the selected month
    pub available_products: Vec<String>,
    pub selected_products: Vec<String>,
    pub summary: Vec<ProductSummary>,
    pub kpis: KpiSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthScore>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub insights: Vec<Insight>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aging: Vec<AgingBucket>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub customer_receivables: Vec<CustomerBalance>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Product summary and KPIs for a selection, without the financial layer.
pub fn run_selection(
    sales: &[SalesRecord],
    inventory: &[InventoryRecord],
    selection: &FilterSelection,
) -> (Vec<ProductSummary>, KpiSet) {
    let filtered = filter_sales(sales, selection);
    let summary = summarize(&filtered, inventory);
    let kpis = compute_kpis(&summary);
    (summary, kpis)
}

/// Build the full report for one month/product selection.
pub fn build_report(input: &ReportInput) -> SalesDashResult<ComputationOutput<SalesReport>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // -- Validation ----------------------------------------------------------
    validate_sales(&input.sales)?;
    validate_inventory(&input.inventory)?;
    if let Some(fin) = &input.financials {
        validate_receivables(&fin.receivables)?;
    }
    if let Some(t) = &input.thresholds {
        t.validate()?;
    }

    // -- Selection -----------------------------------------------------------
    let available_months = distinct_months(&input.sales);
    let month = input
        .month
        .clone()
        .or_else(|| available_months.first().cloned());

    let (summary, kpis, available_products, selected_products) = match &month {
        Some(m) => {
            let available_products = products_for_month(&input.sales, m);
            let mut selection = FilterSelection::month(m.as_str());
            if let Some(products) = &input.products {
                selection = selection.with_products(products.iter().cloned());
            }
            let (summary, kpis) = run_selection(&input.sales, &input.inventory, &selection);
            let selected: Vec<String> = summary.iter().map(|r| r.product.clone()).collect();
            (summary, kpis, available_products, selected)
        }
        None => {
            warnings.push("No sales records supplied; report is empty".to_string());
            (Vec::new(), KpiSet::default(), Vec::new(), Vec::new())
        }
    };

    if let Some(m) = &month {
        if summary.is_empty() {
            warnings.push(format!("No sales match the selection for {}", m));
        }
    }
    collect_row_warnings(&summary, &mut warnings);

    // -- Financial layer -----------------------------------------------------
    let (health, insights, aging, customer_receivables) = match &input.financials {
        Some(fin) => {
            let receivables_total = total_receivables(&fin.receivables);
            let health = calculate_health_score(&HealthInput {
                cash_balance: fin.cash_balance,
                receivables: receivables_total,
                profit: fin.profit,
                thresholds: input.thresholds.clone(),
            })?;

            let (current, previous) =
                period_revenues(fin, input, month.as_deref(), &kpis, &mut warnings);
            let insights = generate_insights(&InsightContext {
                receivables_concentration: concentration_ratio(
                    &fin.receivables,
                    CONCENTRATION_TOP_N,
                ),
                net_cash_movement: fin.net_cash_movement(),
                current_period_revenue: current,
                previous_period_revenue: previous,
            });

            (
                Some(health),
                insights,
                aging_buckets(&fin.receivables),
                receivables_by_customer(&fin.receivables),
            )
        }
        None => (None, Vec::new(), Vec::new(), Vec::new()),
    };

    debug!(
        month = month.as_deref().unwrap_or(""),
        products = summary.len(),
        warnings = warnings.len(),
        "built sales report"
    );

    let report = SalesReport {
        month,
        available_months,
        available_products,
        selected_products,
        summary,
        kpis,
        health,
        insights,
        aging,
        customer_receivables,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Sales & Inventory Report (filter, aggregate, derive, insight)",
        &ReportAssumptions::from(input),
        warnings,
        elapsed,
        report,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Echo of the selection parameters, without the bulky datasets.
#[derive(Serialize)]
struct ReportAssumptions<'a> {
    month: Option<&'a str>,
    products: Option<&'a [String]>,
    sales_rows: usize,
    inventory_rows: usize,
    thresholds: HealthThresholds,
    rounding: &'static str,
    missing_inventory_policy: &'static str,
}

impl<'a> From<&'a ReportInput> for ReportAssumptions<'a> {
    fn from(input: &'a ReportInput) -> Self {
        ReportAssumptions {
            month: input.month.as_deref(),
            products: input.products.as_deref(),
            sales_rows: input.sales.len(),
            inventory_rows: input.inventory.len(),
            thresholds: input.thresholds.clone().unwrap_or_default(),
            rounding: "pct_stock_remaining: 1 dp, half away from zero",
            missing_inventory_policy: "stock status UNKNOWN, excluded from restock count",
        }
    }
}

fn collect_row_warnings(summary: &[ProductSummary], warnings: &mut Vec<String>) {
    for row in summary {
        if row.stock_status == StockStatus::Unknown {
            warn!(product = %row.product, "no inventory record; stock status unknown");
            warnings.push(format!(
                "No inventory record for '{}'; stock status unknown",
                row.product
            ));
        } else if row.pct_stock_remaining.is_none() {
            warn!(product = %row.product, "zero stock and zero sales; % remaining undefined");
            warnings.push(format!(
                "'{}' has no stock and no sales; % stock remaining undefined",
                row.product
            ));
        }
    }
}

/// Current and previous period revenue: caller-supplied figures win,
/// otherwise the selected month and the month before it in the sales data,
/// narrowed to the same products as the summary.
fn period_revenues(
    fin: &FinancialSnapshot,
    input: &ReportInput,
    month: Option<&str>,
    kpis: &KpiSet,
    warnings: &mut Vec<String>,
) -> (Money, Money) {
    let trend = month.and_then(|m| match &input.products {
        Some(products) => product_revenue_trend(&input.sales, m, products),
        None => revenue_trend(&input.sales, m),
    });

    let current = fin
        .current_period_revenue
        .or_else(|| trend.as_ref().map(|t| t.current_revenue))
        .unwrap_or(kpis.total_sales);

    let previous = match fin.previous_period_revenue {
        Some(p) => p,
        None => match &trend {
            Some(t) => t.previous_revenue,
            None => {
                warnings.push(
                    "No previous period revenue available; revenue trend compared against zero"
                        .to_string(),
                );
                Decimal::ZERO
            }
        },
    };

    (current, previous)
}
