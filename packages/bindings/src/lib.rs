use napi::Result as NapiResult;
use napi_derive::napi;

use salesdash_core::health::HealthInput;
use salesdash_core::insights::InsightContext;
use salesdash_core::receivables::CustomerReceivable;
use salesdash_core::report::ReportInput;
use salesdash_core::summary::ProductSummary;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[napi]
pub fn sales_report(input_json: String) -> NapiResult<String> {
    let input: ReportInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = salesdash_core::report::build_report(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Summary rows and KPIs only, for redrawing a table after a filter change.
#[napi]
pub fn product_summary(input_json: String) -> NapiResult<String> {
    let input: ReportInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = salesdash_core::report::build_report(&input).map_err(to_napi_error)?;
    let body = serde_json::json!({
        "summary": output.result.summary,
        "kpis": output.result.kpis,
        "warnings": output.warnings,
    });
    serde_json::to_string(&body).map_err(to_napi_error)
}

#[napi]
pub fn export_summary_csv(summary_json: String) -> NapiResult<String> {
    let summary: Vec<ProductSummary> =
        serde_json::from_str(&summary_json).map_err(to_napi_error)?;
    salesdash_core::export::summary_csv(&summary).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Financial layer
// ---------------------------------------------------------------------------

#[napi]
pub fn health_score(input_json: String) -> NapiResult<String> {
    let input: HealthInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        salesdash_core::health::calculate_health_score(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn insights(input_json: String) -> NapiResult<String> {
    let ctx: InsightContext = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = salesdash_core::insights::generate_insights(&ctx);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn aging_report(receivables_json: String) -> NapiResult<String> {
    use salesdash_core::receivables::{
        aging_buckets, concentration_ratio, receivables_by_customer, total_receivables,
        validate_receivables,
    };

    let book: Vec<CustomerReceivable> =
        serde_json::from_str(&receivables_json).map_err(to_napi_error)?;
    validate_receivables(&book).map_err(to_napi_error)?;
    let body = serde_json::json!({
        "total_receivables": total_receivables(&book),
        "top3_concentration": concentration_ratio(&book, salesdash_core::insights::CONCENTRATION_TOP_N),
        "aging": aging_buckets(&book),
        "customers": receivables_by_customer(&book),
    });
    serde_json::to_string(&body).map_err(to_napi_error)
}
