//! Delimited-text export of the product summary.

use crate::error::SalesDashError;
use crate::summary::ProductSummary;
use crate::SalesDashResult;

/// Column order of the exported summary.
pub const SUMMARY_HEADERS: [&str; 7] = [
    "Product",
    "Units Sold",
    "Total Sales",
    "Current Stock",
    "Reorder Level",
    "Stock Status",
    "% Stock Remaining",
];

/// Download name offered for a month's summary. Path separators in the
/// month label are replaced so the name stays a single path component.
pub fn export_file_name(month: &str) -> String {
    let month: String = month
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("sales_stock_summary_{}.csv", month)
}

fn summary_record(row: &ProductSummary) -> [String; 7] {
    let opt = |v: Option<u64>| v.map(|n| n.to_string()).unwrap_or_default();
    [
        row.product.clone(),
        row.units_sold.to_string(),
        format!("{:.2}", row.total_sales),
        opt(row.current_stock),
        opt(row.reorder_level),
        row.stock_status.label().to_string(),
        row.pct_stock_remaining
            .map(|p| format!("{:.1}", p))
            .unwrap_or_default(),
    ]
}

/// Write the summary as CSV: a header row then one row per product.
/// Undefined values are written as empty fields.
pub fn write_summary_csv<W: std::io::Write>(
    writer: W,
    summary: &[ProductSummary],
) -> SalesDashResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(SUMMARY_HEADERS)?;
    for row in summary {
        wtr.write_record(summary_record(row))?;
    }
    wtr.flush()
        .map_err(|e| SalesDashError::Export(e.to_string()))?;
    Ok(())
}

/// The summary as an in-memory CSV string.
pub fn summary_csv(summary: &[ProductSummary]) -> SalesDashResult<String> {
    let mut buf: Vec<u8> = Vec::new();
    write_summary_csv(&mut buf, summary)?;
    String::from_utf8(buf).map_err(|e| SalesDashError::Export(e.to_string()))
}
