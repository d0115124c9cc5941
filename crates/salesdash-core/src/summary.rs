//! Per-row derivation: stock status and percentage of stock remaining.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::aggregate::ProductAggregate;
use crate::types::{Money, Percent, Units};

/// Stock classification of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    Ok,
    RestockNeeded,
    /// No inventory record matched the product.
    Unknown,
}

impl StockStatus {
    /// Human-readable label used in tables and exports.
    pub fn label(self) -> &'static str {
        match self {
            StockStatus::Ok => "Stock OK",
            StockStatus::RestockNeeded => "Restock Needed",
            StockStatus::Unknown => "Stock Unknown",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One reconciled product row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub product: String,
    pub units_sold: Units,
    pub total_sales: Money,
    pub current_stock: Option<Units>,
    pub reorder_level: Option<Units>,
    pub stock_status: StockStatus,
    /// 100 * stock / (stock + units sold), one decimal place. `None` when the
    /// denominator is zero or stock is unknown.
    pub pct_stock_remaining: Option<Percent>,
}

/// `RestockNeeded` iff both values are known and stock is strictly below the
/// reorder level.
pub fn classify_stock(current_stock: Option<Units>, reorder_level: Option<Units>) -> StockStatus {
    match (current_stock, reorder_level) {
        (Some(stock), Some(reorder)) if stock < reorder => StockStatus::RestockNeeded,
        (Some(_), Some(_)) => StockStatus::Ok,
        _ => StockStatus::Unknown,
    }
}

/// Share of stock left after this period's sales, rounded half away from
/// zero to one decimal place.
pub fn pct_stock_remaining(current_stock: Option<Units>, units_sold: Units) -> Option<Percent> {
    let stock = current_stock?;
    let denominator = Decimal::from(stock) + Decimal::from(units_sold);
    if denominator.is_zero() {
        return None;
    }
    let pct = Decimal::ONE_HUNDRED * Decimal::from(stock) / denominator;
    Some(pct.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
}

/// Derive the summary row for one aggregate.
pub fn derive(row: &ProductAggregate) -> ProductSummary {
    ProductSummary {
        product: row.product.clone(),
        units_sold: row.units_sold,
        total_sales: row.total_sales,
        current_stock: row.current_stock,
        reorder_level: row.reorder_level,
        stock_status: classify_stock(row.current_stock, row.reorder_level),
        pct_stock_remaining: pct_stock_remaining(row.current_stock, row.units_sold),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn agg(units: u64, stock: Option<u64>, reorder: Option<u64>) -> ProductAggregate {
        ProductAggregate {
            product: "Widget".to_string(),
            units_sold: units,
            total_sales: dec!(100),
            current_stock: stock,
            reorder_level: reorder,
        }
    }

    #[test]
    fn test_restock_needed_below_reorder() {
        let row = derive(&agg(10, Some(5), Some(8)));
        assert_eq!(row.stock_status, StockStatus::RestockNeeded);
        assert_eq!(row.pct_stock_remaining, Some(dec!(33.3)));
    }

    #[test]
    fn test_stock_ok_at_or_above_reorder() {
        assert_eq!(classify_stock(Some(8), Some(8)), StockStatus::Ok);
        let row = derive(&agg(10, Some(20), Some(8)));
        assert_eq!(row.stock_status, StockStatus::Ok);
        assert_eq!(row.pct_stock_remaining, Some(dec!(66.7)));
    }

    #[test]
    fn test_unknown_when_inventory_missing() {
        let row = derive(&agg(10, None, None));
        assert_eq!(row.stock_status, StockStatus::Unknown);
        assert_eq!(row.pct_stock_remaining, None);
    }

    #[test]
    fn test_pct_undefined_for_zero_denominator() {
        assert_eq!(pct_stock_remaining(Some(0), 0), None);
        assert_eq!(pct_stock_remaining(Some(0), 5), Some(Decimal::ZERO));
        assert_eq!(pct_stock_remaining(Some(5), 0), Some(dec!(100)));
    }

    #[test]
    fn test_pct_rounds_half_away_from_zero() {
        // 100 * 1 / 16 = 6.25 -> 6.3
        assert_eq!(pct_stock_remaining(Some(1), 15), Some(dec!(6.3)));
        // 100 * 1 / 80 = 1.25 -> 1.3
        assert_eq!(pct_stock_remaining(Some(1), 79), Some(dec!(1.3)));
        // 100 * 1 / 40 = 2.5 stays
        assert_eq!(pct_stock_remaining(Some(1), 39), Some(dec!(2.5)));
    }

    #[test]
    fn test_status_serializes_screaming_snake() {
        let json = serde_json::to_string(&StockStatus::RestockNeeded).unwrap();
        assert_eq!(json, "\"RESTOCK_NEEDED\"");
        assert_eq!(StockStatus::Ok.to_string(), "Stock OK");
    }
}
