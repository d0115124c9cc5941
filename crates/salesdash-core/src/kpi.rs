use serde::{Deserialize, Serialize};

use crate::summary::{ProductSummary, StockStatus};
use crate::types::{Money, Units};

/// Whole-set reduction over a product summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiSet {
    pub total_units: Units,
    pub total_sales: Money,
    /// Rows with `StockStatus::RestockNeeded`
    pub restock_count: u64,
    /// Rows whose product had no inventory record
    pub unknown_stock_count: u64,
}

/// Sum units and sales and count restock rows. Order-independent; an empty
/// summary yields all zeros.
pub fn compute_kpis(summary: &[ProductSummary]) -> KpiSet {
    summary.iter().fold(KpiSet::default(), |mut acc, row| {
        acc.total_units += row.units_sold;
        acc.total_sales += row.total_sales;
        match row.stock_status {
            StockStatus::RestockNeeded => acc.restock_count += 1,
            StockStatus::Unknown => acc.unknown_stock_count += 1,
            StockStatus::Ok => {}
        }
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn row(product: &str, units: u64, sales: Decimal, status: StockStatus) -> ProductSummary {
        ProductSummary {
            product: product.to_string(),
            units_sold: units,
            total_sales: sales,
            current_stock: None,
            reorder_level: None,
            stock_status: status,
            pct_stock_remaining: None,
        }
    }

    #[test]
    fn test_kpis_sum_and_count() {
        let rows = vec![
            row("A", 10, dec!(100.25), StockStatus::RestockNeeded),
            row("B", 5, dec!(49.75), StockStatus::Ok),
            row("C", 1, dec!(10), StockStatus::Unknown),
            row("D", 2, dec!(20), StockStatus::RestockNeeded),
        ];
        let kpis = compute_kpis(&rows);
        assert_eq!(kpis.total_units, 18);
        assert_eq!(kpis.total_sales, dec!(180));
        assert_eq!(kpis.restock_count, 2);
        assert_eq!(kpis.unknown_stock_count, 1);
    }

    #[test]
    fn test_kpis_order_independent() {
        let mut rows = vec![
            row("A", 10, dec!(0.1), StockStatus::Ok),
            row("B", 7, dec!(0.2), StockStatus::RestockNeeded),
            row("C", 3, dec!(0.3), StockStatus::Ok),
        ];
        let forward = compute_kpis(&rows);
        rows.reverse();
        assert_eq!(compute_kpis(&rows), forward);
        assert_eq!(forward.total_sales, dec!(0.6));
    }

    #[test]
    fn test_kpis_empty() {
        let kpis = compute_kpis(&[]);
        assert_eq!(kpis.total_units, 0);
        assert_eq!(kpis.total_sales, Decimal::ZERO);
        assert_eq!(kpis.restock_count, 0);
    }
}
