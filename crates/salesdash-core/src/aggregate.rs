//! Aggregation stage: group filtered sales by product and left-join the
//! inventory position.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::records::{InventoryRecord, SalesRecord};
use crate::summary::{derive, ProductSummary};
use crate::types::{Money, Units};

/// A grouped product row joined with inventory, before derivation.
///
/// `current_stock` and `reorder_level` are `None` when the product has no
/// inventory record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAggregate {
    pub product: String,
    pub units_sold: Units,
    pub total_sales: Money,
    pub current_stock: Option<Units>,
    pub reorder_level: Option<Units>,
}

/// Group `filtered_sales` by product (first-seen order) and join inventory.
pub fn aggregate(
    filtered_sales: &[SalesRecord],
    inventory: &[InventoryRecord],
) -> Vec<ProductAggregate> {
    // First record wins if a caller skipped validation and passed duplicates.
    let mut stock: HashMap<&str, &InventoryRecord> = HashMap::with_capacity(inventory.len());
    for record in inventory {
        stock.entry(record.product.as_str()).or_insert(record);
    }

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<ProductAggregate> = Vec::new();

    for sale in filtered_sales {
        let slot = *index.entry(sale.product.as_str()).or_insert_with(|| {
            let joined = stock.get(sale.product.as_str());
            groups.push(ProductAggregate {
                product: sale.product.clone(),
                units_sold: 0,
                total_sales: Decimal::ZERO,
                current_stock: joined.map(|inv| inv.current_stock),
                reorder_level: joined.map(|inv| inv.reorder_level),
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.units_sold += sale.units_sold;
        group.total_sales += sale.total_sales;
    }

    debug!(
        rows = filtered_sales.len(),
        products = groups.len(),
        "aggregated sales by product"
    );

    groups
}

/// Aggregate and derive in one pass: the product summary for a filtered
/// set of sales.
pub fn summarize(
    filtered_sales: &[SalesRecord],
    inventory: &[InventoryRecord],
) -> Vec<ProductSummary> {
    aggregate(filtered_sales, inventory)
        .iter()
        .map(derive)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::StockStatus;
    use rust_decimal_macros::dec;

    fn sale(product: &str, units: u64, total: Decimal) -> SalesRecord {
        SalesRecord {
            month: "Jan".to_string(),
            product: product.to_string(),
            units_sold: units,
            total_sales: total,
        }
    }

    fn inv(product: &str, stock: u64, reorder: u64) -> InventoryRecord {
        InventoryRecord {
            product: product.to_string(),
            current_stock: stock,
            reorder_level: reorder,
        }
    }

    #[test]
    fn test_groups_and_sums_in_first_seen_order() {
        let sales = vec![
            sale("Gadget", 3, dec!(30)),
            sale("Widget", 10, dec!(100)),
            sale("Gadget", 2, dec!(20.50)),
        ];
        let out = aggregate(&sales, &[inv("Widget", 5, 8), inv("Gadget", 40, 10)]);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].product, "Gadget");
        assert_eq!(out[0].units_sold, 5);
        assert_eq!(out[0].total_sales, dec!(50.50));
        assert_eq!(out[0].current_stock, Some(40));
        assert_eq!(out[1].product, "Widget");
        assert_eq!(out[1].reorder_level, Some(8));
    }

    #[test]
    fn test_missing_inventory_left_undefined() {
        let out = aggregate(&[sale("Orphan", 1, dec!(9.99))], &[inv("Widget", 5, 8)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].current_stock, None);
        assert_eq!(out[0].reorder_level, None);
    }

    #[test]
    fn test_inventory_only_products_do_not_appear() {
        let out = aggregate(&[sale("Widget", 1, dec!(1))], &[inv("Widget", 5, 8), inv("Gizmo", 1, 1)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].product, "Widget");
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(&[], &[inv("Widget", 5, 8)]).is_empty());
        assert!(summarize(&[], &[]).is_empty());
    }

    #[test]
    fn test_summarize_derives_status() {
        let rows = summarize(
            &[sale("Widget", 10, dec!(100)), sale("Orphan", 1, dec!(1))],
            &[inv("Widget", 5, 8)],
        );
        assert_eq!(rows[0].stock_status, StockStatus::RestockNeeded);
        assert_eq!(rows[1].stock_status, StockStatus::Unknown);
    }
}
