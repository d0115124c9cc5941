use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::SalesDashError;
use crate::types::{Money, Units};
use crate::SalesDashResult;

/// One sales batch for a product in a month.
///
/// Field aliases accept the spreadsheet column headers so that exported
/// sheets can be fed to the engine without renaming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(alias = "Month")]
    pub month: String,
    #[serde(alias = "Product")]
    pub product: String,
    #[serde(alias = "Units Sold")]
    pub units_sold: Units,
    #[serde(alias = "Total Sales")]
    pub total_sales: Money,
}

/// Current stock position for a product. `product` is a natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    #[serde(alias = "Product")]
    pub product: String,
    #[serde(alias = "Current Stock")]
    pub current_stock: Units,
    #[serde(alias = "Reorder Level")]
    pub reorder_level: Units,
}

/// The two tabular sources supplied by the loader.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub sales: Vec<SalesRecord>,
    #[serde(default)]
    pub inventory: Vec<InventoryRecord>,
}

impl Dataset {
    pub fn new(sales: Vec<SalesRecord>, inventory: Vec<InventoryRecord>) -> Self {
        Dataset { sales, inventory }
    }

    pub fn validate(&self) -> SalesDashResult<()> {
        validate_sales(&self.sales)?;
        validate_inventory(&self.inventory)
    }
}

/// Reject sales rows the engine cannot reason about.
pub fn validate_sales(sales: &[SalesRecord]) -> SalesDashResult<()> {
    for (i, record) in sales.iter().enumerate() {
        if record.total_sales < Decimal::ZERO {
            return Err(SalesDashError::invalid(
                format!("sales[{}].total_sales", i),
                format!(
                    "Total sales for '{}' in {} must be non-negative",
                    record.product, record.month
                ),
            ));
        }
        if record.product.trim().is_empty() {
            return Err(SalesDashError::invalid(
                format!("sales[{}].product", i),
                "Product name must not be empty",
            ));
        }
    }
    Ok(())
}

/// Inventory rows are keyed by product; a second row for the same product
/// would make the join ambiguous.
pub fn validate_inventory(inventory: &[InventoryRecord]) -> SalesDashResult<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(inventory.len());
    for (i, record) in inventory.iter().enumerate() {
        if !seen.insert(record.product.as_str()) {
            return Err(SalesDashError::invalid(
                format!("inventory[{}].product", i),
                format!("Duplicate inventory record for '{}'", record.product),
            ));
        }
    }
    Ok(())
}
