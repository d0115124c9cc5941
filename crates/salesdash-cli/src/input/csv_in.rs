use serde::de::DeserializeOwned;

use salesdash_core::records::{InventoryRecord, SalesRecord};

use super::file::resolve_path;

/// Read a sales sheet exported as CSV
/// (`Month,Product,Units Sold,Total Sales`).
pub fn read_sales_csv(path: &str) -> Result<Vec<SalesRecord>, Box<dyn std::error::Error>> {
    read_rows(path)
}

/// Read an inventory sheet exported as CSV
/// (`Product,Current Stock,Reorder Level`).
pub fn read_inventory_csv(path: &str) -> Result<Vec<InventoryRecord>, Box<dyn std::error::Error>> {
    read_rows(path)
}

fn read_rows<T: DeserializeOwned>(path: &str) -> Result<Vec<T>, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;

    let mut rows = Vec::new();
    for (i, record) in rdr.deserialize().enumerate() {
        let row: T = record.map_err(|e| {
            format!("Failed to parse '{}' row {}: {}", canonical.display(), i + 1, e)
        })?;
        rows.push(row);
    }
    tracing::debug!(path = %canonical.display(), rows = rows.len(), "loaded csv");
    Ok(rows)
}
