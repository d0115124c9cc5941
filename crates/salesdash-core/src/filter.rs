//! Filter stage: narrow sales rows to one month and a set of products.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::records::SalesRecord;

/// A month plus an optional product set.
///
/// `products == None` selects every product sold in the month, which is the
/// default a dashboard offers before the user narrows anything. An explicit
/// empty set selects nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub month: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<BTreeSet<String>>,
}

impl FilterSelection {
    pub fn month(month: impl Into<String>) -> Self {
        FilterSelection {
            month: month.into(),
            products: None,
        }
    }

    pub fn with_products<I, S>(mut self, products: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.products = Some(products.into_iter().map(Into::into).collect());
        self
    }

    fn admits(&self, record: &SalesRecord) -> bool {
        record.month == self.month
            && self
                .products
                .as_ref()
                .map_or(true, |set| set.contains(&record.product))
    }
}

/// Return the records matching `selection`, in input order.
pub fn filter_sales(sales: &[SalesRecord], selection: &FilterSelection) -> Vec<SalesRecord> {
    let filtered: Vec<SalesRecord> = sales
        .iter()
        .filter(|r| selection.admits(r))
        .cloned()
        .collect();

    debug!(
        month = %selection.month,
        input_rows = sales.len(),
        output_rows = filtered.len(),
        "filtered sales"
    );

    filtered
}

/// Distinct months in first-seen order.
pub fn distinct_months(sales: &[SalesRecord]) -> Vec<String> {
    first_seen(sales.iter().map(|r| r.month.as_str()))
}

/// Distinct products sold in `month`, in first-seen order.
pub fn products_for_month(sales: &[SalesRecord], month: &str) -> Vec<String> {
    first_seen(
        sales
            .iter()
            .filter(|r| r.month == month)
            .map(|r| r.product.as_str()),
    )
}

fn first_seen<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sales() -> Vec<SalesRecord> {
        let row = |m: &str, p: &str, u: u64| SalesRecord {
            month: m.to_string(),
            product: p.to_string(),
            units_sold: u,
            total_sales: dec!(10) * rust_decimal::Decimal::from(u),
        };
        vec![
            row("Jan", "Widget", 10),
            row("Jan", "Gadget", 4),
            row("Feb", "Widget", 7),
            row("Jan", "Widget", 2),
            row("Feb", "Gizmo", 1),
        ]
    }

    #[test]
    fn test_default_selection_takes_all_products_in_month() {
        let out = filter_sales(&sales(), &FilterSelection::month("Jan"));
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|r| r.month == "Jan"));
        // input order preserved
        assert_eq!(out[0].product, "Widget");
        assert_eq!(out[1].product, "Gadget");
        assert_eq!(out[2].units_sold, 2);
    }

    #[test]
    fn test_product_subset() {
        let sel = FilterSelection::month("Jan").with_products(["Widget"]);
        let out = filter_sales(&sales(), &sel);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.product == "Widget"));
    }

    #[test]
    fn test_empty_product_set_yields_nothing() {
        let sel = FilterSelection::month("Jan").with_products(Vec::<String>::new());
        assert!(filter_sales(&sales(), &sel).is_empty());
    }

    #[test]
    fn test_unknown_month_yields_nothing() {
        assert!(filter_sales(&sales(), &FilterSelection::month("Dec")).is_empty());
    }

    #[test]
    fn test_product_from_other_month_not_admitted() {
        let sel = FilterSelection::month("Jan").with_products(["Gizmo"]);
        assert!(filter_sales(&sales(), &sel).is_empty());
    }

    #[test]
    fn test_distinct_months_and_products() {
        assert_eq!(distinct_months(&sales()), vec!["Jan", "Feb"]);
        assert_eq!(products_for_month(&sales(), "Jan"), vec!["Widget", "Gadget"]);
        assert_eq!(products_for_month(&sales(), "Feb"), vec!["Widget", "Gizmo"]);
        assert!(products_for_month(&sales(), "Mar").is_empty());
    }
}
