use std::collections::{BTreeSet, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::records::SalesRecord;
use crate::types::{Money, Units};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub month: String,
    pub total_sales: Money,
    pub units_sold: Units,
}

/// Revenue of a month and the month before it (in dataset order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueTrend {
    pub current_month: String,
    pub previous_month: String,
    pub current_revenue: Money,
    pub previous_revenue: Money,
    pub delta: Money,
}

/// Sales totals per month, months in first-seen order.
pub fn monthly_revenue(sales: &[SalesRecord]) -> Vec<MonthlyRevenue> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut months: Vec<MonthlyRevenue> = Vec::new();

    for sale in sales {
        let slot = *index.entry(sale.month.as_str()).or_insert_with(|| {
            months.push(MonthlyRevenue {
                month: sale.month.clone(),
                total_sales: Decimal::ZERO,
                units_sold: 0,
            });
            months.len() - 1
        });
        months[slot].total_sales += sale.total_sales;
        months[slot].units_sold += sale.units_sold;
    }

    months
}

/// Compare `month` against the month preceding it. Months are ordered as
/// they first appear in the sales data, which is how spreadsheets list
/// them. `None` if `month` is absent or has no predecessor.
pub fn revenue_trend(sales: &[SalesRecord], month: &str) -> Option<RevenueTrend> {
    trend_where(sales, month, |_| true)
}

/// [`revenue_trend`] restricted to `products`. Month order still comes
/// from the whole dataset, so a month in which none of the products sold
/// counts as zero revenue rather than being skipped.
pub fn product_revenue_trend(
    sales: &[SalesRecord],
    month: &str,
    products: &[String],
) -> Option<RevenueTrend> {
    let wanted: BTreeSet<&str> = products.iter().map(String::as_str).collect();
    trend_where(sales, month, |sale| wanted.contains(sale.product.as_str()))
}

fn trend_where<F>(sales: &[SalesRecord], month: &str, include: F) -> Option<RevenueTrend>
where
    F: Fn(&SalesRecord) -> bool,
{
    let months = monthly_revenue(sales);
    let pos = months.iter().position(|m| m.month == month)?;
    if pos == 0 {
        return None;
    }
    let current_month = &months[pos].month;
    let previous_month = &months[pos - 1].month;

    let revenue_of = |m: &str| -> Money {
        sales
            .iter()
            .filter(|s| s.month == m && include(s))
            .map(|s| s.total_sales)
            .sum()
    };
    let current_revenue = revenue_of(current_month);
    let previous_revenue = revenue_of(previous_month);

    Some(RevenueTrend {
        current_month: current_month.clone(),
        previous_month: previous_month.clone(),
        current_revenue,
        previous_revenue,
        delta: current_revenue - previous_revenue,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sale(month: &str, total: Decimal) -> SalesRecord {
        SalesRecord {
            month: month.to_string(),
            product: "Widget".to_string(),
            units_sold: 1,
            total_sales: total,
        }
    }

    #[test]
    fn test_monthly_revenue() {
        let sales = vec![
            sale("Jan", dec!(100)),
            sale("Feb", dec!(80)),
            sale("Jan", dec!(50)),
        ];
        let months = monthly_revenue(&sales);
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].month, "Jan");
        assert_eq!(months[0].total_sales, dec!(150));
        assert_eq!(months[0].units_sold, 2);
        assert_eq!(months[1].total_sales, dec!(80));
    }

    #[test]
    fn test_revenue_trend_against_previous_month() {
        let sales = vec![sale("Jan", dec!(150)), sale("Feb", dec!(80))];
        let trend = revenue_trend(&sales, "Feb").unwrap();
        assert_eq!(trend.previous_month, "Jan");
        assert_eq!(trend.delta, dec!(-70));
    }

    #[test]
    fn test_first_or_missing_month_has_no_trend() {
        let sales = vec![sale("Jan", dec!(150)), sale("Feb", dec!(80))];
        assert!(revenue_trend(&sales, "Jan").is_none());
        assert!(revenue_trend(&sales, "Mar").is_none());
    }

    #[test]
    fn test_product_trend_keeps_full_month_order() {
        let mut sales = vec![sale("Jan", dec!(100)), sale("Feb", dec!(150))];
        sales.push(SalesRecord {
            month: "Jan".to_string(),
            product: "Gadget".to_string(),
            units_sold: 1,
            total_sales: dec!(900),
        });
        let trend = product_revenue_trend(&sales, "Feb", &["Widget".to_string()]).unwrap();
        assert_eq!(trend.previous_revenue, dec!(100));
        assert_eq!(trend.delta, dec!(50));

        let gadget = product_revenue_trend(&sales, "Feb", &["Gadget".to_string()]).unwrap();
        assert_eq!(gadget.current_revenue, Decimal::ZERO);
        assert_eq!(gadget.previous_month, "Jan");
    }
}
