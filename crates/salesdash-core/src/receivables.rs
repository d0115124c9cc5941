//! Customer receivables: per-customer totals, concentration and aging.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::SalesDashError;
use crate::types::{Money, Rate};
use crate::SalesDashResult;

/// An open invoice balance owed by a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerReceivable {
    pub customer: String,
    pub outstanding: Money,
    /// Days past due; 0 for invoices not yet due.
    #[serde(default)]
    pub days_overdue: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerBalance {
    pub customer: String,
    pub outstanding: Money,
}

/// Amount outstanding within one overdue window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingBucket {
    pub label: String,
    pub amount: Money,
    pub count: u32,
}

/// Aging windows as (label, inclusive lower bound, inclusive upper bound).
const AGING_WINDOWS: [(&str, u32, u32); 5] = [
    ("Current", 0, 0),
    ("1-30", 1, 30),
    ("31-60", 31, 60),
    ("61-90", 61, 90),
    ("90+", 91, u32::MAX),
];

pub fn validate_receivables(receivables: &[CustomerReceivable]) -> SalesDashResult<()> {
    for (i, r) in receivables.iter().enumerate() {
        if r.outstanding < Decimal::ZERO {
            return Err(SalesDashError::invalid(
                format!("receivables[{}].outstanding", i),
                format!("Outstanding balance for '{}' must be non-negative", r.customer),
            ));
        }
    }
    Ok(())
}

pub fn total_receivables(receivables: &[CustomerReceivable]) -> Money {
    receivables.iter().map(|r| r.outstanding).sum()
}

/// Per-customer totals, largest balance first (ties by customer name).
pub fn receivables_by_customer(receivables: &[CustomerReceivable]) -> Vec<CustomerBalance> {
    let mut totals: HashMap<&str, Money> = HashMap::new();
    for r in receivables {
        *totals.entry(r.customer.as_str()).or_insert(Decimal::ZERO) += r.outstanding;
    }

    let mut balances: Vec<CustomerBalance> = totals
        .into_iter()
        .map(|(customer, outstanding)| CustomerBalance {
            customer: customer.to_string(),
            outstanding,
        })
        .collect();
    balances.sort_by(|a, b| {
        b.outstanding
            .cmp(&a.outstanding)
            .then_with(|| a.customer.cmp(&b.customer))
    });
    balances
}

/// Share of total receivables held by the `top_n` largest customers.
/// `None` when nothing is outstanding.
pub fn concentration_ratio(receivables: &[CustomerReceivable], top_n: usize) -> Option<Rate> {
    let total = total_receivables(receivables);
    if total.is_zero() {
        return None;
    }
    let top: Money = receivables_by_customer(receivables)
        .iter()
        .take(top_n)
        .map(|b| b.outstanding)
        .sum();
    Some(top / total)
}

/// Bucket outstanding balances by days overdue. Always returns every bucket
/// in ascending order, empty ones with zero amount.
pub fn aging_buckets(receivables: &[CustomerReceivable]) -> Vec<AgingBucket> {
    AGING_WINDOWS
        .iter()
        .map(|&(label, lo, hi)| {
            let in_window = receivables
                .iter()
                .filter(|r| r.days_overdue >= lo && r.days_overdue <= hi);
            let (amount, count) = in_window.fold((Decimal::ZERO, 0u32), |(sum, n), r| {
                (sum + r.outstanding, n + 1)
            });
            AgingBucket {
                label: label.to_string(),
                amount,
                count,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn recv(customer: &str, amount: Decimal, days: u32) -> CustomerReceivable {
        CustomerReceivable {
            customer: customer.to_string(),
            outstanding: amount,
            days_overdue: days,
        }
    }

    fn book() -> Vec<CustomerReceivable> {
        vec![
            recv("Acme", dec!(400_000), 10),
            recv("Globex", dec!(250_000), 45),
            recv("Initech", dec!(150_000), 0),
            recv("Umbrella", dec!(100_000), 75),
            recv("Acme", dec!(100_000), 120),
        ]
    }

    #[test]
    fn test_by_customer_merges_and_sorts() {
        let balances = receivables_by_customer(&book());
        assert_eq!(balances.len(), 4);
        assert_eq!(balances[0].customer, "Acme");
        assert_eq!(balances[0].outstanding, dec!(500_000));
        assert_eq!(balances[3].customer, "Umbrella");
    }

    #[test]
    fn test_concentration_top3() {
        // (500k + 250k + 150k) / 1M = 0.9
        assert_eq!(concentration_ratio(&book(), 3), Some(dec!(0.9)));
    }

    #[test]
    fn test_concentration_none_when_nothing_outstanding() {
        assert_eq!(concentration_ratio(&[], 3), None);
        assert_eq!(concentration_ratio(&[recv("A", Decimal::ZERO, 0)], 3), None);
    }

    #[test]
    fn test_fewer_customers_than_top_n() {
        let r = vec![recv("A", dec!(10), 0), recv("B", dec!(30), 0)];
        assert_eq!(concentration_ratio(&r, 3), Some(Decimal::ONE));
    }

    #[test]
    fn test_aging_buckets() {
        let buckets = aging_buckets(&book());
        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Current", "1-30", "31-60", "61-90", "90+"]);
        assert_eq!(buckets[0].amount, dec!(150_000));
        assert_eq!(buckets[1].amount, dec!(400_000));
        assert_eq!(buckets[2].amount, dec!(250_000));
        assert_eq!(buckets[3].amount, dec!(100_000));
        assert_eq!(buckets[4].amount, dec!(100_000));
        assert!(buckets.iter().all(|b| b.count == 1));
    }

    #[test]
    fn test_aging_boundaries() {
        let r = vec![recv("A", dec!(1), 30), recv("B", dec!(2), 31), recv("C", dec!(4), 90), recv("D", dec!(8), 91)];
        let buckets = aging_buckets(&r);
        assert_eq!(buckets[1].amount, dec!(1));
        assert_eq!(buckets[2].amount, dec!(2));
        assert_eq!(buckets[3].amount, dec!(4));
        assert_eq!(buckets[4].amount, dec!(8));
    }

    #[test]
    fn test_negative_balance_rejected() {
        assert!(validate_receivables(&[recv("A", dec!(-1), 0)]).is_err());
        assert!(validate_receivables(&book()).is_ok());
    }
}
