//! Business Health Score.
//!
//! Three independent threshold ladders, each contributing a fixed number of
//! points:
//! 1. **Cash** -- balance >= strong: 40, >= fair: 25, else 10.
//! 2. **Receivables** -- outstanding <= low: 30, <= moderate: 20, else 10.
//! 3. **Profit** -- profit >= strong: 30, >= fair: 20, else 10.
//!
//! The score is the sum, always in [30, 100].
//!
//! Classification:
//! - >= 80: "Excellent"
//! - >= 60: "Moderate"
//! - < 60: "High Risk"
//!
//! Default thresholds are 5,000,000 / 2,500,000 (cash), 1,000,000 /
//! 2,500,000 (receivables) and 800,000 / 400,000 (profit). Thresholds may be
//! overridden but each ladder must stay ordered, so the score stays
//! monotonic in every input.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SalesDashError;
use crate::types::Money;
use crate::SalesDashResult;

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

/// Financial position fed to the health score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthInput {
    pub cash_balance: Money,
    /// Total outstanding receivables
    pub receivables: Money,
    pub profit: Money,
    /// Optional threshold overrides (default: the standard ladders)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<HealthThresholds>,
}

/// Tier boundaries. Lower bounds are inclusive for cash and profit, upper
/// bounds are inclusive for receivables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthThresholds {
    pub cash_strong: Money,
    pub cash_fair: Money,
    pub receivables_low: Money,
    pub receivables_moderate: Money,
    pub profit_strong: Money,
    pub profit_fair: Money,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        HealthThresholds {
            cash_strong: dec!(5_000_000),
            cash_fair: dec!(2_500_000),
            receivables_low: dec!(1_000_000),
            receivables_moderate: dec!(2_500_000),
            profit_strong: dec!(800_000),
            profit_fair: dec!(400_000),
        }
    }
}

impl HealthThresholds {
    pub fn validate(&self) -> SalesDashResult<()> {
        if self.cash_strong < self.cash_fair {
            return Err(SalesDashError::invalid(
                "thresholds.cash_strong",
                "Must be >= cash_fair",
            ));
        }
        if self.receivables_low > self.receivables_moderate {
            return Err(SalesDashError::invalid(
                "thresholds.receivables_low",
                "Must be <= receivables_moderate",
            ));
        }
        if self.profit_strong < self.profit_fair {
            return Err(SalesDashError::invalid(
                "thresholds.profit_strong",
                "Must be >= profit_fair",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Excellent,
    Moderate,
    #[serde(rename = "High Risk")]
    HighRisk,
}

impl HealthStatus {
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            HealthStatus::Excellent
        } else if score >= 60 {
            HealthStatus::Moderate
        } else {
            HealthStatus::HighRisk
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HealthStatus::Excellent => "Excellent",
            HealthStatus::Moderate => "Moderate",
            HealthStatus::HighRisk => "High Risk",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Composite score with the contribution of each ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthScore {
    /// Sum of the three sub-scores (30-100).
    pub score: u32,
    pub status: HealthStatus,
    pub cash_points: u32,
    pub receivables_points: u32,
    pub profit_points: u32,
}

// ---------------------------------------------------------------------------
// Ladders
// ---------------------------------------------------------------------------

fn score_cash(cash: Money, t: &HealthThresholds) -> u32 {
    if cash >= t.cash_strong {
        40
    } else if cash >= t.cash_fair {
        25
    } else {
        10
    }
}

fn score_receivables(receivables: Money, t: &HealthThresholds) -> u32 {
    if receivables <= t.receivables_low {
        30
    } else if receivables <= t.receivables_moderate {
        20
    } else {
        10
    }
}

fn score_profit(profit: Money, t: &HealthThresholds) -> u32 {
    if profit >= t.profit_strong {
        30
    } else if profit >= t.profit_fair {
        20
    } else {
        10
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Score the business from cash, receivables and profit.
pub fn calculate_health_score(input: &HealthInput) -> SalesDashResult<HealthScore> {
    if input.receivables < Decimal::ZERO {
        return Err(SalesDashError::invalid(
            "receivables",
            "Outstanding receivables must be non-negative",
        ));
    }

    let defaults = HealthThresholds::default();
    let thresholds = match input.thresholds.as_ref() {
        Some(t) => {
            t.validate()?;
            t
        }
        None => &defaults,
    };

    let cash_points = score_cash(input.cash_balance, thresholds);
    let receivables_points = score_receivables(input.receivables, thresholds);
    let profit_points = score_profit(input.profit, thresholds);
    let score = cash_points + receivables_points + profit_points;

    debug!(
        score,
        cash_points, receivables_points, profit_points, "computed health score"
    );

    Ok(HealthScore {
        score,
        status: HealthStatus::from_score(score),
        cash_points,
        receivables_points,
        profit_points,
    })
}
