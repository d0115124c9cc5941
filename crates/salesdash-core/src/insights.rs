//! Rule-based narrative over derived financial figures.
//!
//! Rules run in a fixed order and each emits exactly one line, so the
//! narrative always has one entry per rule:
//! 1. **Concentration** -- top-3 customers' share of receivables above 75%
//!    is a warning.
//! 2. **Cash flow** -- positive net cash movement is good news, anything
//!    else is a warning.
//! 3. **Revenue trend** -- growth against the previous period, or decline.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{format_currency, format_ratio_pct, format_signed_currency, Money, Rate};

/// Concentration above this share of receivables is flagged.
pub const CONCENTRATION_LIMIT: Rate = dec!(0.75);

/// Number of largest customers counted towards concentration.
pub const CONCENTRATION_TOP_N: usize = 3;

/// Scalar inputs the rules read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightContext {
    /// Top-3 customer share of total receivables; `None` if nothing is owed.
    #[serde(default)]
    pub receivables_concentration: Option<Rate>,
    pub net_cash_movement: Money,
    pub current_period_revenue: Money,
    pub previous_period_revenue: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightRule {
    Concentration,
    CashFlow,
    RevenueTrend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Positive,
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub rule: InsightRule,
    pub severity: Severity,
    pub message: String,
}

impl Insight {
    fn new(rule: InsightRule, severity: Severity, message: String) -> Self {
        Insight {
            rule,
            severity,
            message,
        }
    }
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

fn concentration_insight(ratio: Option<Rate>) -> Insight {
    match ratio {
        Some(r) if r > CONCENTRATION_LIMIT => Insight::new(
            InsightRule::Concentration,
            Severity::Warning,
            format!(
                "High concentration risk: top {} customers hold {} of receivables.",
                CONCENTRATION_TOP_N,
                format_ratio_pct(r)
            ),
        ),
        Some(r) => Insight::new(
            InsightRule::Concentration,
            Severity::Info,
            format!(
                "Receivables are diversified: top {} customers hold {} of receivables.",
                CONCENTRATION_TOP_N,
                format_ratio_pct(r)
            ),
        ),
        None => Insight::new(
            InsightRule::Concentration,
            Severity::Info,
            "No outstanding receivables; concentration risk does not apply.".to_string(),
        ),
    }
}

fn cash_flow_insight(net: Money) -> Insight {
    if net > Decimal::ZERO {
        Insight::new(
            InsightRule::CashFlow,
            Severity::Positive,
            format!(
                "Positive cash flow: net cash movement of {} this period.",
                format_signed_currency(net)
            ),
        )
    } else {
        Insight::new(
            InsightRule::CashFlow,
            Severity::Warning,
            format!(
                "Cash flow warning: net cash movement of {} this period; review outflows.",
                format_signed_currency(net)
            ),
        )
    }
}

fn revenue_trend_insight(current: Money, previous: Money) -> Insight {
    let delta = current - previous;
    if current > previous {
        Insight::new(
            InsightRule::RevenueTrend,
            Severity::Positive,
            format!(
                "Revenue grew by {} versus the previous period.",
                format_currency(delta)
            ),
        )
    } else {
        Insight::new(
            InsightRule::RevenueTrend,
            Severity::Warning,
            format!(
                "Revenue declined: change of {} versus the previous period.",
                format_signed_currency(delta)
            ),
        )
    }
}

/// Evaluate every rule in order. Always returns one insight per rule.
pub fn generate_insights(ctx: &InsightContext) -> Vec<Insight> {
    vec![
        concentration_insight(ctx.receivables_concentration),
        cash_flow_insight(ctx.net_cash_movement),
        revenue_trend_insight(ctx.current_period_revenue, ctx.previous_period_revenue),
    ]
}

/// The narrative as plain lines.
pub fn insight_messages(insights: &[Insight]) -> Vec<String> {
    insights.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(conc: Option<Rate>, net: Money, cur: Money, prev: Money) -> InsightContext {
        InsightContext {
            receivables_concentration: conc,
            net_cash_movement: net,
            current_period_revenue: cur,
            previous_period_revenue: prev,
        }
    }

    #[test]
    fn test_all_warnings() {
        let out = generate_insights(&ctx(
            Some(dec!(0.825)),
            dec!(-50_000),
            dec!(900_000),
            dec!(1_000_000),
        ));
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].rule, InsightRule::Concentration);
        assert_eq!(out[0].severity, Severity::Warning);
        assert!(out[0].message.contains("82.5%"));
        assert_eq!(out[1].severity, Severity::Warning);
        assert!(out[1].message.contains("-$50,000.00"));
        assert_eq!(out[2].severity, Severity::Warning);
        assert!(out[2].message.contains("-$100,000.00"));
    }

    #[test]
    fn test_all_positive() {
        let out = generate_insights(&ctx(
            Some(dec!(0.40)),
            dec!(125_000),
            dec!(1_200_000),
            dec!(1_000_000),
        ));
        assert_eq!(out[0].severity, Severity::Info);
        assert_eq!(
            out[1].message,
            "Positive cash flow: net cash movement of +$125,000.00 this period."
        );
        assert_eq!(
            out[2].message,
            "Revenue grew by $200,000.00 versus the previous period."
        );
    }

    #[test]
    fn test_concentration_limit_is_exclusive() {
        let out = concentration_insight(Some(dec!(0.75)));
        assert_eq!(out.severity, Severity::Info);
    }

    #[test]
    fn test_zero_cash_and_flat_revenue_are_warnings() {
        let out = generate_insights(&ctx(None, Decimal::ZERO, dec!(10), dec!(10)));
        assert_eq!(out[0].severity, Severity::Info);
        assert_eq!(out[1].severity, Severity::Warning);
        assert_eq!(out[2].rule, InsightRule::RevenueTrend);
        assert_eq!(out[2].severity, Severity::Warning);
    }

    #[test]
    fn test_messages_in_rule_order() {
        let out = generate_insights(&ctx(None, dec!(1), dec!(2), dec!(1)));
        let lines = insight_messages(&out);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("No outstanding receivables"));
        assert!(lines[1].starts_with("Positive cash flow"));
        assert!(lines[2].starts_with("Revenue grew"));
    }
}
