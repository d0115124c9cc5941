use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Ratios expressed as decimals (0.75 = 75%). Never as percentages.
pub type Rate = Decimal;

/// Percentages expressed on a 0-100 scale.
pub type Percent = Decimal;

/// Unit counts (units sold, units on hand).
pub type Units = u64;

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// Format a money amount as `$1,234.56` (negative amounts as `-$1,234.56`).
pub fn format_currency(amount: Money) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}${}", sign, group_thousands(amount.abs()))
}

/// Format a money amount with an explicit sign: `+$1,234.56` / `-$1,234.56`.
pub fn format_signed_currency(amount: Money) -> String {
    if amount > Decimal::ZERO {
        format!("+{}", format_currency(amount))
    } else {
        format_currency(amount)
    }
}

/// Format a ratio (0.825) as a percentage with one decimal (`82.5%`).
pub fn format_ratio_pct(ratio: Rate) -> String {
    let pct = (ratio * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1}%", pct)
}

fn group_thousands(amount: Money) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded);
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    format!("{}.{}", grouped, frac_part)
}
