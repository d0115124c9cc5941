use colored::{Color, Colorize};
use serde_json::Value;

use salesdash_core::health::HealthStatus;
use salesdash_core::insights::Severity;
use salesdash_core::summary::StockStatus;

/// Display colour for a stock status.
pub fn stock_status_colour(status: StockStatus) -> Color {
    match status {
        StockStatus::Ok => Color::Green,
        StockStatus::RestockNeeded => Color::Red,
        StockStatus::Unknown => Color::Yellow,
    }
}

pub fn health_status_colour(status: HealthStatus) -> Color {
    match status {
        HealthStatus::Excellent => Color::Green,
        HealthStatus::Moderate => Color::Yellow,
        HealthStatus::HighRisk => Color::Red,
    }
}

pub fn severity_colour(severity: Severity) -> Color {
    match severity {
        Severity::Positive => Color::Green,
        Severity::Info => Color::Cyan,
        Severity::Warning => Color::Yellow,
    }
}

/// Render a cell, colouring the fields that carry a status.
/// Returns `None` for fields without a display hint.
pub fn styled_cell(field: &str, value: &Value) -> Option<String> {
    match field {
        "stock_status" => {
            let status: StockStatus = serde_json::from_value(value.clone()).ok()?;
            Some(status.label().color(stock_status_colour(status)).to_string())
        }
        "status" => {
            let status: HealthStatus = serde_json::from_value(value.clone()).ok()?;
            Some(status.label().color(health_status_colour(status)).bold().to_string())
        }
        "severity" => {
            let severity: Severity = serde_json::from_value(value.clone()).ok()?;
            let text = value.as_str()?;
            Some(text.color(severity_colour(severity)).to_string())
        }
        _ => None,
    }
}
