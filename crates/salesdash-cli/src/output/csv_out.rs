use serde_json::Value;
use std::io;

use salesdash_core::export::write_summary_csv;
use salesdash_core::summary::ProductSummary;

/// Write output as CSV to stdout.
///
/// A product summary (bare, or under `result.summary`) is written in the
/// export layout; anything else falls back to a generic rendering.
pub fn print_csv(value: &Value) {
    if let Some(summary) = find_summary(value) {
        if let Err(e) = write_summary_csv(io::stdout().lock(), &summary) {
            eprintln!("CSV export error: {}", e);
        }
        return;
    }

    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            let fields = map
                .get("result")
                .and_then(Value::as_object)
                .unwrap_or(map);
            if let Some(Value::Array(rows)) = fields.values().find(|v| is_object_array(v)) {
                write_array_csv(&mut wtr, rows);
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in fields {
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                }
            }
        }
        Value::Array(arr) => {
            write_array_csv(&mut wtr, arr);
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn find_summary(value: &Value) -> Option<Vec<ProductSummary>> {
    let candidate = match value {
        Value::Array(_) if is_object_array(value) => value,
        // a keyed summary is written even when empty, so the header still appears
        Value::Object(map) => map
            .get("result")
            .and_then(|r| r.get("summary"))
            .or_else(|| map.get("summary"))
            .filter(|v| v.is_array())?,
        _ => return None,
    };
    serde_json::from_value(candidate.clone()).ok()
}

fn is_object_array(value: &Value) -> bool {
    matches!(value, Value::Array(arr) if matches!(arr.first(), Some(Value::Object(_))))
}

fn write_array_csv<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary_row() -> Value {
        json!({
            "product": "Widget",
            "units_sold": 10,
            "total_sales": "100",
            "current_stock": 5,
            "reorder_level": 8,
            "stock_status": "RESTOCK_NEEDED",
            "pct_stock_remaining": "33.3"
        })
    }

    #[test]
    fn test_finds_summary_in_envelope() {
        let envelope = json!({"result": {"summary": [summary_row()]}});
        let rows = find_summary(&envelope).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product, "Widget");
    }

    #[test]
    fn test_finds_bare_summary_array() {
        assert!(find_summary(&json!([summary_row()])).is_some());
    }

    #[test]
    fn test_other_arrays_are_not_summaries() {
        assert!(find_summary(&json!([{"label": "1-30", "amount": "5"}])).is_none());
        assert!(find_summary(&json!({"result": {"score": 90}})).is_none());
    }

    #[test]
    fn test_empty_keyed_summary_keeps_header() {
        let rows = find_summary(&json!({"summary": []})).unwrap();
        assert!(rows.is_empty());

        let mut buf = Vec::new();
        write_summary_csv(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Product,Units Sold,Total Sales"));
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_empty_bare_array_is_not_a_summary() {
        assert!(find_summary(&json!([])).is_none());
    }
}
