use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority,
/// then fall back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    println!("{}", minimal_line(result_obj));
}

fn minimal_line(result_obj: &Value) -> String {
    let priority_keys = [
        "score",
        "file",
        "total_sales",
        "restock_count",
        "kpis",
        "insights",
        "months",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    return format_minimal(val);
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_minimal(val));
        }
    }

    format_minimal(result_obj)
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => arr
            .iter()
            .map(|v| match v {
                Value::Object(m) => m
                    .get("message")
                    .or_else(|| m.get("product"))
                    .or_else(|| m.get("month"))
                    .map(format_minimal)
                    .unwrap_or_else(|| v.to_string()),
                other => format_minimal(other),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Object(m) => m
            .iter()
            .map(|(k, v)| format!("{}={}", k, format_minimal(v)))
            .collect::<Vec<_>>()
            .join(" "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_health_score_is_minimal_answer() {
        let v = json!({"score": 90, "status": "Excellent"});
        assert_eq!(minimal_line(&v), "90");
    }

    #[test]
    fn test_insights_print_one_per_line() {
        let v = json!({"insights": [{"message": "a"}, {"message": "b"}]});
        assert_eq!(minimal_line(&v), "a\nb");
    }

    #[test]
    fn test_report_prints_kpis() {
        let v = json!({"month": "Jan", "kpis": {"total_units": 3, "restock_count": 1}});
        assert_eq!(minimal_line(&v), "total_units=3 restock_count=1");
    }
}
