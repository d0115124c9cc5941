use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::style::styled_cell;

/// Format output as tables using the tabled crate.
///
/// Scalar fields go into a Field/Value table; arrays of objects (product
/// summary, aging buckets, insights) each get their own titled table.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_object(map);
            }
        }
        Value::Array(arr) => {
            print_array_table(arr);
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(res_map) => print_object(res_map),
        Value::Array(arr) => print_array_table(arr),
        other => println!("{}", other),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn is_table_array(value: &Value) -> bool {
    matches!(value, Value::Array(arr) if matches!(arr.first(), Some(Value::Object(_))))
}

fn print_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map.iter().filter(|(_, v)| !is_table_array(v)) {
        builder.push_record([key.as_str(), &cell(key, val)]);
    }
    println!("{}", Table::from(builder));

    for (key, val) in map.iter().filter(|(_, v)| is_table_array(v)) {
        if let Value::Array(arr) = val {
            println!("\n{}", title(key));
            print_array_table(arr);
        }
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(headers.iter().map(|h| title(h)));

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(|v| cell(h, v)).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

/// `pct_stock_remaining` -> `Pct Stock Remaining`
fn title(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn cell(field: &str, value: &Value) -> String {
    styled_cell(field, value).unwrap_or_else(|| format_value(value))
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{}: {}", k, format_value(v)))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_title_case() {
        assert_eq!(title("pct_stock_remaining"), "Pct Stock Remaining");
        assert_eq!(title("kpis"), "Kpis");
    }

    #[test]
    fn test_nested_object_formatting() {
        let v = json!({"total_units": 3, "total_sales": "10.5"});
        assert_eq!(format_value(&v), "total_units: 3, total_sales: 10.5");
        assert_eq!(format_value(&Value::Null), "-");
    }

    #[test]
    fn test_table_arrays_detected() {
        assert!(is_table_array(&json!([{"a": 1}])));
        assert!(!is_table_array(&json!(["Jan", "Feb"])));
        assert!(!is_table_array(&json!([])));
    }
}
