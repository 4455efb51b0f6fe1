use serde_json::Value;

use super::plain_text;

/// Print just the projected future value.
///
/// For a schedule the last row is the full horizon, so its value is used.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_text(value));
}

fn minimal_text(value: &Value) -> String {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let row = match result {
        Value::Array(rows) => rows.last().unwrap_or(result),
        _ => result,
    };

    match row.get("future_value") {
        Some(fv) => plain_text(fv, "null"),
        None => plain_text(row, "null"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_projection_prints_future_value() {
        let value = json!({"result": {"future_value": "232339.08", "gains": "112339.08"}});
        assert_eq!(minimal_text(&value), "232339.08");
    }

    #[test]
    fn test_schedule_prints_last_row() {
        let value = json!({"result": [
            {"year": 1.0, "future_value": "12809.33"},
            {"year": 2.0, "future_value": "27243.20"}
        ]});
        assert_eq!(minimal_text(&value), "27243.20");
    }
}
