use serde_json::Value;

use super::{result_rows, scalar_text};

/// Key answer fields, in priority order.
const PRIORITY_KEYS: [&str; 6] = [
    "break_even_units",
    "profit",
    "weighted_break_even_units",
    "path",
    "total_costs",
    "category",
];

/// Labels identifying a row in a record list.
const LABEL_KEYS: [&str; 2] = ["product_name", "volume"];

/// Print just the key answer from the output.
///
/// Record lists print one `label: value` line per record. Objects print the
/// first priority key found, searching one level of nesting, then fall
/// back to the first field.
pub fn print_minimal(value: &Value) {
    if let Some(rows) = result_rows(value) {
        for row in rows {
            println!("{}", minimal_row(row));
        }
        return;
    }

    let result_obj = value.get("result").unwrap_or(value);
    println!("{}", minimal_object(result_obj));
}

fn minimal_row(row: &Value) -> String {
    let answer = find_priority(row).map(scalar_text);
    let label = LABEL_KEYS
        .iter()
        .find_map(|k| row.get(*k))
        .map(scalar_text);
    match (label, answer) {
        (Some(l), Some(a)) => format!("{l}: {a}"),
        (None, Some(a)) => a,
        _ => scalar_text(row),
    }
}

fn minimal_object(obj: &Value) -> String {
    if let Some(v) = find_priority(obj) {
        return scalar_text(v);
    }
    if let Some(v) = obj
        .as_object()
        .and_then(|m| m.values().find_map(find_priority))
    {
        return scalar_text(v);
    }
    match obj.as_object().and_then(|m| m.iter().next()) {
        Some((key, val)) => format!("{}: {}", key, scalar_text(val)),
        None => scalar_text(obj),
    }
}

fn find_priority(obj: &Value) -> Option<&Value> {
    PRIORITY_KEYS
        .iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}
