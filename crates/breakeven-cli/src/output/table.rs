use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{result_rows, scalar_text};

/// Format output as tables using the tabled crate.
///
/// Scalar fields of the result share one Field/Value table; nested objects
/// get their own Field/Value table and arrays of records a column table,
/// each under a heading.
pub fn print_table(value: &Value) {
    if let Some(rows) = result_rows(value) {
        print_record_table(rows);
    } else if let Some(Value::Object(result)) = value.get("result") {
        print_sections(result);
    } else if let Value::Object(map) = value {
        print_field_table(map.iter().filter(|(_, v)| !v.is_object() && !v.is_array()));
    } else {
        println!("{}", value);
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_sections(result: &Map<String, Value>) {
    let scalars: Vec<(&String, &Value)> = result
        .iter()
        .filter(|(_, v)| !v.is_object() && !v.is_array())
        .collect();
    if !scalars.is_empty() {
        print_field_table(scalars.into_iter());
    }

    for (key, val) in result {
        match val {
            Value::Object(nested) => {
                println!("\n{}", heading(key));
                print_field_table(nested.iter());
            }
            Value::Array(rows) => {
                println!("\n{}", heading(key));
                print_record_table(rows);
            }
            _ => {}
        }
    }
}

fn print_field_table<'a>(fields: impl Iterator<Item = (&'a String, &'a Value)>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in fields {
        builder.push_record([key.as_str(), &scalar_text(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_record_table(rows: &[Value]) {
    if rows.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = rows.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for map in rows.iter().filter_map(Value::as_object) {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(scalar_text).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }

        println!("{}", Table::from(builder));
    } else {
        for item in rows {
            println!("{}", scalar_text(item));
        }
    }
}

/// `break_even_units` -> `Break Even Units`
fn heading(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading() {
        assert_eq!(heading("scenarios"), "Scenarios");
        assert_eq!(heading("total_fixed_costs"), "Total Fixed Costs");
    }
}
