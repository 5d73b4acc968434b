use serde_json::{Map, Value};
use std::io::{self, Write};

use super::{result_rows, scalar_text};

/// Write output as CSV to stdout.
///
/// Record lists (break-even results, scenario points) become one row per
/// record. A result object becomes `field,value` pairs with nested objects
/// flattened to dotted keys; its arrays are skipped, use the narrower
/// commands to export those.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let written = if let Some(rows) = result_rows(value) {
        write_rows(&mut wtr, rows)
    } else {
        let target = match value.get("result") {
            Some(Value::Object(result)) => Some(result),
            _ => value.as_object(),
        };
        match target {
            Some(map) => write_fields(&mut wtr, map),
            None => wtr.write_record([scalar_text(value)]),
        }
    };

    if let Err(e) = written.and_then(|_| wtr.flush().map_err(Into::into)) {
        eprintln!("CSV output error: {}", e);
    }
}

fn write_rows<W: Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            wtr.write_record([scalar_text(item)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;
    for map in rows.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| map.get(*h).map(scalar_text).unwrap_or_default())
            .collect();
        wtr.write_record(&row)?;
    }
    Ok(())
}

fn write_fields<W: Write>(wtr: &mut csv::Writer<W>, map: &Map<String, Value>) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    let mut flat = Vec::new();
    flatten("", map, &mut flat);
    for (key, val) in flat {
        wtr.write_record([key, val])?;
    }
    Ok(())
}

fn flatten(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, String)>) {
    for (key, val) in map {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(nested) => flatten(&full, nested, out),
            Value::Array(_) => {}
            _ => out.push((full, scalar_text(val))),
        }
    }
}
