use serde_json::{json, Value};

use breakeven_core::costs::expense::{DEFAULT_CATEGORY, EXPENSE_CATEGORIES};

/// List the standard expense categories.
pub fn run_categories() -> Result<Value, Box<dyn std::error::Error>> {
    let rows: Vec<Value> = EXPENSE_CATEGORIES
        .iter()
        .map(|c| json!({ "category": c, "default": *c == DEFAULT_CATEGORY }))
        .collect();
    Ok(json!({ "results": rows }))
}
