use clap::Args;
use std::time::Instant;
use serde_json::{json, Value};
use tracing::debug;

use breakeven_core::costs::collect_totals;
use breakeven_core::store::InputStore;
use breakeven_core::types::with_metadata;

use crate::input;

/// Arguments shared by every command that reads expenses and products
#[derive(Args)]
pub struct InputArgs {
    /// Path to a JSON or YAML file with `expenses` and `products`
    #[arg(long)]
    pub input: Option<String>,
}

/// Load and validate input into a fresh store.
pub fn load_store(args: &InputArgs) -> Result<InputStore, Box<dyn std::error::Error>> {
    let raw = input::load_input(args.input.as_deref())?;
    debug!(
        source = args.input.as_deref().unwrap_or("stdin"),
        expenses = raw.expenses.len(),
        products = raw.products.len(),
        "input loaded"
    );
    Ok(InputStore::from_input(raw)?)
}

type CommandResult = Result<Value, Box<dyn std::error::Error>>;

pub fn run_analyze(args: InputArgs) -> CommandResult {
    analyze_value(&load_store(&args)?)
}

pub fn run_break_even(args: InputArgs) -> CommandResult {
    break_even_value(&load_store(&args)?)
}

pub fn run_scenarios(args: InputArgs) -> CommandResult {
    scenarios_value(&load_store(&args)?)
}

pub fn run_totals(args: InputArgs) -> CommandResult {
    totals_value(&load_store(&args)?)
}

pub(crate) fn analyze_value(store: &InputStore) -> CommandResult {
    Ok(serde_json::to_value(store.analyze())?)
}

pub(crate) fn break_even_value(store: &InputStore) -> CommandResult {
    let out = store.analyze();
    let totals = out.result.totals;
    let narrowed = with_metadata(
        "Per-product Contribution Margin Break-even",
        &json!({
            "total_fixed_costs": totals.total_fixed_costs.to_string(),
            "break_even_rounding": "ceiling",
        }),
        out.warnings,
        out.metadata.computation_time_us,
        out.result.results,
    );
    Ok(serde_json::to_value(narrowed)?)
}

pub(crate) fn scenarios_value(store: &InputStore) -> CommandResult {
    let out = store.analyze();
    let portfolio = &out.result.portfolio;
    let assumptions = json!({
        "sweep_basis": portfolio.sweep_basis,
        "total_estimated_volume": portfolio.total_estimated_volume.to_string(),
        "total_fixed_costs": out.result.totals.total_fixed_costs.to_string(),
        "total_variable_costs": out.result.totals.total_variable_costs.to_string(),
    });
    let narrowed = with_metadata(
        "Proportional Volume Scenario Sweep",
        &assumptions,
        out.warnings,
        out.metadata.computation_time_us,
        out.result.scenarios,
    );
    Ok(serde_json::to_value(narrowed)?)
}

pub(crate) fn totals_value(store: &InputStore) -> CommandResult {
    let start = Instant::now();
    let mut warnings = Vec::new();
    let totals = collect_totals(store.expenses(), &mut warnings);
    let result = json!({
        "total_fixed_costs": totals.total_fixed_costs,
        "total_variable_costs": totals.total_variable_costs,
        "total_costs": totals.total_costs,
        "product_count": store.products().len(),
    });
    let out = with_metadata(
        "Expense Totals by Kind",
        &json!({
            "expense_count": store.expenses().len(),
            "kinds": ["fixed", "variable"],
        }),
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    );
    Ok(serde_json::to_value(out)?)
}
