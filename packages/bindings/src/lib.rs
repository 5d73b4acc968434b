use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Serialize;

use breakeven_core::analysis::{self, BreakEvenInput};
use breakeven_core::costs;
use breakeven_core::report::BreakEvenReport;
use breakeven_core::store::InputStore;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Parse `{expenses, products}` and push it through store validation.
fn load(input_json: &str) -> NapiResult<InputStore> {
    let input: BreakEvenInput = serde_json::from_str(input_json).map_err(to_napi_error)?;
    InputStore::from_input(input).map_err(to_napi_error)
}

fn to_json(value: &impl Serialize) -> NapiResult<String> {
    serde_json::to_string(value).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze(input_json: String) -> NapiResult<String> {
    let store = load(&input_json)?;
    to_json(&store.analyze())
}

#[napi]
pub fn break_even_results(input_json: String) -> NapiResult<String> {
    let store = load(&input_json)?;
    let totals = store.totals();
    to_json(&analysis::compute_break_even_results(
        store.products(),
        totals.total_fixed_costs,
    ))
}

#[napi]
pub fn scenarios(input_json: String) -> NapiResult<String> {
    let store = load(&input_json)?;
    let totals = store.totals();
    to_json(&analysis::compute_scenarios(
        store.products(),
        totals.total_fixed_costs,
        totals.total_variable_costs,
    ))
}

#[napi]
pub fn cost_totals(input_json: String) -> NapiResult<String> {
    let store = load(&input_json)?;
    to_json(&costs::compute_totals(store.expenses()))
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[napi]
pub fn build_report(input_json: String) -> NapiResult<String> {
    let store = load(&input_json)?;
    let analysis = store.analyze();
    let report = BreakEvenReport::build(
        store.expenses(),
        store.products(),
        &analysis.result,
        chrono::Utc::now(),
    );
    report.to_json_pretty().map_err(to_napi_error)
}

#[napi]
pub fn expense_categories() -> Vec<String> {
    costs::EXPENSE_CATEGORIES
        .iter()
        .map(|c| c.to_string())
        .collect()
}
