use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use super::breakeven::{collect_break_even_results, BreakEvenResult};
use super::portfolio::{collect_portfolio_summary, PortfolioSummary};
use super::scenarios::{collect_scenarios, ScenarioPoint, SweepBasis};
use crate::catalog::Product;
use crate::costs::collect_totals;
use crate::costs::{CostTotals, Expense};
use crate::types::{with_metadata, ComputationOutput, Units};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Everything the engine reads: the current expense and product sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenInput {
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Complete derived snapshot. Replaced wholesale on every recompute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakEvenAnalysis {
    pub totals: CostTotals,
    /// One entry per product, input order
    pub results: Vec<BreakEvenResult>,
    /// Sweep order, zero-volume levels dropped
    pub scenarios: Vec<ScenarioPoint>,
    pub portfolio: PortfolioSummary,
}

// ---------------------------------------------------------------------------
// analyze
// ---------------------------------------------------------------------------

/// Recompute totals, per-product break-even and the volume scenario sweep.
///
/// Never fails: degenerate arithmetic, and any figure beyond the Decimal
/// range, resolves to zero and is reported in the envelope's warnings. Inputs are not validated here; callers that
/// accept user data go through the input store first.
pub fn analyze(expenses: &[Expense], products: &[Product]) -> ComputationOutput<BreakEvenAnalysis> {
    let start = Instant::now();

    let mut warnings: Vec<String> = Vec::new();

    let totals = collect_totals(expenses, &mut warnings);
    let results = collect_break_even_results(products, totals.total_fixed_costs, &mut warnings);
    let scenarios = collect_scenarios(
        products,
        totals.total_fixed_costs,
        totals.total_variable_costs,
        &mut warnings,
    );
    let portfolio = collect_portfolio_summary(products, totals.total_fixed_costs, &mut warnings);

    debug!(
        expenses = expenses.len(),
        products = products.len(),
        scenario_points = scenarios.len(),
        "recomputed break-even analysis"
    );

    warnings.extend(collect_warnings(products, &results, &portfolio));

    let analysis = BreakEvenAnalysis {
        totals,
        results,
        scenarios,
        portfolio,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Contribution Margin Break-even with Proportional Volume Scenarios",
        &serde_json::json!({
            "expense_count": expenses.len(),
            "product_count": products.len(),
            "total_fixed_costs": totals.total_fixed_costs.to_string(),
            "total_variable_costs": totals.total_variable_costs.to_string(),
            "break_even_rounding": "ceiling",
            "volume_allocation": "floor of estimated share",
        }),
        warnings,
        elapsed,
        analysis,
    )
}

/// Same as [`analyze`], for callers holding a deserialized input.
pub fn analyze_break_even(input: &BreakEvenInput) -> ComputationOutput<BreakEvenAnalysis> {
    analyze(&input.expenses, &input.products)
}

fn collect_warnings(
    products: &[Product],
    results: &[BreakEvenResult],
    portfolio: &PortfolioSummary,
) -> Vec<String> {
    let mut warnings = Vec::new();

    if products.is_empty() {
        warnings.push("No products supplied; break-even results and scenarios are empty".into());
        return warnings;
    }

    for r in results.iter().filter(|r| !r.is_reachable()) {
        warn!(product = %r.product_name, margin = %r.contribution_margin, "non-positive contribution margin");
        warnings.push(format!(
            "Product '{}' has a contribution margin of {}; break-even is unreachable (reported as 0 units)",
            r.product_name, r.contribution_margin
        ));
    }

    if portfolio.sweep_basis == SweepBasis::Estimated {
        for p in products
            .iter()
            .filter(|p| p.estimated_monthly_volume <= Units::ZERO)
        {
            warnings.push(format!(
                "Product '{}' has no estimated volume; it is allocated 0 units at every scenario level",
                p.name
            ));
        }
    }

    warnings
}
