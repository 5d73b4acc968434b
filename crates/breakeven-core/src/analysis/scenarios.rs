use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{or_zero, Money, Rate, Units};

/// Fixed sweep used when no product carries a volume estimate.
pub const FALLBACK_VOLUMES: [u32; 6] = [50, 100, 200, 300, 400, 500];

/// Multiples of the total estimated volume swept when estimates exist.
pub fn sweep_factors() -> [Decimal; 6] {
    [dec!(0.5), dec!(0.75), dec!(1.0), dec!(1.25), dec!(1.5), dec!(2.0)]
}

/// Where the sweep levels came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepBasis {
    /// Multiples of the summed product estimates
    Estimated,
    /// The fixed fallback levels
    Fallback,
}

/// Projected outcome at one total sales volume across the product mix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioPoint {
    /// Total units sold across all products
    pub volume: Units,
    pub revenue: Money,
    /// fixed costs + per-unit variable costs at this volume + variable expenses
    pub total_costs: Money,
    pub profit: Money,
    /// profit / revenue * 100 (a percentage, unlike other ratios)
    pub profit_margin: Rate,
}

/// Sum of every product's volume estimate; zero if the sum leaves the
/// Decimal range.
pub fn total_estimated_volume(products: &[Product]) -> Units {
    collect_total_estimated_volume(products, &mut Vec::new())
}

pub(crate) fn collect_total_estimated_volume(
    products: &[Product],
    warnings: &mut Vec<String>,
) -> Units {
    let total = products
        .iter()
        .try_fold(Units::ZERO, |acc, p| acc.checked_add(p.estimated_monthly_volume));
    or_zero(total, warnings, || "Total estimated volume".to_string())
}

/// The six raw sweep levels, before zero levels are dropped. A level that
/// would leave the Decimal range comes back as zero and is dropped with the
/// others.
pub fn sweep_volumes(total_estimated_volume: Units) -> (Vec<Units>, SweepBasis) {
    collect_sweep_volumes(total_estimated_volume, &mut Vec::new())
}

fn collect_sweep_volumes(
    total_estimated_volume: Units,
    warnings: &mut Vec<String>,
) -> (Vec<Units>, SweepBasis) {
    if total_estimated_volume > Units::ZERO {
        let levels = sweep_factors()
            .iter()
            .map(|f| {
                or_zero(
                    total_estimated_volume.checked_mul(*f).map(|v| v.floor()),
                    warnings,
                    || format!("Scenario level at {f}x estimated volume"),
                )
            })
            .collect();
        (levels, SweepBasis::Estimated)
    } else {
        let levels = FALLBACK_VOLUMES.iter().map(|&v| Units::from(v)).collect();
        (levels, SweepBasis::Fallback)
    }
}

/// Units of `product` sold when `volume` units are sold in total.
///
/// With estimates, each product takes its estimated share of the volume;
/// without, the volume is split evenly. Both round down, so the allocations
/// may sum to less than `volume`. A product with a zero estimate gets
/// nothing whenever any other product has an estimate. Zero if the share
/// cannot be represented.
pub fn allocate_volume(
    product: &Product,
    total_estimated_volume: Units,
    volume: Units,
    product_count: usize,
) -> Units {
    checked_allocation(product, total_estimated_volume, volume, product_count)
        .unwrap_or(Units::ZERO)
}

fn checked_allocation(
    product: &Product,
    total_estimated_volume: Units,
    volume: Units,
    product_count: usize,
) -> Option<Units> {
    if total_estimated_volume > Units::ZERO {
        let estimate = product.estimated_monthly_volume;
        // Multiplying first keeps the share exact; dividing first only when
        // the product of estimate and volume is out of range.
        estimate
            .checked_mul(volume)
            .and_then(|v| v.checked_div(total_estimated_volume))
            .or_else(|| {
                estimate
                    .checked_div(total_estimated_volume)
                    .and_then(|share| share.checked_mul(volume))
            })
            .map(|u| u.floor())
    } else if product_count == 0 {
        Some(Units::ZERO)
    } else {
        volume
            .checked_div(Units::from(product_count))
            .map(|u| u.floor())
    }
}

/// Project revenue, costs and profit across the volume sweep.
///
/// Both variable cost sources apply at every level: per-unit product costs
/// scaled by the allocated volume, plus the flat variable expense total.
/// A level whose figures leave the Decimal range keeps its volume and
/// reports zero for everything else.
pub fn compute_scenarios(
    products: &[Product],
    total_fixed_costs: Money,
    total_variable_costs: Money,
) -> Vec<ScenarioPoint> {
    collect_scenarios(
        products,
        total_fixed_costs,
        total_variable_costs,
        &mut Vec::new(),
    )
}

pub(crate) fn collect_scenarios(
    products: &[Product],
    total_fixed_costs: Money,
    total_variable_costs: Money,
    warnings: &mut Vec<String>,
) -> Vec<ScenarioPoint> {
    if products.is_empty() {
        return Vec::new();
    }

    let total_estimated = collect_total_estimated_volume(products, warnings);
    let (levels, _) = collect_sweep_volumes(total_estimated, warnings);

    levels
        .into_iter()
        .filter(|v| *v > Units::ZERO)
        .map(|volume| {
            project_point(
                products,
                total_estimated,
                volume,
                total_fixed_costs,
                total_variable_costs,
            )
            .unwrap_or_else(|| {
                or_zero(None, warnings, || format!("Scenario at volume {volume}"));
                ScenarioPoint {
                    volume,
                    revenue: Money::ZERO,
                    total_costs: Money::ZERO,
                    profit: Money::ZERO,
                    profit_margin: Rate::ZERO,
                }
            })
        })
        .collect()
}

fn project_point(
    products: &[Product],
    total_estimated: Units,
    volume: Units,
    total_fixed_costs: Money,
    total_variable_costs: Money,
) -> Option<ScenarioPoint> {
    let mut revenue = Money::ZERO;
    let mut variable_cost_at_volume = Money::ZERO;

    for product in products {
        let units = checked_allocation(product, total_estimated, volume, products.len())?;
        revenue = revenue.checked_add(product.price.checked_mul(units)?)?;
        variable_cost_at_volume =
            variable_cost_at_volume.checked_add(product.variable_cost_per_unit.checked_mul(units)?)?;
    }

    let total_costs = total_fixed_costs
        .checked_add(variable_cost_at_volume)?
        .checked_add(total_variable_costs)?;
    let profit = revenue.checked_sub(total_costs)?;
    let profit_margin = if revenue > Money::ZERO {
        profit.checked_div(revenue)?.checked_mul(dec!(100))?
    } else {
        Rate::ZERO
    };

    Some(ScenarioPoint {
        volume,
        revenue,
        total_costs,
        profit,
        profit_margin,
    })
}
