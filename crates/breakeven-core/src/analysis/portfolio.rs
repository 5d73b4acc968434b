use serde::{Deserialize, Serialize};

use super::scenarios::{collect_total_estimated_volume, sweep_volumes, SweepBasis};
use crate::catalog::Product;
use crate::types::{or_zero, Money, Units};

/// Mix-level view of the product set, weighted by volume estimates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub product_count: usize,
    pub total_estimated_volume: Units,
    /// sum(CM_i * estimate_i) / total estimate; 0 without estimates
    pub weighted_average_contribution_margin: Money,
    /// ceil(fixed costs / weighted CM) for the estimated mix; 0 when the
    /// weighted margin is not positive
    pub weighted_break_even_units: Units,
    pub sweep_basis: SweepBasis,
}

pub fn compute_portfolio_summary(products: &[Product], total_fixed_costs: Money) -> PortfolioSummary {
    collect_portfolio_summary(products, total_fixed_costs, &mut Vec::new())
}

pub(crate) fn collect_portfolio_summary(
    products: &[Product],
    total_fixed_costs: Money,
    warnings: &mut Vec<String>,
) -> PortfolioSummary {
    let total_estimated = collect_total_estimated_volume(products, warnings);

    let weighted_average_contribution_margin = if total_estimated.is_zero() {
        Money::ZERO
    } else {
        let weighted = products.iter().try_fold(Money::ZERO, |acc, p| {
            p.price
                .checked_sub(p.variable_cost_per_unit)
                .and_then(|cm| cm.checked_mul(p.estimated_monthly_volume))
                .and_then(|w| acc.checked_add(w))
        });
        or_zero(
            weighted.and_then(|sum| sum.checked_div(total_estimated)),
            warnings,
            || "Weighted average contribution margin".to_string(),
        )
    };

    let weighted_break_even_units = if weighted_average_contribution_margin > Money::ZERO {
        or_zero(
            total_fixed_costs
                .checked_div(weighted_average_contribution_margin)
                .map(|u| u.ceil()),
            warnings,
            || "Weighted break-even units".to_string(),
        )
    } else {
        Units::ZERO
    };

    let (_, sweep_basis) = sweep_volumes(total_estimated);

    PortfolioSummary {
        product_count: products.len(),
        total_estimated_volume: total_estimated,
        weighted_average_contribution_margin,
        weighted_break_even_units,
        sweep_basis,
    }
}
