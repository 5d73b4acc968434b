use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{or_zero, Money, Rate, Units};

/// Break-even figures for one product against the shared fixed cost base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakEvenResult {
    pub product_id: String,
    pub product_name: String,
    /// price - variable cost per unit
    pub contribution_margin: Money,
    /// contribution margin / price
    pub contribution_margin_ratio: Rate,
    /// ceil(fixed costs / contribution margin); 0 when the margin is not positive
    pub break_even_units: Units,
    /// break_even_units * price
    pub revenue_to_break_even: Money,
    /// estimated volume * contribution margin - fixed costs
    pub profit_at_estimated_volume: Money,
}

impl BreakEvenResult {
    /// False when the contribution margin is zero or negative and the
    /// reported break-even volume is the zero fallback.
    pub fn is_reachable(&self) -> bool {
        self.contribution_margin > Money::ZERO
    }
}

/// Break-even result for a single product.
///
/// A figure that would leave the Decimal range is reported as zero; use
/// [`crate::analysis::analyze`] to receive the accompanying warnings.
pub fn break_even_for(product: &Product, total_fixed_costs: Money) -> BreakEvenResult {
    collect_break_even(product, total_fixed_costs, &mut Vec::new())
}

pub(crate) fn collect_break_even(
    product: &Product,
    total_fixed_costs: Money,
    warnings: &mut Vec<String>,
) -> BreakEvenResult {
    let name = &product.name;

    let contribution_margin = or_zero(
        product.price.checked_sub(product.variable_cost_per_unit),
        warnings,
        || format!("Product '{name}' contribution margin"),
    );
    let contribution_margin_ratio = if product.price.is_zero() {
        Rate::ZERO
    } else {
        or_zero(
            contribution_margin.checked_div(product.price),
            warnings,
            || format!("Product '{name}' contribution margin ratio"),
        )
    };

    // Partial units round up: a fraction of a unit cannot be sold.
    let break_even_units = if contribution_margin > Money::ZERO {
        or_zero(
            total_fixed_costs
                .checked_div(contribution_margin)
                .map(|u| u.ceil()),
            warnings,
            || format!("Product '{name}' break-even units"),
        )
    } else {
        Units::ZERO
    };

    let revenue_to_break_even = or_zero(
        break_even_units.checked_mul(product.price),
        warnings,
        || format!("Product '{name}' revenue to break even"),
    );

    let profit_at_estimated_volume = or_zero(
        product
            .estimated_monthly_volume
            .checked_mul(contribution_margin)
            .and_then(|cm_total| cm_total.checked_sub(total_fixed_costs)),
        warnings,
        || format!("Product '{name}' profit at estimated volume"),
    );

    BreakEvenResult {
        product_id: product.id.clone(),
        product_name: product.name.clone(),
        contribution_margin,
        contribution_margin_ratio,
        break_even_units,
        revenue_to_break_even,
        profit_at_estimated_volume,
    }
}

/// One result per product, in input order. Each product is measured
/// against the whole fixed cost base on its own.
pub fn compute_break_even_results(
    products: &[Product],
    total_fixed_costs: Money,
) -> Vec<BreakEvenResult> {
    collect_break_even_results(products, total_fixed_costs, &mut Vec::new())
}

pub(crate) fn collect_break_even_results(
    products: &[Product],
    total_fixed_costs: Money,
    warnings: &mut Vec<String>,
) -> Vec<BreakEvenResult> {
    products
        .iter()
        .map(|p| collect_break_even(p, total_fixed_costs, warnings))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_single_product_reference_case() {
        let p = Product::new("Widget", dec!(100), dec!(60));
        let r = break_even_for(&p, dec!(4000));

        assert_eq!(r.product_id, p.id);
        assert_eq!(r.product_name, "Widget");
        assert_eq!(r.contribution_margin, dec!(40));
        assert_eq!(r.contribution_margin_ratio, dec!(0.4));
        assert_eq!(r.break_even_units, dec!(100));
        assert_eq!(r.revenue_to_break_even, dec!(10000));
        // 0 * 40 - 4000
        assert_eq!(r.profit_at_estimated_volume, dec!(-4000));
        assert!(r.is_reachable());
    }

    #[test]
    fn test_partial_units_round_up() {
        // 1000 / 30 = 33.33.. -> 34
        let p = Product::new("Widget", dec!(50), dec!(20));
        let r = break_even_for(&p, dec!(1000));
        assert_eq!(r.break_even_units, dec!(34));
        // revenue uses the rounded count
        assert_eq!(r.revenue_to_break_even, dec!(1700));
    }

    #[test]
    fn test_profit_uses_unrounded_margin() {
        let p = Product::new("Widget", dec!(10.50), dec!(4.25)).with_estimated_volume(dec!(200));
        let r = break_even_for(&p, dec!(1000));
        // 200 * 6.25 - 1000 = 250
        assert_eq!(r.profit_at_estimated_volume, dec!(250));
        // 1000 / 6.25 = 160 exactly
        assert_eq!(r.break_even_units, dec!(160));
    }

    #[test]
    fn test_zero_margin_falls_back_to_zero() {
        let p = Product::new("Flat", dec!(50), dec!(50));
        let r = break_even_for(&p, dec!(4000));
        assert_eq!(r.contribution_margin, dec!(0));
        assert_eq!(r.break_even_units, dec!(0));
        assert_eq!(r.revenue_to_break_even, dec!(0));
        assert!(!r.is_reachable());
    }

    #[test]
    fn test_negative_margin_falls_back_to_zero() {
        let p = Product::new("Loss leader", dec!(40), dec!(55)).with_estimated_volume(dec!(10));
        let r = break_even_for(&p, dec!(100));
        assert_eq!(r.contribution_margin, dec!(-15));
        assert_eq!(r.break_even_units, dec!(0));
        // 10 * -15 - 100
        assert_eq!(r.profit_at_estimated_volume, dec!(-250));
    }

    #[test]
    fn test_zero_price_ratio_is_zero() {
        let p = Product::new("Free", dec!(0), dec!(0));
        let r = break_even_for(&p, dec!(100));
        assert_eq!(r.contribution_margin_ratio, dec!(0));
        assert_eq!(r.break_even_units, dec!(0));
    }

    #[test]
    fn test_no_fixed_costs_means_zero_units() {
        let p = Product::new("Widget", dec!(10), dec!(4));
        let r = break_even_for(&p, dec!(0));
        assert_eq!(r.break_even_units, dec!(0));
        assert_eq!(r.revenue_to_break_even, dec!(0));
    }

    #[test]
    fn test_order_preserved() {
        let products = vec![
            Product::new("B", dec!(20), dec!(10)),
            Product::new("A", dec!(10), dec!(5)),
            Product::new("C", dec!(30), dec!(10)),
        ];
        let results = compute_break_even_results(&products, dec!(600));
        let names: Vec<&str> = results.iter().map(|r| r.product_name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
        assert_eq!(results[0].break_even_units, dec!(60));
        assert_eq!(results[1].break_even_units, dec!(120));
        assert_eq!(results[2].break_even_units, dec!(30));
    }

    #[test]
    fn test_empty_products() {
        assert!(compute_break_even_results(&[], dec!(5000)).is_empty());
    }

    #[test]
    fn test_quotient_beyond_decimal_range_resolves_to_zero() {
        // margin of 1e-28 against 1e11 of fixed costs
        let p = Product::new("Sliver", dec!(1), dec!(0.9999999999999999999999999999));
        let mut warnings = Vec::new();
        let r = collect_break_even(&p, dec!(100000000000), &mut warnings);

        assert!(r.is_reachable());
        assert_eq!(r.break_even_units, dec!(0));
        assert_eq!(r.revenue_to_break_even, dec!(0));
        assert_eq!(r.profit_at_estimated_volume, dec!(-100000000000));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("'Sliver' break-even units"));
    }

    #[test]
    fn test_profit_beyond_decimal_range_resolves_to_zero() {
        let p = Product::new("Bulk", dec!(10000000000000000), dec!(1))
            .with_estimated_volume(dec!(10000000000000000));
        let mut warnings = Vec::new();
        let r = collect_break_even(&p, dec!(500), &mut warnings);

        assert_eq!(r.break_even_units, dec!(1));
        assert_eq!(r.profit_at_estimated_volume, dec!(0));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("profit at estimated volume"));
    }
}
