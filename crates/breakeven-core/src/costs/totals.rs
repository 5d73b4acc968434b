use serde::{Deserialize, Serialize};

use super::expense::{Expense, ExpenseKind};
use crate::types::{or_zero, Money};

/// Expense aggregates partitioned by kind. Always recomputed from the
/// expense list, never stored on their own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostTotals {
    pub total_fixed_costs: Money,
    pub total_variable_costs: Money,
    /// fixed + variable
    pub total_costs: Money,
}

/// Sum expense amounts by kind. An aggregate beyond the Decimal range is
/// reported as zero; [`crate::analysis::analyze`] surfaces that as a warning.
pub fn compute_totals(expenses: &[Expense]) -> CostTotals {
    collect_totals(expenses, &mut Vec::new())
}

/// [`compute_totals`], recording each aggregate that left the Decimal range.
pub fn collect_totals(expenses: &[Expense], warnings: &mut Vec<String>) -> CostTotals {
    let mut sum_of = |kind: ExpenseKind| -> Money {
        let total = expenses
            .iter()
            .filter(|e| e.kind == kind)
            .try_fold(Money::ZERO, |acc, e| acc.checked_add(e.amount));
        or_zero(total, warnings, || format!("Total {kind} costs"))
    };

    let total_fixed_costs = sum_of(ExpenseKind::Fixed);
    let total_variable_costs = sum_of(ExpenseKind::Variable);
    let total_costs = or_zero(
        total_fixed_costs.checked_add(total_variable_costs),
        warnings,
        || "Total costs".to_string(),
    );

    CostTotals {
        total_fixed_costs,
        total_variable_costs,
        total_costs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_expenses() {
        assert_eq!(compute_totals(&[]), CostTotals::default());
    }

    #[test]
    fn test_partition_by_kind() {
        let expenses = vec![
            Expense::fixed("Rent", dec!(2500)),
            Expense::variable("Packaging", dec!(300.50)),
            Expense::fixed("Salaries", dec!(1500)),
            Expense::variable("Commissions", dec!(199.50)),
        ];
        let totals = compute_totals(&expenses);
        assert_eq!(totals.total_fixed_costs, dec!(4000));
        assert_eq!(totals.total_variable_costs, dec!(500));
        assert_eq!(totals.total_costs, dec!(4500));
    }

    #[test]
    fn test_totals_cover_every_amount() {
        let expenses = vec![
            Expense::fixed("A", dec!(1.25)),
            Expense::variable("B", dec!(2.50)),
            Expense::variable("C", dec!(3.75)),
        ];
        let all: Money = expenses.iter().map(|e| e.amount).sum();
        let totals = compute_totals(&expenses);
        assert_eq!(totals.total_fixed_costs + totals.total_variable_costs, all);
    }

    #[test]
    fn test_overflowing_total_falls_back_to_zero() {
        let expenses = vec![
            Expense::fixed("Huge A", Money::MAX),
            Expense::fixed("Huge B", Money::MAX),
            Expense::variable("Normal", dec!(10)),
        ];
        let mut warnings = Vec::new();
        let totals = collect_totals(&expenses, &mut warnings);
        assert_eq!(totals.total_fixed_costs, dec!(0));
        assert_eq!(totals.total_variable_costs, dec!(10));
        assert_eq!(totals.total_costs, dec!(10));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("fixed"));
    }
}
