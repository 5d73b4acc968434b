pub mod expense;
pub mod totals;

pub use expense::{validate_expense, Expense, ExpenseKind, EXPENSE_CATEGORIES};
pub use totals::{collect_totals, compute_totals, CostTotals};
