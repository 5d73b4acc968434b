use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::BreakEvenError;
use crate::types::{new_record_id, Money};
use crate::CalcResult;

/// Categories offered to callers when recording an expense. The category has
/// no computational effect; any other label is accepted as-is.
pub const EXPENSE_CATEGORIES: [&str; 8] = [
    "Operations",
    "Marketing",
    "Sales",
    "Technology",
    "HR",
    "Legal",
    "Finance",
    "Other",
];

/// Category assigned when none is given.
pub const DEFAULT_CATEGORY: &str = "Operations";

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Which cost aggregate an expense feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseKind {
    /// Does not scale with unit volume
    Fixed,
    /// Recurring lump sum classed as variable. Distinct from the per-unit
    /// variable cost carried on a product.
    Variable,
}

impl fmt::Display for ExpenseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpenseKind::Fixed => write!(f, "fixed"),
            ExpenseKind::Variable => write!(f, "variable"),
        }
    }
}

/// A single recurring expense for the period.
///
/// Records are never edited in place: delete and re-add to change one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Opaque identifier; generated when the input omits it
    #[serde(default = "new_record_id")]
    pub id: String,
    pub name: String,
    pub amount: Money,
    #[serde(alias = "type")]
    pub kind: ExpenseKind,
    #[serde(default = "default_category")]
    pub category: String,
}

impl Expense {
    pub fn new(name: impl Into<String>, amount: Money, kind: ExpenseKind) -> Self {
        Self {
            id: new_record_id(),
            name: name.into(),
            amount,
            kind,
            category: default_category(),
        }
    }

    pub fn fixed(name: impl Into<String>, amount: Money) -> Self {
        Self::new(name, amount, ExpenseKind::Fixed)
    }

    pub fn variable(name: impl Into<String>, amount: Money) -> Self {
        Self::new(name, amount, ExpenseKind::Variable)
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// Reject an expense that may not enter the input store: blank name or a
/// non-positive amount.
pub fn validate_expense(expense: &Expense) -> CalcResult<()> {
    if expense.name.trim().is_empty() {
        return Err(BreakEvenError::invalid(
            "expense.name",
            "Expense name must not be empty",
        ));
    }
    if expense.amount <= Money::ZERO {
        return Err(BreakEvenError::invalid(
            "expense.amount",
            format!(
                "Expense '{}' amount must be positive (got {})",
                expense.name, expense.amount
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_constructors_assign_unique_ids() {
        let a = Expense::fixed("Rent", dec!(1000));
        let b = Expense::fixed("Rent", dec!(1000));
        assert_ne!(a.id, b.id);
        assert_eq!(a.category, "Operations");
        assert_eq!(a.kind, ExpenseKind::Fixed);
    }

    #[test]
    fn test_validate_accepts_positive_amount() {
        let e = Expense::variable("Shipping", dec!(0.01)).with_category("Sales");
        assert!(validate_expense(&e).is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let e = Expense::fixed("   ", dec!(10));
        match validate_expense(&e) {
            Err(BreakEvenError::InvalidInput { field, .. }) => assert_eq!(field, "expense.name"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_zero_and_negative_amount() {
        assert!(validate_expense(&Expense::fixed("Rent", dec!(0))).is_err());
        assert!(validate_expense(&Expense::fixed("Rent", dec!(-5))).is_err());
    }

    #[test]
    fn test_deserialize_accepts_type_alias_and_defaults() {
        let e: Expense =
            serde_json::from_str(r#"{"name":"Ads","amount":"250","type":"variable"}"#).unwrap();
        assert_eq!(e.kind, ExpenseKind::Variable);
        assert_eq!(e.amount, dec!(250));
        assert_eq!(e.category, DEFAULT_CATEGORY);
        assert!(!e.id.is_empty());
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&ExpenseKind::Fixed).unwrap();
        assert_eq!(json, "\"fixed\"");
        assert_eq!(ExpenseKind::Variable.to_string(), "variable");
    }
}
