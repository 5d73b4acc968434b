//! In-memory session state: the validated expense and product lists the
//! engine reads from.
//!
//! Every record passes validation on the way in, so the engine never sees
//! an invalid one through this path. Derived output is not cached; call
//! [`InputStore::analyze`] after each mutation.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::{analyze, BreakEvenAnalysis, BreakEvenInput};
use crate::catalog::{validate_product, Product};
use crate::costs::{compute_totals, validate_expense, CostTotals, Expense, ExpenseKind};
use crate::error::BreakEvenError;
use crate::types::{new_record_id, ComputationOutput, Money, Units};
use crate::CalcResult;

/// User-entered fields for a new expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
    pub name: String,
    pub amount: Money,
    pub kind: ExpenseKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// User-entered fields for a new product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Money,
    pub variable_cost_per_unit: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_monthly_volume: Option<Units>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputStore {
    expenses: Vec<Expense>,
    products: Vec<Product>,
}

impl InputStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-load records, validating each one. Duplicate ids are rejected.
    pub fn from_records(expenses: Vec<Expense>, products: Vec<Product>) -> CalcResult<Self> {
        let mut store = Self::new();
        for e in expenses {
            store.insert_expense(e)?;
        }
        for p in products {
            store.insert_product(p)?;
        }
        Ok(store)
    }

    pub fn from_input(input: BreakEvenInput) -> CalcResult<Self> {
        Self::from_records(input.expenses, input.products)
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty() && self.products.is_empty()
    }

    pub fn add_expense(&mut self, new: NewExpense) -> CalcResult<&Expense> {
        let mut expense = Expense::new(new.name, new.amount, new.kind);
        if let Some(category) = new.category {
            expense.category = category;
        }
        self.insert_expense(expense)
    }

    pub fn add_product(&mut self, new: NewProduct) -> CalcResult<&Product> {
        let product = Product {
            id: new_record_id(),
            name: new.name,
            price: new.price,
            variable_cost_per_unit: new.variable_cost_per_unit,
            estimated_monthly_volume: new.estimated_monthly_volume.unwrap_or(Units::ZERO),
        };
        self.insert_product(product)
    }

    pub fn insert_expense(&mut self, expense: Expense) -> CalcResult<&Expense> {
        validate_expense(&expense)?;
        if self.expenses.iter().any(|e| e.id == expense.id) {
            return Err(BreakEvenError::invalid(
                "expense.id",
                format!("Duplicate expense id '{}'", expense.id),
            ));
        }
        info!(id = %expense.id, name = %expense.name, kind = %expense.kind, "expense added");
        self.expenses.push(expense);
        Ok(&self.expenses[self.expenses.len() - 1])
    }

    pub fn insert_product(&mut self, product: Product) -> CalcResult<&Product> {
        validate_product(&product)?;
        if self.products.iter().any(|p| p.id == product.id) {
            return Err(BreakEvenError::invalid(
                "product.id",
                format!("Duplicate product id '{}'", product.id),
            ));
        }
        info!(id = %product.id, name = %product.name, "product added");
        self.products.push(product);
        Ok(&self.products[self.products.len() - 1])
    }

    pub fn remove_expense(&mut self, id: &str) -> CalcResult<Expense> {
        let idx = self
            .expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| BreakEvenError::NotFound {
                entity: "Expense".into(),
                id: id.to_string(),
            })?;
        info!(id, "expense removed");
        Ok(self.expenses.remove(idx))
    }

    pub fn remove_product(&mut self, id: &str) -> CalcResult<Product> {
        let idx = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| BreakEvenError::NotFound {
                entity: "Product".into(),
                id: id.to_string(),
            })?;
        info!(id, "product removed");
        Ok(self.products.remove(idx))
    }

    /// Drop every record. Asking the user first is the caller's job.
    pub fn clear(&mut self) {
        info!(
            expenses = self.expenses.len(),
            products = self.products.len(),
            "store cleared"
        );
        self.expenses.clear();
        self.products.clear();
    }

    pub fn totals(&self) -> CostTotals {
        compute_totals(&self.expenses)
    }

    pub fn analyze(&self) -> ComputationOutput<BreakEvenAnalysis> {
        analyze(&self.expenses, &self.products)
    }

    pub fn to_input(&self) -> BreakEvenInput {
        BreakEvenInput {
            expenses: self.expenses.clone(),
            products: self.products.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rent() -> NewExpense {
        NewExpense {
            name: "Rent".into(),
            amount: dec!(4000),
            kind: ExpenseKind::Fixed,
            category: None,
        }
    }

    fn widget() -> NewProduct {
        NewProduct {
            name: "Widget".into(),
            price: dec!(100),
            variable_cost_per_unit: dec!(60),
            estimated_monthly_volume: None,
        }
    }

    #[test]
    fn test_add_and_analyze() {
        let mut store = InputStore::new();
        store.add_expense(rent()).unwrap();
        let product_id = store.add_product(widget()).unwrap().id.clone();

        let out = store.analyze();
        assert_eq!(out.result.results[0].product_id, product_id);
        assert_eq!(out.result.results[0].break_even_units, dec!(100));
        assert_eq!(store.products()[0].estimated_monthly_volume, dec!(0));
        assert_eq!(store.expenses()[0].category, "Operations");
    }

    #[test]
    fn test_add_expense_with_category() {
        let mut store = InputStore::new();
        let mut e = rent();
        e.category = Some("Legal".into());
        assert_eq!(store.add_expense(e).unwrap().category, "Legal");
    }

    #[test]
    fn test_rejects_invalid_records_and_keeps_state() {
        let mut store = InputStore::new();
        store.add_expense(rent()).unwrap();

        let mut bad = widget();
        bad.variable_cost_per_unit = dec!(100);
        assert!(store.add_product(bad).is_err());

        let mut zero = rent();
        zero.amount = dec!(0);
        assert!(store.add_expense(zero).is_err());

        assert_eq!(store.expenses().len(), 1);
        assert!(store.products().is_empty());
    }

    #[test]
    fn test_remove_by_id() {
        let mut store = InputStore::new();
        let keep = store.add_expense(rent()).unwrap().id.clone();
        let mut ads = rent();
        ads.name = "Ads".into();
        ads.kind = ExpenseKind::Variable;
        let drop = store.add_expense(ads).unwrap().id.clone();

        let removed = store.remove_expense(&drop).unwrap();
        assert_eq!(removed.name, "Ads");
        assert_eq!(store.expenses().len(), 1);
        assert_eq!(store.expenses()[0].id, keep);
        assert_eq!(store.totals().total_variable_costs, dec!(0));
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut store = InputStore::new();
        match store.remove_product("missing") {
            Err(BreakEvenError::NotFound { entity, id }) => {
                assert_eq!(entity, "Product");
                assert_eq!(id, "missing");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let p = Product::new("A", dec!(10), dec!(5));
        let dup = p.clone();
        assert!(InputStore::from_records(vec![], vec![p, dup]).is_err());
    }

    #[test]
    fn test_clear() {
        let mut store = InputStore::new();
        store.add_expense(rent()).unwrap();
        store.add_product(widget()).unwrap();
        store.clear();
        assert!(store.is_empty());
        assert!(store.analyze().result.results.is_empty());
    }
}
