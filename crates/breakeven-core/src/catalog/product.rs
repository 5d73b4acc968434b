use serde::{Deserialize, Serialize};

use crate::error::BreakEvenError;
use crate::types::{new_record_id, Money, Units};
use crate::CalcResult;

/// A product line with its unit economics and the sales estimate for the
/// period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Opaque identifier; generated when the input omits it
    #[serde(default = "new_record_id")]
    pub id: String,
    pub name: String,
    /// Unit sale price
    pub price: Money,
    /// Per-unit variable cost (materials, direct labour, ...)
    #[serde(alias = "variableCostPerUnit")]
    pub variable_cost_per_unit: Money,
    /// Estimated units sold in the period; zero when unknown
    #[serde(default, alias = "estimatedMonthlyVolume")]
    pub estimated_monthly_volume: Units,
}

impl Product {
    pub fn new(name: impl Into<String>, price: Money, variable_cost_per_unit: Money) -> Self {
        Self {
            id: new_record_id(),
            name: name.into(),
            price,
            variable_cost_per_unit,
            estimated_monthly_volume: Units::ZERO,
        }
    }

    pub fn with_estimated_volume(mut self, volume: Units) -> Self {
        self.estimated_monthly_volume = volume;
        self
    }

    /// price - variable cost per unit
    pub fn contribution_margin(&self) -> Money {
        self.price - self.variable_cost_per_unit
    }
}

/// Reject a product that may not enter the input store.
///
/// A valid product has a name, a positive price, a non-negative unit cost
/// strictly below the price, and a non-negative volume estimate.
pub fn validate_product(product: &Product) -> CalcResult<()> {
    if product.name.trim().is_empty() {
        return Err(BreakEvenError::invalid(
            "product.name",
            "Product name must not be empty",
        ));
    }
    if product.price <= Money::ZERO {
        return Err(BreakEvenError::invalid(
            "product.price",
            format!(
                "Product '{}' price must be positive (got {})",
                product.name, product.price
            ),
        ));
    }
    if product.variable_cost_per_unit < Money::ZERO {
        return Err(BreakEvenError::invalid(
            "product.variable_cost_per_unit",
            format!(
                "Product '{}' variable cost per unit cannot be negative",
                product.name
            ),
        ));
    }
    if product.price <= product.variable_cost_per_unit {
        return Err(BreakEvenError::invalid(
            "product.variable_cost_per_unit",
            format!(
                "Product '{}' price ({}) must exceed variable cost per unit ({})",
                product.name, product.price, product.variable_cost_per_unit
            ),
        ));
    }
    if product.estimated_monthly_volume < Units::ZERO {
        return Err(BreakEvenError::invalid(
            "product.estimated_monthly_volume",
            format!(
                "Product '{}' estimated volume cannot be negative",
                product.name
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn field_of(result: CalcResult<()>) -> String {
        match result {
            Err(BreakEvenError::InvalidInput { field, .. }) => field,
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_contribution_margin() {
        let p = Product::new("Widget", dec!(100), dec!(60));
        assert_eq!(p.contribution_margin(), dec!(40));
        assert_eq!(p.estimated_monthly_volume, dec!(0));
    }

    #[test]
    fn test_valid_product() {
        let p = Product::new("Widget", dec!(19.99), dec!(0)).with_estimated_volume(dec!(120));
        assert!(validate_product(&p).is_ok());
    }

    #[test]
    fn test_rejects_blank_name() {
        let p = Product::new("", dec!(10), dec!(5));
        assert_eq!(field_of(validate_product(&p)), "product.name");
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let p = Product::new("Widget", dec!(0), dec!(0));
        assert_eq!(field_of(validate_product(&p)), "product.price");
    }

    #[test]
    fn test_rejects_negative_variable_cost() {
        let p = Product::new("Widget", dec!(10), dec!(-1));
        assert_eq!(
            field_of(validate_product(&p)),
            "product.variable_cost_per_unit"
        );
    }

    #[test]
    fn test_rejects_price_not_above_variable_cost() {
        let equal = Product::new("Widget", dec!(50), dec!(50));
        assert_eq!(
            field_of(validate_product(&equal)),
            "product.variable_cost_per_unit"
        );
        let below = Product::new("Widget", dec!(40), dec!(50));
        assert!(validate_product(&below).is_err());
    }

    #[test]
    fn test_rejects_negative_volume() {
        let p = Product::new("Widget", dec!(10), dec!(5)).with_estimated_volume(dec!(-3));
        assert_eq!(
            field_of(validate_product(&p)),
            "product.estimated_monthly_volume"
        );
    }

    #[test]
    fn test_deserialize_camel_case_aliases() {
        let p: Product = serde_json::from_str(
            r#"{"id":"p-1","name":"Gadget","price":"25","variableCostPerUnit":"10","estimatedMonthlyVolume":"40"}"#,
        )
        .unwrap();
        assert_eq!(p.id, "p-1");
        assert_eq!(p.variable_cost_per_unit, dec!(10));
        assert_eq!(p.estimated_monthly_volume, dec!(40));
    }

    #[test]
    fn test_deserialize_defaults_volume_to_zero() {
        let p: Product = serde_json::from_str(
            r#"{"name":"Gadget","price":"25","variable_cost_per_unit":"10"}"#,
        )
        .unwrap();
        assert_eq!(p.estimated_monthly_volume, Units::ZERO);
    }
}
