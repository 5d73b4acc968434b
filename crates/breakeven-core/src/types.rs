use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Ratios expressed as decimals (0.4 = 40%), unless a field says otherwise.
pub type Rate = Decimal;

/// Unit counts and sales volumes. Whole units after rounding, but kept as
/// Decimal so estimates may be fractional.
pub type Units = Decimal;

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// Resolve a checked computation that left the Decimal range to zero,
/// recording `context` in `warnings`.
pub(crate) fn or_zero(
    value: Option<Decimal>,
    warnings: &mut Vec<String>,
    context: impl FnOnce() -> String,
) -> Decimal {
    match value {
        Some(v) => v,
        None => {
            let context = context();
            warn!(%context, "decimal overflow");
            warnings.push(format!(
                "{context} exceeds the decimal range; reported as 0"
            ));
            Decimal::ZERO
        }
    }
}

/// Fresh opaque identifier for an expense or product record.
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
