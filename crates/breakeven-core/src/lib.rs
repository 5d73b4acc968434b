pub mod analysis;
pub mod catalog;
pub mod costs;
pub mod error;
pub mod types;

#[cfg(feature = "store")]
pub mod store;

#[cfg(feature = "report")]
pub mod report;

pub use error::BreakEvenError;
pub use types::*;

/// Standard result type for all break-even operations
pub type CalcResult<T> = Result<T, BreakEvenError>;
