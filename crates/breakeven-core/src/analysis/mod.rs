pub mod breakeven;
pub mod engine;
pub mod portfolio;
pub mod scenarios;

pub use breakeven::{break_even_for, compute_break_even_results, BreakEvenResult};
pub use engine::{analyze, analyze_break_even, BreakEvenAnalysis, BreakEvenInput};
pub use portfolio::{compute_portfolio_summary, PortfolioSummary};
pub use scenarios::{compute_scenarios, ScenarioPoint, SweepBasis};
