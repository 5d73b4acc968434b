use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::analysis::{BreakEvenAnalysis, BreakEvenResult, ScenarioPoint};
use crate::catalog::Product;
use crate::costs::{CostTotals, Expense};
use crate::CalcResult;

/// Downloadable snapshot of the inputs and everything derived from them.
///
/// Decimal fields serialize as strings, so figures round-trip exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenReport {
    pub expenses: Vec<Expense>,
    pub products: Vec<Product>,
    pub results: Vec<BreakEvenResult>,
    pub scenarios: Vec<ScenarioPoint>,
    pub totals: CostTotals,
    pub product_count: usize,
    pub export_date: DateTime<Utc>,
}

impl BreakEvenReport {
    pub fn build(
        expenses: &[Expense],
        products: &[Product],
        analysis: &BreakEvenAnalysis,
        export_date: DateTime<Utc>,
    ) -> Self {
        Self {
            expenses: expenses.to_vec(),
            products: products.to_vec(),
            results: analysis.results.clone(),
            scenarios: analysis.scenarios.clone(),
            totals: analysis.totals,
            product_count: products.len(),
            export_date,
        }
    }

    pub fn to_json_pretty(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// `break-even-analysis-YYYY-MM-DD.json`
    pub fn file_name(&self) -> String {
        default_file_name(self.export_date.date_naive())
    }

    /// Write the report into `dir` under its default file name.
    pub fn write_to(&self, dir: &Path) -> CalcResult<PathBuf> {
        let path = dir.join(self.file_name());
        fs::write(&path, self.to_json_pretty()?)?;
        info!(path = %path.display(), "report written");
        Ok(path)
    }
}

pub fn default_file_name(date: NaiveDate) -> String {
    format!("break-even-analysis-{}.json", date.format("%Y-%m-%d"))
}
