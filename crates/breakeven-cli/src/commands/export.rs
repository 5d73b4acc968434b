use chrono::Utc;
use clap::Args;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

use breakeven_core::report::BreakEvenReport;
use breakeven_core::store::InputStore;

use super::analysis::{load_store, InputArgs};

/// Arguments for report export
#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: InputArgs,

    /// Directory to write the report into (defaults to the working directory)
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

pub fn run_export(args: ExportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let store = load_store(&args.source)?;
    let dir = match args.dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    export_value(&store, &dir)
}

pub(crate) fn export_value(
    store: &InputStore,
    dir: &Path,
) -> Result<Value, Box<dyn std::error::Error>> {
    let analysis = store.analyze();
    let report = BreakEvenReport::build(
        store.expenses(),
        store.products(),
        &analysis.result,
        Utc::now(),
    );
    let path = report.write_to(dir)?;

    Ok(json!({
        "result": {
            "path": path.display().to_string(),
            "product_count": report.product_count,
            "export_date": report.export_date.to_rfc3339(),
        },
        "warnings": analysis.warnings,
    }))
}
