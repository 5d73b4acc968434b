mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use commands::analysis::InputArgs;
use commands::export::ExportArgs;

/// Break-even and volume scenario analysis
#[derive(Parser)]
#[command(
    name = "bea",
    version,
    about = "Break-even and volume scenario analysis",
    long_about = "Computes contribution margins, break-even units and revenue per product, \
                  and projects revenue, costs and profit across a sweep of total sales \
                  volumes. Reads expenses and products from a JSON or YAML file or stdin."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log engine activity to stderr at debug level
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Full analysis: totals, break-even results, scenarios, portfolio summary
    Analyze(InputArgs),
    /// Per-product break-even results
    BreakEven(InputArgs),
    /// Revenue, cost and profit across the volume sweep
    Scenarios(InputArgs),
    /// Fixed and variable expense totals
    Totals(InputArgs),
    /// Write a JSON report of inputs and results
    Export(ExportArgs),
    /// List the standard expense categories
    Categories,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::analysis::run_analyze(args),
        Commands::BreakEven(args) => commands::analysis::run_break_even(args),
        Commands::Scenarios(args) => commands::analysis::run_scenarios(args),
        Commands::Totals(args) => commands::analysis::run_totals(args),
        Commands::Export(args) => commands::export::run_export(args),
        Commands::Categories => commands::expenses::run_categories(),
        Commands::Version => {
            println!("bea {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
