//! CLI commands for reports
//!
//! Provides commands for printing and exporting the category reports.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use crate::config::{CategexpPaths, Settings};
use crate::error::{RollupError, RollupResult};
use crate::models::ReportKind;
use crate::reports::{CategoryOverTimeReport, CategorySummaryReport};
use crate::storage::{ReportInputs, Snapshot};

/// Options shared by every report
#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// Snapshot file (JSON or YAML); defaults to snapshot.json in the data directory
    #[arg(short, long, env = "CATEGEXP_SNAPSHOT")]
    pub input: Option<PathBuf>,

    /// Export to CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Where the money goes: expenses by category
    #[command(alias = "expenses")]
    Goes(ReportArgs),

    /// Where the money comes from: income by category
    #[command(alias = "income")]
    Comes(ReportArgs),

    /// Categories summary: income and expenses by category
    Summary(ReportArgs),

    /// Category income/expenses month by month
    #[command(alias = "monthly")]
    OverTime(ReportArgs),
}

/// Handle report commands
pub fn handle_report_command(
    paths: &CategexpPaths,
    settings: &Settings,
    cmd: ReportCommands,
) -> RollupResult<()> {
    match cmd {
        ReportCommands::Goes(args) => {
            run_category_report(paths, settings, ReportKind::WhereMoneyGoes, &args)
        }
        ReportCommands::Comes(args) => {
            run_category_report(paths, settings, ReportKind::WhereMoneyComesFrom, &args)
        }
        ReportCommands::Summary(args) => {
            run_category_report(paths, settings, ReportKind::CategoriesSummary, &args)
        }
        ReportCommands::OverTime(args) => run_over_time_report(paths, settings, &args),
    }
}

/// Print or export one of the category roll-up reports
pub fn run_category_report(
    paths: &CategexpPaths,
    settings: &Settings,
    kind: ReportKind,
    args: &ReportArgs,
) -> RollupResult<()> {
    let inputs = load_inputs(paths, args)?;
    let report = CategorySummaryReport::generate(kind, &inputs.forest, &inputs.amounts)?;

    if let Some(path) = &args.output {
        report.export_csv(create_output(path)?)?;
        println!("{} exported to {}", kind.title(), path.display());
    } else {
        print!("{}", report.format_terminal(settings));
    }

    Ok(())
}

fn run_over_time_report(
    paths: &CategexpPaths,
    settings: &Settings,
    args: &ReportArgs,
) -> RollupResult<()> {
    let inputs = load_inputs(paths, args)?;
    let monthly = inputs.monthly.ok_or_else(|| {
        RollupError::Validation("Snapshot has no monthly section for this report".into())
    })?;
    let report = CategoryOverTimeReport::generate(&inputs.forest, &monthly)?;

    if let Some(path) = &args.output {
        report.export_csv(create_output(path)?)?;
        println!("Category income/expenses exported to {}", path.display());
    } else {
        print!("{}", report.format_terminal(settings));
    }

    Ok(())
}

fn load_inputs(paths: &CategexpPaths, args: &ReportArgs) -> RollupResult<ReportInputs> {
    let input = args
        .input
        .clone()
        .unwrap_or_else(|| paths.snapshot_file());
    Snapshot::load(&input)?.into_inputs()
}

fn create_output(path: &Path) -> RollupResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        RollupError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
