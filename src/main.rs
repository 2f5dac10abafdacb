use anyhow::Result;
use clap::{Parser, Subcommand};

use categexp::cli::{handle_report_command, run_category_report, ReportArgs, ReportCommands};
use categexp::config::{CategexpPaths, Settings};

#[derive(Parser)]
#[command(
    name = "categexp",
    version,
    about = "Category income/expense roll-up reports",
    long_about = "categexp rolls period amounts up a category hierarchy and prints \
                  where the money goes, where it comes from, and how each category \
                  moved month by month."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Category report commands
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let paths = CategexpPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Report(cmd)) => {
            handle_report_command(&paths, &settings, cmd)?;
        }
        Some(Commands::Config) => {
            println!("categexp Configuration");
            println!("======================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Snapshot file:    {}", paths.snapshot_file().display());
            println!();
            println!("Settings:");
            println!("  Default report:  {}", settings.default_report);
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Indent width:    {}", settings.indent_width);
        }
        None => {
            if paths.snapshot_file().exists() {
                run_category_report(
                    &paths,
                    &settings,
                    settings.default_report,
                    &ReportArgs::default(),
                )?;
            } else {
                println!("categexp - category income/expense reports");
                println!();
                println!("Run 'categexp --help' for usage information.");
                println!(
                    "Place a snapshot at {} or pass one with 'categexp report summary --input FILE'.",
                    paths.snapshot_file().display()
                );
            }
        }
    }

    Ok(())
}
