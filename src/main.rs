use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use ledger_bridge::cli::{handle_export_command, handle_import_command, ExportArgs};
use ledger_bridge::config::{LedgerPaths, Settings};
use ledger_bridge::storage::Storage;

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Import bank CSV files and export ledger data",
    long_about = "ledger-bridge normalizes loosely structured CSV exports from banks \
                  into transactions, accounts and categories, and exports the stored \
                  records as CSV, JSON or a paginated report."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import transactions from a CSV file
    Import {
        /// Path to the CSV file
        file: PathBuf,
    },

    /// Export stored data for a date range
    Export(ExportArgs),

    /// Show current configuration and paths
    Config {
        /// Write the current settings to disk
        #[arg(long)]
        save: bool,
    },
}

fn main() -> Result<()> {
    ledger_bridge::init_tracing();

    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Commands::Import { file } => {
            let storage = Storage::open(paths)?;
            handle_import_command(&storage, &settings, &file)?;
        }
        Commands::Export(args) => {
            let storage = Storage::open(paths)?;
            handle_export_command(&storage, &settings, &args)?;
        }
        Commands::Config { save } => {
            println!("ledger-bridge Configuration");
            println!("===========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Default currency:         {}", settings.default_currency);
            println!("  Default account:          {}", settings.default_account_name);
            println!("  Default income category:  {}", settings.default_income_category);
            println!("  Default expense category: {}", settings.default_expense_category);
            println!("  Report backend:           {:?}", settings.report_backend);
            println!("  Report lines per page:    {}", settings.report_lines_per_page);

            if save {
                settings.save(&paths)?;
                println!();
                println!("Settings written to {}", paths.settings_file().display());
            }
        }
    }

    Ok(())
}
