//! CLI command handler for data export

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, ValueEnum};

use crate::clock::SystemClock;
use crate::config::Settings;
use crate::error::LedgerResult;
use crate::export::{ExportFormat, ExportService, ExportSettings};
use crate::import::parsers::parse_date;
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    /// Sectioned CSV
    Csv,
    /// Typed JSON document
    Json,
    /// Paginated text report
    Report,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Report => ExportFormat::Report,
        }
    }
}

/// Arguments of the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: FormatArg,

    /// First day of the range (inclusive)
    #[arg(long, value_parser = parse_cli_date)]
    pub from: NaiveDate,

    /// Last day of the range (inclusive)
    #[arg(long, value_parser = parse_cli_date)]
    pub to: NaiveDate,

    /// Include transactions
    #[arg(long)]
    pub transactions: bool,

    /// Include accounts
    #[arg(long)]
    pub accounts: bool,

    /// Include budgets
    #[arg(long)]
    pub budgets: bool,

    /// Include subscriptions
    #[arg(long)]
    pub subscriptions: bool,

    /// Include goals
    #[arg(long)]
    pub goals: bool,

    /// Destination directory (defaults to the exports directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ExportArgs {
    /// Build export settings; with no section flags every section is included
    pub fn to_settings(&self) -> ExportSettings {
        let any = self.transactions || self.accounts || self.budgets || self.subscriptions || self.goals;

        ExportSettings {
            format: self.format.into(),
            start_date: self.from,
            end_date: self.to,
            include_transactions: self.transactions || !any,
            include_accounts: self.accounts || !any,
            include_budgets: self.budgets || !any,
            include_subscriptions: self.subscriptions || !any,
            include_goals: self.goals || !any,
        }
    }
}

fn parse_cli_date(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

/// Handle the export command
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    args: &ExportArgs,
) -> LedgerResult<PathBuf> {
    let export = args.to_settings();
    let destination = args
        .output
        .clone()
        .unwrap_or_else(|| storage.paths().export_dir());

    let clock = SystemClock;
    let path = ExportService::new(storage, settings, &clock).export(&export, &destination)?;

    println!("Exported {} to: {}", export.format, path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ExportArgs,
    }

    #[test]
    fn test_no_section_flags_selects_everything() {
        let cli = TestCli::parse_from(["ledger", "--from", "2024-01-01", "--to", "01/31/2024"]);
        let settings = cli.args.to_settings();

        assert_eq!(settings.format, ExportFormat::Csv);
        assert_eq!(settings.end_date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert!(settings.include_transactions && settings.include_goals);
    }

    #[test]
    fn test_section_flags_narrow_selection() {
        let cli = TestCli::parse_from([
            "ledger", "--format", "json", "--from", "2024-01-01", "--to", "2024-12-31", "--goals",
        ]);
        let settings = cli.args.to_settings();

        assert_eq!(settings.format, ExportFormat::Json);
        assert!(settings.include_goals);
        assert!(!settings.include_transactions);
        assert!(!settings.include_accounts);
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let result = TestCli::try_parse_from(["ledger", "--from", "soon", "--to", "2024-01-01"]);
        assert!(result.is_err());
    }
}
