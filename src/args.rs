use clap::Parser;
use std::path::PathBuf;

use jcc_enrich_lib::config::Overrides;

/// CLI arguments for jcc-enrich
#[derive(Debug, Parser)]
#[command(
    name = "jcc-enrich",
    version,
    about = "Add JCC references to eQSL-confirmed Japanese QSOs using the MIC station registry"
)]
pub struct CliArgs {
    /// Config file (default: jcc-enrich.toml in the working directory)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Log database file, overrides database_path
    #[arg(short = 'd', long = "database")]
    pub database: Option<PathBuf>,

    /// JCC table CSV, overrides jcc_table_path
    #[arg(short = 'j', long = "jcc-table")]
    pub jcc_table: Option<PathBuf>,

    /// Seconds to wait before each registry request, overrides request_delay_secs
    #[arg(long = "delay")]
    pub delay: Option<u64>,

    /// Resolve codes and log the updates without writing them
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

impl CliArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            database_path: self.database.clone(),
            jcc_table_path: self.jcc_table.clone(),
            request_delay_secs: self.delay,
            dry_run: self.dry_run,
        }
    }
}
