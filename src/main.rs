//! jcc-enrich: add JCC references to a Log4OM SQLite log
//!
//! Selects eQSL-confirmed QSOs with Japanese stations that have no JCC
//! reference yet, looks each callsign up in the MIC radio station registry,
//! maps the station's municipality to its JCC code and appends
//! `{"AC":"JCC","R":"<code>"}` to the QSO's contact references.
//!
//! Usage
//! -----
//!
//!   $ jcc-enrich --database ~/Log4OM/log.SQLite
//!   $ jcc-enrich --config jcc-enrich.toml --dry-run
//!
//! Set RUST_LOG=jcc_enrich_lib=debug for per-request details.
mod args;

use clap::Parser;

use crate::args::CliArgs;
use jcc_enrich_lib::batch::{run_batch, BatchOptions};
use jcc_enrich_lib::config::Config;
use jcc_enrich_lib::reference::JccTable;
use jcc_enrich_lib::registry::RegistryClient;
use jcc_enrich_lib::{db, Result};

#[tokio::main]
async fn main() {
    // Initialize logging - default to info level for our crates
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("jcc_enrich=info,jcc_enrich_lib=info"),
    )
    .init();

    let args = CliArgs::parse();

    if let Err(e) = run(&args).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: &CliArgs) -> Result<()> {
    let config = Config::load(args.config.as_deref(), &args.overrides())?;

    let table = JccTable::load(&config.jcc_table_path)?;
    let registry = RegistryClient::new(&config.registry_url, config.legacy_tls)?;

    let pool = db::connect(&config.database_path).await?;
    let total = db::count_rows(&pool).await?;
    log::info!("Log database has {} QSOs", total);

    let result = run_batch(&pool, &registry, &table, &BatchOptions::from(&config)).await;
    pool.close().await;

    result.map(|_| ())
}
