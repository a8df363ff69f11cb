//! JCC enrichment batch
//!
//! One pass over the log:
//! 1. Fetch all candidate QSOs once (later inserts are not seen)
//! 2. For each QSO, wait the configured delay, then query the registry
//! 3. Resolve the station address to a JCC code
//! 4. Append the code to the QSO's references and commit
//!
//! Every per-QSO miss is a skip that leaves the row untouched, so the next
//! run picks it up again. Storage errors end the run.

mod updater;

pub use updater::merge_and_persist;

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db::{fetch_candidates, LogRow};
use crate::error::Result;
use crate::reference::{build_reference, extract_city, JccTable, ReferenceList};
use crate::registry::{extract_location, LocationMiss, StationRegistry};

// ============================================================================
// Data Types
// ============================================================================

/// Batch tuning taken from the configuration
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Pause before every registry request
    pub delay: Duration,
    /// Resolve but do not write
    pub dry_run: bool,
}

impl From<&Config> for BatchOptions {
    fn from(config: &Config) -> Self {
        Self {
            delay: config.request_delay,
            dry_run: config.dry_run,
        }
    }
}

/// Why a QSO was left unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SkipReason {
    /// Stored contactreferences is not a JSON array
    MalformedReferences,
    /// Registry could not be reached
    Network,
    /// Registry answered with a status other than 200
    HttpStatus(u16),
    /// Registry body is not a station list
    MalformedResponse,
    /// No station registered under the callsign
    NoStation,
    /// Station entry has no equipment location
    NoLocation,
    /// Address has no prefecture + municipality
    NoMunicipality,
    /// Municipality not in the JCC table
    NoJccMatch,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MalformedReferences => write!(f, "malformed references"),
            SkipReason::Network => write!(f, "registry unreachable"),
            SkipReason::HttpStatus(code) => write!(f, "registry HTTP {}", code),
            SkipReason::MalformedResponse => write!(f, "malformed registry response"),
            SkipReason::NoStation => write!(f, "no registered station"),
            SkipReason::NoLocation => write!(f, "no equipment location"),
            SkipReason::NoMunicipality => write!(f, "no municipality in address"),
            SkipReason::NoJccMatch => write!(f, "municipality not in JCC table"),
        }
    }
}

impl From<LocationMiss> for SkipReason {
    fn from(miss: LocationMiss) -> Self {
        match miss {
            LocationMiss::Malformed => SkipReason::MalformedResponse,
            LocationMiss::NoStation => SkipReason::NoStation,
            LocationMiss::NoLocation => SkipReason::NoLocation,
        }
    }
}

/// Result of processing one QSO
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Updated { code: String },
    /// Dry run: the code resolved but nothing was written
    WouldUpdate { code: String },
    Skipped(SkipReason),
}

/// Totals for one run
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub candidates: usize,
    pub updated: usize,
    pub would_update: usize,
    pub skipped: BTreeMap<SkipReason, usize>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl BatchSummary {
    fn new(candidates: usize, started_at: DateTime<Utc>) -> Self {
        Self {
            candidates,
            updated: 0,
            would_update: 0,
            skipped: BTreeMap::new(),
            started_at,
            finished_at: None,
        }
    }

    fn record(&mut self, outcome: &RowOutcome) {
        match outcome {
            RowOutcome::Updated { .. } => self.updated += 1,
            RowOutcome::WouldUpdate { .. } => self.would_update += 1,
            RowOutcome::Skipped(reason) => *self.skipped.entry(*reason).or_insert(0) += 1,
        }
    }

    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} candidates, {} updated, {} skipped",
            self.candidates,
            self.updated,
            self.skipped_total()
        )?;
        if self.would_update > 0 {
            write!(f, ", {} resolved (dry run)", self.would_update)?;
        }
        for (reason, count) in &self.skipped {
            write!(f, "; {}: {}", reason, count)?;
        }
        if let Some(finished) = self.finished_at {
            write!(f, " in {}s", (finished - self.started_at).num_seconds())?;
        }
        Ok(())
    }
}

// ============================================================================
// Driver
// ============================================================================

/// Run one enrichment pass over the log
pub async fn run_batch<R: StationRegistry>(
    pool: &SqlitePool,
    registry: &R,
    table: &JccTable,
    options: &BatchOptions,
) -> Result<BatchSummary> {
    let rows = fetch_candidates(pool).await?;
    let mut summary = BatchSummary::new(rows.len(), Utc::now());

    log::info!("Found {} QSOs without a JCC reference", rows.len());
    if options.dry_run {
        log::info!("Dry run: no changes will be written");
    }

    for row in &rows {
        // Fixed pacing so the registry is not hammered
        tokio::time::sleep(options.delay).await;

        log::info!("{}", row.callsign);
        log::debug!("QSO {} with {} ({})", row.id, row.callsign, row.country);
        let outcome = process_row(pool, registry, table, row, options.dry_run).await?;
        if let RowOutcome::Skipped(reason) = &outcome {
            log::info!("Skipped {} (QSO {}): {}", row.callsign, row.id, reason);
        }
        summary.record(&outcome);
    }

    summary.finished_at = Some(Utc::now());
    log::info!("JCC enrichment finished: {}", summary);

    Ok(summary)
}

/// Resolve and store the JCC reference for one QSO
pub async fn process_row<R: StationRegistry>(
    pool: &SqlitePool,
    registry: &R,
    table: &JccTable,
    row: &LogRow,
    dry_run: bool,
) -> Result<RowOutcome> {
    let references = match ReferenceList::parse(&row.references) {
        Ok(r) => r,
        Err(e) => {
            log::warn!("QSO {} has unreadable contactreferences: {}", row.id, e);
            return Ok(RowOutcome::Skipped(SkipReason::MalformedReferences));
        }
    };

    let code = match resolve_jcc(registry, table, &row.callsign).await {
        Ok(code) => code,
        Err(reason) => return Ok(RowOutcome::Skipped(reason)),
    };

    let entry = build_reference(&code);

    if dry_run {
        let mut preview = references;
        preview.push(&entry)?;
        log::info!("would update {} {}", row.id, preview.to_json()?);
        return Ok(RowOutcome::WouldUpdate { code });
    }

    merge_and_persist(pool, &row.id, references, &entry).await?;
    Ok(RowOutcome::Updated { code })
}

/// Callsign → registry address → municipality → JCC code
pub async fn resolve_jcc<R: StationRegistry>(
    registry: &R,
    table: &JccTable,
    callsign: &str,
) -> std::result::Result<String, SkipReason> {
    let response = registry.lookup(callsign).await.map_err(|e| {
        log::warn!("Registry lookup for {} failed: {}", callsign, e);
        SkipReason::Network
    })?;

    if !response.is_ok() {
        return Err(SkipReason::HttpStatus(response.status));
    }

    let address = extract_location(&response.body)?;
    log::debug!("{} is located at {}", callsign, address);

    let city = extract_city(&address).ok_or(SkipReason::NoMunicipality)?;

    match table.lookup_jcc(&city) {
        Some(code) => {
            log::debug!("{} → {} (JCC {})", callsign, city, code);
            Ok(code.to_string())
        }
        None => {
            log::debug!("No JCC entry for {}", city);
            Err(SkipReason::NoJccMatch)
        }
    }
}
