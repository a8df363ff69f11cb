// Database connection handling
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::path::Path;

use crate::error::{EnrichError, Result};

/// Open the existing log database at `path`.
///
/// The file is never created. The pool holds a single connection that is
/// reused for the whole run.
pub async fn connect(path: &Path) -> Result<SqlitePool> {
    log::info!("Opening log database at: {}", path.display());

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .map_err(|source| EnrichError::Connect {
            path: path.to_path_buf(),
            source,
        })?;

    // A non-database file opens fine and only fails on first read
    sqlx::query("SELECT COUNT(*) FROM sqlite_master")
        .fetch_one(&pool)
        .await
        .map_err(|source| EnrichError::Connect {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(pool)
}

/// Total number of QSOs in the log, for the startup log line
pub async fn count_rows(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query("SELECT COUNT(*) as count FROM Log")
        .fetch_one(pool)
        .await?
        .get::<i64, _>("count");
    Ok(count)
}
