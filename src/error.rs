// Fatal error type for the enrichment run
//
// Anything that reaches main through this enum stops the batch. Per-row
// problems (registry misses, unmatched addresses) never end up here, they
// are reported as batch::SkipReason instead.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    /// The log database could not be opened
    #[error("Failed to open database {}: {source}", .path.display())]
    Connect {
        path: PathBuf,
        #[source]
        source: sqlx::Error,
    },

    /// Query or update against an open database failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The JCC reference table could not be read
    #[error("Failed to load JCC table {}: {source}", .path.display())]
    JccTable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The JCC reference table is missing a required column
    #[error("JCC table {} has no '{column}' column", .path.display())]
    JccColumn { path: PathBuf, column: &'static str },

    #[error("Failed to encode references: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EnrichError>;
