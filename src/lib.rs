// jcc-enrich library
// Re-export modules for use in main.rs

pub mod batch;
pub mod config;
pub mod db;
pub mod error;
pub mod reference;
pub mod registry;

pub use error::{EnrichError, Result};
