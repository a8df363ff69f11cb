pub mod client; // HTTP access to the MIC radio station registry
pub mod station;

// Re-export commonly used types
pub use client::{
    RegistryClient, RegistryError, RegistryResponse, StationRegistry, DEFAULT_REGISTRY_URL,
};
pub use station::{extract_location, LocationMiss};
