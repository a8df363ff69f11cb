// Reference data module - JCC codes and the contact reference format
//
// - jcc: municipality name → JCC code table (CSV)
// - location: municipality extraction from Japanese addresses
// - entry: Log4OM contactreferences entries

pub mod entry;
pub mod jcc;
pub mod location;

pub use entry::{build_reference, ReferenceEntry, ReferenceList, JCC_AUTHORITY};
pub use jcc::JccTable;
pub use location::extract_city;
