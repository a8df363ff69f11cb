// Contact reference entries as stored in Log4OM's contactreferences column
//
// The column holds a JSON array of objects such as
//   [{"AC":"WWFF","R":"JAFF-0001"},{"AC":"JCC","R":"100110"}]
// where AC is the award/authority code and R the reference value.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// Authority code for Japan Century Cities references
pub const JCC_AUTHORITY: &str = "JCC";

/// One reference attached to a QSO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    #[serde(rename = "AC")]
    pub authority: String,
    #[serde(rename = "R")]
    pub value: String,
}

/// Build the JCC reference for a resolved code
pub fn build_reference(code: &str) -> ReferenceEntry {
    ReferenceEntry {
        authority: JCC_AUTHORITY.to_string(),
        value: code.to_string(),
    }
}

/// The decoded reference array of one QSO.
///
/// Existing entries are held as raw JSON text and written back untouched,
/// so fields this crate does not know about survive exactly as stored.
#[derive(Debug, Default)]
pub struct ReferenceList {
    entries: Vec<Box<RawValue>>,
}

impl ReferenceList {
    /// Decode a stored `contactreferences` value; anything but a JSON array fails
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<Box<RawValue>> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    /// Append an entry after all existing ones. Duplicates are not checked.
    pub fn push(&mut self, entry: &ReferenceEntry) -> Result<(), serde_json::Error> {
        self.entries.push(serde_json::value::to_raw_value(entry)?);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compact JSON, no whitespace between entries
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }
}
