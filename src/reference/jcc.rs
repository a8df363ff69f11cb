// JCC (Japan Century Cities) lookup table
//
// Loaded from the JARL-derived CSV (jcc-list-utf8.csv). Only two columns
// matter: Name2 (municipality name with suffix, e.g. 渋谷区) and JCC (the
// award code). Codes are kept as text so leading zeros survive.
//
// Municipality names are not unique nationwide. Lookups return the first
// row with a matching name and do not consider the prefecture.

use std::io::Read;
use std::path::Path;

use crate::error::{EnrichError, Result};

const NAME_COLUMN: &str = "Name2";
const CODE_COLUMN: &str = "JCC";

/// One table row
#[derive(Debug, Clone, PartialEq, Eq)]
struct JccEntry {
    name: String,
    /// None when the CSV cell is empty
    code: Option<String>,
}

/// Municipality name to JCC code table, in file order
#[derive(Debug, Clone, Default)]
pub struct JccTable {
    entries: Vec<JccEntry>,
}

impl JccTable {
    /// Read the table from a CSV file
    pub fn load(path: &Path) -> Result<Self> {
        log::info!("Loading JCC table from {}", path.display());

        let file = std::fs::File::open(path).map_err(|e| EnrichError::JccTable {
            path: path.to_path_buf(),
            source: csv::Error::from(e),
        })?;
        let table = Self::from_reader(file, path)?;

        log::info!("Loaded {} JCC entries", table.len());
        Ok(table)
    }

    /// Read the table from any CSV source; `path` is only used in errors
    pub fn from_reader<R: Read>(reader: R, path: &Path) -> Result<Self> {
        let csv_error = |source: csv::Error| EnrichError::JccTable {
            path: path.to_path_buf(),
            source,
        };

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers().map_err(csv_error)?.clone();
        let column = |wanted: &'static str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}') == wanted)
                .ok_or_else(|| EnrichError::JccColumn {
                    path: path.to_path_buf(),
                    column: wanted,
                })
        };
        let name_idx = column(NAME_COLUMN)?;
        let code_idx = column(CODE_COLUMN)?;

        let mut entries = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(csv_error)?;
            let Some(name) = record.get(name_idx) else {
                continue;
            };
            let code = record
                .get(code_idx)
                .filter(|c| !c.is_empty())
                .map(|c| c.to_string());
            entries.push(JccEntry {
                name: name.to_string(),
                code,
            });
        }

        Ok(Self { entries })
    }

    /// JCC code for an exact municipality name; first matching row wins
    pub fn lookup_jcc(&self, municipality: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == municipality)
            .and_then(|e| e.code.as_deref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
