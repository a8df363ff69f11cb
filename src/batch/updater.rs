// Reference merge and write-back

use sqlx::SqlitePool;

use crate::db::apply_update;
use crate::error::Result;
use crate::reference::{ReferenceEntry, ReferenceList};

/// Append `entry` after the QSO's existing references and store the result.
///
/// No duplicate check happens here; rows that already carry a JCC entry
/// never reach this point because the candidate query excludes them.
pub async fn merge_and_persist(
    pool: &SqlitePool,
    id: &str,
    mut existing: ReferenceList,
    entry: &ReferenceEntry,
) -> Result<()> {
    existing.push(entry)?;
    apply_update(pool, id, &existing).await
}
