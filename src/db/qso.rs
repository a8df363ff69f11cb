// QSO table access: candidate selection and reference updates

use sqlx::SqlitePool;

use crate::error::Result;
use crate::reference::ReferenceList;

/// Rows eligible for JCC enrichment.
///
/// The confirmation check is a substring match on the serialized JSON, so a
/// differently spaced or ordered eQSL entry is not recognised. SQLite LIKE is
/// case-insensitive for ASCII. qsoid is read as text so integer and text keys
/// both work; the UPDATE binds it back as text and column affinity converts it.
const CANDIDATE_QUERY: &str = r#"
    SELECT CAST(qsoid AS TEXT), callsign, country, contactreferences
    FROM Log
    WHERE qsoconfirmations LIKE '%"CT":"EQSL","S":"Yes","R":"Yes"%'
      AND contactreferences NOT LIKE '%"AC":"JCC"%'
      AND callsign NOT LIKE '%/%'
      AND country LIKE '%Japan%'
"#;

/// A QSO selected for enrichment
#[derive(Debug, Clone, PartialEq)]
pub struct LogRow {
    pub id: String,
    pub callsign: String,
    pub country: String,
    /// Raw `contactreferences` JSON as stored
    pub references: String,
}

/// Fetch every candidate row at once
pub async fn fetch_candidates(pool: &SqlitePool) -> Result<Vec<LogRow>> {
    let rows: Vec<(String, String, String, String)> = sqlx::query_as(CANDIDATE_QUERY)
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(id, callsign, country, references)| LogRow {
            id,
            callsign,
            country,
            references,
        })
        .collect())
}

/// Replace a row's `contactreferences` and commit right away
pub async fn apply_update(pool: &SqlitePool, id: &str, references: &ReferenceList) -> Result<()> {
    let json = references.to_json()?;
    log::info!("update {} {}", id, json);

    let mut tx = pool.begin().await?;
    let result = sqlx::query("UPDATE Log SET contactreferences = ? WHERE qsoid = ?")
        .bind(&json)
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    if result.rows_affected() == 0 {
        log::warn!("Update of QSO {} matched no rows", id);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::{references_of, setup_test_db, TestQso, EQSL_CONFIRMED};
    use crate::reference::build_reference;

    #[tokio::test]
    async fn test_candidate_filter() {
        let pool = setup_test_db(&[
            TestQso::new(1, "JA1ABC"),
            // Already has a JCC reference
            TestQso::new(2, "JA1DEF").references(r#"[{"AC":"JCC","R":"100110"}]"#),
            // Portable call
            TestQso::new(3, "JA1ABC/1"),
            // Not Japan
            TestQso::new(4, "W1AW").country("United States"),
            // eQSL sent but not received
            TestQso::new(5, "JA2XYZ").confirmations(r#"[{"CT":"EQSL","S":"Yes","R":"No"}]"#),
            // Same entry, different spacing: not recognised
            TestQso::new(6, "JA3XYZ").confirmations(r#"[{"CT": "EQSL", "S": "Yes", "R": "Yes"}]"#),
            TestQso::new(7, "JH1AAA").country("Japan (Ogasawara)"),
        ])
        .await;

        let rows = fetch_candidates(&pool).await.unwrap();
        let mut ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["1", "7"]);
    }

    #[tokio::test]
    async fn test_candidate_skips_null_references() {
        let pool = setup_test_db(&[TestQso::new(1, "JA1ABC")]).await;
        sqlx::query("UPDATE Log SET contactreferences = NULL")
            .execute(&pool)
            .await
            .unwrap();

        assert!(fetch_candidates(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_candidate_row_contents() {
        let pool = setup_test_db(&[TestQso::new(42, "JA1ABC")
            .references(r#"[{"AC":"WWFF","R":"JAFF-0001"}]"#)])
        .await;

        let rows = fetch_candidates(&pool).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "42");
        assert_eq!(rows[0].callsign, "JA1ABC");
        assert_eq!(rows[0].country, "Japan");
        assert_eq!(rows[0].references, r#"[{"AC":"WWFF","R":"JAFF-0001"}]"#);
    }

    #[tokio::test]
    async fn test_apply_update_writes_compact_json() {
        let pool = setup_test_db(&[TestQso::new(1, "JA1ABC"), TestQso::new(2, "JA1DEF")]).await;

        let mut refs = ReferenceList::parse("[]").unwrap();
        refs.push(&build_reference("100110")).unwrap();
        apply_update(&pool, "1", &refs).await.unwrap();

        assert_eq!(references_of(&pool, 1).await, r#"[{"AC":"JCC","R":"100110"}]"#);
        assert_eq!(references_of(&pool, 2).await, "[]");

        // Row 1 is no longer a candidate
        let rows = fetch_candidates(&pool).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "2");
    }

    #[test]
    fn test_confirmation_pattern_matches_log4om_format() {
        assert!(CANDIDATE_QUERY.contains(r#""CT":"EQSL","S":"Yes","R":"Yes""#));
        assert!(EQSL_CONFIRMED.contains(r#""CT":"EQSL","S":"Yes","R":"Yes""#));
    }
}
