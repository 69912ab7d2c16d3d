//! Analysis record persistence

use crate::error::Result;
use crate::vision::SafeSearchScores;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

/// One classified image, as stored in the image_analysis table
///
/// The id is assigned by the database and never changes; the timestamp is
/// set once at insert. Score columns are nullable in the schema, but a
/// record is only ever written with all five present.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AnalysisRecord {
    pub id: i64,
    pub filename: String,
    pub adult: Option<i64>,
    pub spoof: Option<i64>,
    pub medical: Option<i64>,
    pub violence: Option<i64>,
    pub racy: Option<i64>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Record store over a shared connection pool
///
/// Each operation checks a connection out of the pool for its own
/// duration; nothing is held across calls.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new record and return it with its assigned id and timestamp
    ///
    /// The insert runs in its own transaction; if anything fails before
    /// commit the dropped transaction rolls back and no row is written.
    pub async fn create(&self, filename: &str, scores: &SafeSearchScores) -> Result<AnalysisRecord> {
        let mut tx = self.pool.begin().await?;

        let record = sqlx::query_as::<_, AnalysisRecord>(
            r#"
            INSERT INTO image_analysis (filename, adult, spoof, medical, violence, racy, timestamp)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, filename, adult, spoof, medical, violence, racy, timestamp
            "#,
        )
        .bind(filename)
        .bind(scores.adult)
        .bind(scores.spoof)
        .bind(scores.medical)
        .bind(scores.violence)
        .bind(scores.racy)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(record)
    }

    /// All records, most recent first
    ///
    /// Ties on timestamp fall back to id order so the listing stays
    /// deterministic.
    pub async fn list_all(&self) -> Result<Vec<AnalysisRecord>> {
        let records = sqlx::query_as::<_, AnalysisRecord>(
            r#"
            SELECT id, filename, adult, spoof, medical, violence, racy, timestamp
            FROM image_analysis
            ORDER BY timestamp DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Lookup by id; absent is a valid outcome, not an error
    pub async fn get(&self, id: i64) -> Result<Option<AnalysisRecord>> {
        let record = sqlx::query_as::<_, AnalysisRecord>(
            r#"
            SELECT id, filename, adult, spoof, medical, violence, racy, timestamp
            FROM image_analysis
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Remove a record, reporting whether a row was actually deleted
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM image_analysis WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Trivial round-trip query to confirm connectivity
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_schema;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_store() -> Store {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Should open in-memory database");
        create_schema(&pool).await.expect("Should create schema");
        Store::new(pool)
    }

    fn sample_scores() -> SafeSearchScores {
        SafeSearchScores {
            adult: 1,
            spoof: 1,
            medical: 1,
            violence: 1,
            racy: 3,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamp() {
        let store = test_store().await;

        let record = store.create("photo.jpg", &sample_scores()).await.unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.filename, "photo.jpg");
        assert_eq!(record.adult, Some(1));
        assert_eq!(record.racy, Some(3));
        assert!(record.timestamp.is_some());

        let second = store.create("other.png", &sample_scores()).await.unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_list_all_newest_first() {
        let store = test_store().await;
        for name in ["a.jpg", "b.jpg", "c.jpg"] {
            store.create(name, &sample_scores()).await.unwrap();
        }

        let records = store.list_all().await.unwrap();
        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        for pair in records.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
    }

    #[tokio::test]
    async fn test_list_all_empty() {
        let store = test_store().await;
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = test_store().await;
        assert!(store.get(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_removal() {
        let store = test_store().await;
        let record = store.create("photo.jpg", &sample_scores()).await.unwrap();

        assert!(store.delete(record.id).await.unwrap());
        assert!(store.get(record.id).await.unwrap().is_none());
        assert!(!store.delete(record.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_health_check() {
        let store = test_store().await;
        store.health_check().await.unwrap();
    }
}
