//! Record Accessor
//!
//! Read-only access to the poem and mapping collections. The Reporter only sees
//! the [`RecordStore`] trait, so tests can substitute an in-memory store.

use async_trait::async_trait;
use lgu_common::config::CheckConfig;
use lgu_common::db::{
    connect_readonly, MappingRecord, MappingRow, PoemRecord, PoemRow, RawMappingRow, RawPoemRow,
};
use lgu_common::Result;
use sqlx::SqlitePool;
use std::time::Duration;
use tracing::debug;

/// Read-only view over the poem and mapping collections
///
/// Every store failure is reported as `Error::StoreUnavailable` with the
/// store's message intact.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Total number of poem rows
    async fn count_poems(&self) -> Result<u64>;

    /// Up to `limit` poem rows in store order (not stable across calls)
    async fn sample_poems(&self, limit: u32) -> Result<Vec<PoemRow>>;

    /// Every mapping row in store order
    async fn list_mappings(&self) -> Result<Vec<MappingRow>>;

    /// Distinct non-null poem titles
    async fn list_poem_titles(&self) -> Result<Vec<String>>;

    /// Number of poems whose body is NULL
    async fn count_poems_without_body(&self) -> Result<u64>;

    /// Release the underlying connection. Safe to call more than once.
    async fn release(&self);
}

/// [`RecordStore`] backed by a read-only SQLite pool
pub struct SqliteRecordStore {
    pool: SqlitePool,
    poem_table: String,
    mapping_table: String,
}

impl SqliteRecordStore {
    /// Wrap an existing pool. Table names must already be validated.
    pub fn new(pool: SqlitePool, poem_table: &str, mapping_table: &str) -> Self {
        Self {
            pool,
            poem_table: poem_table.to_string(),
            mapping_table: mapping_table.to_string(),
        }
    }

    /// Open the store named by the configuration
    pub async fn open(config: &CheckConfig) -> Result<Self> {
        config.settings.validate()?;
        let busy_timeout = Duration::from_millis(config.settings.busy_timeout_ms);
        let pool = connect_readonly(&config.database_url, busy_timeout).await?;
        Ok(Self::new(
            pool,
            &config.settings.poem_table,
            &config.settings.mapping_table,
        ))
    }

    async fn count(&self, sql: &str) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(sql).fetch_one(&self.pool).await?;
        Ok(count.max(0) as u64)
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn count_poems(&self) -> Result<u64> {
        self.count(&format!("SELECT COUNT(*) FROM \"{}\"", self.poem_table))
            .await
    }

    async fn sample_poems(&self, limit: u32) -> Result<Vec<PoemRow>> {
        let sql = format!(
            r#"
            SELECT CAST(id AS TEXT) AS id,
                   CAST(title AS TEXT) AS title,
                   CAST(body AS TEXT) AS body
            FROM "{}"
            LIMIT ?
            "#,
            self.poem_table
        );

        let rows = sqlx::query_as::<_, RawPoemRow>(&sql)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;

        debug!("Sampled {} poem rows (limit {})", rows.len(), limit);
        Ok(rows.into_iter().map(PoemRecord::try_from).collect())
    }

    async fn list_mappings(&self) -> Result<Vec<MappingRow>> {
        let sql = format!(
            r#"
            SELECT CAST(id AS TEXT) AS id,
                   CAST(chapter AS TEXT) AS chapter,
                   CAST(combination AS TEXT) AS combination,
                   CAST(poemTitle AS TEXT) AS poem_title,
                   CAST(universeId AS TEXT) AS universe_id
            FROM "{}"
            "#,
            self.mapping_table
        );

        let rows = sqlx::query_as::<_, RawMappingRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!("Fetched {} mapping rows", rows.len());
        Ok(rows.into_iter().map(MappingRecord::try_from).collect())
    }

    async fn list_poem_titles(&self) -> Result<Vec<String>> {
        let sql = format!(
            "SELECT DISTINCT CAST(title AS TEXT) FROM \"{}\" WHERE title IS NOT NULL",
            self.poem_table
        );
        let titles = sqlx::query_scalar::<_, String>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(titles)
    }

    async fn count_poems_without_body(&self) -> Result<u64> {
        self.count(&format!(
            "SELECT COUNT(*) FROM \"{}\" WHERE body IS NULL",
            self.poem_table
        ))
        .await
    }

    async fn release(&self) {
        if !self.pool.is_closed() {
            self.pool.close().await;
            debug!("Store connection released");
        }
    }
}
