//! Read-only store connection
//!
//! The store location always arrives as a URL from the environment. Prisma-style
//! `file:` URLs, sqlx `sqlite:` URLs and bare paths are all accepted.

use crate::{Error, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Time allowed to obtain the single pooled connection
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Extract the database file path from a store URL
///
/// Query parameters are dropped; read-only mode is always applied by
/// [`connect_readonly`].
pub fn database_path_from_url(url: &str) -> PathBuf {
    let trimmed = url.trim();
    let rest = trimmed
        .strip_prefix("sqlite://")
        .or_else(|| trimmed.strip_prefix("sqlite:"))
        .or_else(|| trimmed.strip_prefix("file:"))
        .unwrap_or(trimmed);
    let path = rest.split('?').next().unwrap_or(rest);
    PathBuf::from(path)
}

/// Open a single-connection read-only pool
///
/// A missing database file is reported as `StoreUnavailable` rather than
/// letting SQLite create an empty one.
pub async fn connect_readonly(database_url: &str, busy_timeout: Duration) -> Result<SqlitePool> {
    let db_path = database_path_from_url(database_url);
    if !db_path.exists() {
        return Err(Error::StoreUnavailable(format!(
            "Database not found: {}",
            db_path.display()
        )));
    }

    debug!(
        "Opening {} read-only (busy_timeout={}ms)",
        db_path.display(),
        busy_timeout.as_millis()
    );

    let options = SqliteConnectOptions::new()
        .filename(&db_path)
        .read_only(true)
        .busy_timeout(busy_timeout);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await?;

    info!("Connected to {} (read-only)", db_path.display());
    Ok(pool)
}
