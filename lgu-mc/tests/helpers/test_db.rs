//! Baseline database fixtures and test-store provisioning
//!
//! Tests never touch the baseline directly: `provision_test_store` copies it
//! to an isolated file and points DATABASE_URL at the copy.

use anyhow::Result;
use lgu_common::config::DATABASE_URL_ENV;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Poem/mapping layout as produced by the Prisma schema. Columns are left
/// nullable so malformed rows can be seeded.
const SCHEMA: &[&str] = &[
    r#"CREATE TABLE "ZhouPoem" (
        "id" TEXT PRIMARY KEY,
        "title" TEXT,
        "chapter" TEXT,
        "body" TEXT,
        "universeId" TEXT
    )"#,
    r#"CREATE TABLE "ZhouMapping" (
        "id" TEXT PRIMARY KEY,
        "chapter" TEXT,
        "combination" TEXT,
        "poemTitle" TEXT,
        "universeId" TEXT
    )"#,
];

/// Writable baseline database inside its own temporary directory
pub struct BaselineDb {
    pub dir: TempDir,
    pub path: PathBuf,
    pub pool: SqlitePool,
}

impl BaselineDb {
    /// Create an empty baseline with the poem/mapping schema
    pub async fn create() -> Result<Self> {
        let dir = TempDir::new()?;
        let path = dir.path().join("lugarden.db");
        let url = format!("sqlite:{}?mode=rwc", path.display());
        let pool = SqlitePool::connect(&url).await?;

        for statement in SCHEMA {
            sqlx::query(statement).execute(&pool).await?;
        }

        Ok(Self { dir, path, pool })
    }

    /// Close the writer so the file can be copied
    pub async fn seal(&self) {
        self.pool.close().await;
    }
}

pub async fn insert_poem(pool: &SqlitePool, id: &str, title: &str, body: Option<&str>) -> Result<()> {
    sqlx::query(
        r#"INSERT INTO "ZhouPoem" ("id", "title", "chapter", "body", "universeId")
           VALUES (?, ?, NULL, ?, 'universe_zhou_spring_autumn')"#,
    )
    .bind(id)
    .bind(title)
    .bind(body)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn insert_mapping(
    pool: &SqlitePool,
    id: &str,
    chapter: Option<&str>,
    combination: &str,
    poem_title: &str,
) -> Result<()> {
    sqlx::query(
        r#"INSERT INTO "ZhouMapping" ("id", "chapter", "combination", "poemTitle", "universeId")
           VALUES (?, ?, ?, ?, 'universe_zhou_spring_autumn')"#,
    )
    .bind(id)
    .bind(chapter)
    .bind(combination)
    .bind(poem_title)
    .execute(pool)
    .await?;
    Ok(())
}

/// Copy the baseline into `dir` and redirect DATABASE_URL to the copy
///
/// Callers must be `#[serial]`: the environment is process-wide.
pub fn provision_test_store(baseline: &Path, dir: &Path) -> std::io::Result<PathBuf> {
    let test_db = dir.join("lugarden.test.db");
    std::fs::copy(baseline, &test_db)?;
    std::env::set_var(DATABASE_URL_ENV, format!("file:{}", test_db.display()));
    Ok(test_db)
}
