//! lgu-mc library - Mapping consistency check
//!
//! Read-only verification of the poem/mapping collections: referential checks,
//! grouped counts and a human-readable report.

pub mod accessor;
pub mod reporter;

pub use accessor::{RecordStore, SqliteRecordStore};
pub use reporter::{build_report, check_with, render_report, MappingReport, ReportOptions};

use lgu_common::config::CheckConfig;
use lgu_common::Result;

/// Open the configured store, run the check, release the connection
pub async fn run_check(config: &CheckConfig) -> Result<MappingReport> {
    let store = SqliteRecordStore::open(config).await?;
    check_with(store, &ReportOptions::from(&config.settings)).await
}
