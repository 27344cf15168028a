//! Consistency & Stats Reporter
//!
//! Single linear pipeline: fetch mappings, validate, aggregate, sample poems,
//! return a structured [`MappingReport`]. Store failures propagate unchanged;
//! row-level problems become [`Anomaly`] entries.

mod anomalies;
mod poems;
mod render;
mod stats;

pub use anomalies::{find_duplicate_keys, find_orphaned_titles, Anomaly};
pub use poems::{BodyKind, PoemSection, PoemSummary};
pub use render::render_report;
pub use stats::{count_by, count_by_chapter, count_by_universe, total, GroupCount};

use crate::accessor::RecordStore;
use lgu_common::config::CheckSettings;
use lgu_common::db::{MalformedRow, MappingRecord};
use lgu_common::Result;
use serde::Serialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Report shape knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Mapping rows shown in the preview
    pub preview_rows: usize,
    /// Poems sampled
    pub sample_size: u32,
    /// Body characters shown per sampled poem
    pub preview_chars: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            preview_rows: 5,
            sample_size: 3,
            preview_chars: 50,
        }
    }
}

impl From<&CheckSettings> for ReportOptions {
    fn from(settings: &CheckSettings) -> Self {
        Self {
            preview_rows: settings.preview_rows,
            sample_size: settings.sample_size,
            preview_chars: settings.preview_chars,
        }
    }
}

/// One row of the mapping preview
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "row", rename_all = "snake_case")]
pub enum PreviewRow {
    Valid(MappingRecord),
    Malformed(MalformedRow),
}

impl PreviewRow {
    /// Row id, when known
    pub fn id(&self) -> Option<&str> {
        match self {
            PreviewRow::Valid(record) => Some(&record.id),
            PreviewRow::Malformed(row) => row.id.as_deref(),
        }
    }
}

/// Outcome of one mapping check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MappingReport {
    /// Mapping collection is empty; a valid, successful outcome
    NoMappingData,
    Complete(CompleteReport),
}

/// Full report for a non-empty mapping collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompleteReport {
    /// Rows returned by the store, malformed ones included
    pub mapping_rows: usize,
    /// Rows that passed validation; equals the sum of `chapters`
    pub valid_mappings: usize,
    /// First rows in store order, malformed ones included
    pub preview: Vec<PreviewRow>,
    pub chapters: Vec<GroupCount>,
    pub universes: Vec<GroupCount>,
    pub poems: PoemSection,
    pub anomalies: Vec<Anomaly>,
}

impl MappingReport {
    /// Export report to a pretty-printed JSON file
    pub fn export_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Chapter counts, empty when there was no mapping data
    pub fn chapters(&self) -> &[GroupCount] {
        match self {
            MappingReport::NoMappingData => &[],
            MappingReport::Complete(report) => &report.chapters,
        }
    }

    /// Anomalies, empty when there was no mapping data
    pub fn anomalies(&self) -> &[Anomaly] {
        match self {
            MappingReport::NoMappingData => &[],
            MappingReport::Complete(report) => &report.anomalies,
        }
    }
}

/// Build the report from a store the caller owns
pub async fn build_report<S>(store: &S, options: &ReportOptions) -> Result<MappingReport>
where
    S: RecordStore + ?Sized,
{
    let rows = store.list_mappings().await?;
    if rows.is_empty() {
        warn!("No mapping data");
        return Ok(MappingReport::NoMappingData);
    }

    let mapping_rows = rows.len();
    let preview = rows
        .iter()
        .take(options.preview_rows)
        .map(|row| match row {
            Ok(record) => PreviewRow::Valid(record.clone()),
            Err(malformed) => PreviewRow::Malformed(malformed.clone()),
        })
        .collect();

    let mut anomalies = Vec::new();
    let mut records = Vec::with_capacity(mapping_rows);
    for row in rows {
        match row {
            Ok(record) => records.push(record),
            Err(malformed) => {
                warn!("Skipping malformed mapping row {:?}", malformed.id);
                anomalies.push(Anomaly::MalformedRow(malformed));
            }
        }
    }
    info!("{} mapping rows ({} valid)", mapping_rows, records.len());

    let chapters = count_by_chapter(&records);
    let universes = count_by_universe(&records);

    anomalies.extend(find_duplicate_keys(&records));

    let poem_titles: HashSet<String> = store.list_poem_titles().await?.into_iter().collect();
    anomalies.extend(find_orphaned_titles(&records, &poem_titles));

    let poems = build_poem_section(store, options, &mut anomalies).await?;

    if !anomalies.is_empty() {
        warn!("{} anomalies found", anomalies.len());
    }

    Ok(MappingReport::Complete(CompleteReport {
        mapping_rows,
        valid_mappings: records.len(),
        preview,
        chapters,
        universes,
        poems,
        anomalies,
    }))
}

async fn build_poem_section<S>(
    store: &S,
    options: &ReportOptions,
    anomalies: &mut Vec<Anomaly>,
) -> Result<PoemSection>
where
    S: RecordStore + ?Sized,
{
    let sampled = store.sample_poems(options.sample_size).await?;
    let total = store.count_poems().await?;
    let without_body = store.count_poems_without_body().await?;

    let mut sample = Vec::with_capacity(sampled.len());
    for row in sampled {
        match row {
            Ok(poem) => sample.push(PoemSummary::from_record(&poem, options.preview_chars)),
            Err(malformed) => {
                warn!("Skipping malformed poem row {:?}", malformed.id);
                anomalies.push(Anomaly::MalformedRow(malformed));
            }
        }
    }

    Ok(PoemSection {
        total,
        without_body,
        sample,
    })
}

/// Run a check against `store` and release it afterwards, on every path
pub async fn check_with<S>(store: S, options: &ReportOptions) -> Result<MappingReport>
where
    S: RecordStore,
{
    let result = build_report(&store, options).await;
    store.release().await;
    result
}
