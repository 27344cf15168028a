//! Anomaly detection
//!
//! Anomalies are reported alongside the statistics and never abort a run.

use lgu_common::db::{MalformedRow, MappingRecord};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A row that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Anomaly {
    /// Required column was NULL
    MalformedRow(MalformedRow),

    /// More than one mapping for the same (chapter, combination) in a universe
    DuplicateKey {
        chapter: String,
        combination: String,
        universe_id: String,
        /// Ids of every row sharing the key, first-seen order
        ids: Vec<String>,
    },

    /// Mapping names a poem title no poem row carries
    OrphanedPoemTitle { mapping_id: String, poem_title: String },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::MalformedRow(row) => write!(
                f,
                "malformed {} row {}: missing {}",
                row.kind,
                row.id.as_deref().unwrap_or("<no id>"),
                row.missing_fields.join(", ")
            ),
            Anomaly::DuplicateKey {
                chapter,
                combination,
                universe_id,
                ids,
            } => write!(
                f,
                "duplicate key ({}, {}) in {}: {} rows [{}]",
                chapter,
                combination,
                universe_id,
                ids.len(),
                ids.join(", ")
            ),
            Anomaly::OrphanedPoemTitle {
                mapping_id,
                poem_title,
            } => write!(
                f,
                "mapping {} references unknown poem title \"{}\"",
                mapping_id, poem_title
            ),
        }
    }
}

/// Report every (chapter, combination, universe) key held by more than one row
pub fn find_duplicate_keys(records: &[MappingRecord]) -> Vec<Anomaly> {
    let mut order: Vec<(&str, &str, &str)> = Vec::new();
    let mut ids: HashMap<(&str, &str, &str), Vec<String>> = HashMap::new();

    for record in records {
        let key = (
            record.chapter.as_str(),
            record.combination.as_str(),
            record.universe_id.as_str(),
        );
        let entry = ids.entry(key).or_insert_with(|| {
            order.push(key);
            Vec::new()
        });
        entry.push(record.id.clone());
    }

    order
        .into_iter()
        .filter_map(|key| {
            let group = ids.remove(&key)?;
            (group.len() > 1).then(|| Anomaly::DuplicateKey {
                chapter: key.0.to_string(),
                combination: key.1.to_string(),
                universe_id: key.2.to_string(),
                ids: group,
            })
        })
        .collect()
}

/// Report mappings whose poem title matches no known poem
pub fn find_orphaned_titles(records: &[MappingRecord], poem_titles: &HashSet<String>) -> Vec<Anomaly> {
    records
        .iter()
        .filter(|r| !poem_titles.contains(&r.poem_title))
        .map(|r| Anomaly::OrphanedPoemTitle {
            mapping_id: r.id.clone(),
            poem_title: r.poem_title.clone(),
        })
        .collect()
}
