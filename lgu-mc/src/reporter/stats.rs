//! Grouped mapping counts
//!
//! Groups keep the order in which each key was first seen, so rendering is
//! deterministic for a given input order.

use lgu_common::db::MappingRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of mapping rows sharing one key value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    pub key: String,
    pub count: usize,
}

/// Count records per key, first-seen order. Keys compare as exact strings.
pub fn count_by<'a, I, F>(records: I, key: F) -> Vec<GroupCount>
where
    I: IntoIterator<Item = &'a MappingRecord>,
    F: Fn(&'a MappingRecord) -> &'a str,
{
    let mut groups: Vec<GroupCount> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for record in records {
        let k = key(record);
        match index.get(k) {
            Some(&i) => groups[i].count += 1,
            None => {
                index.insert(k, groups.len());
                groups.push(GroupCount {
                    key: k.to_string(),
                    count: 1,
                });
            }
        }
    }

    groups
}

/// Mapping rows per chapter
pub fn count_by_chapter(records: &[MappingRecord]) -> Vec<GroupCount> {
    count_by(records, |r| r.chapter.as_str())
}

/// Mapping rows per universe
pub fn count_by_universe(records: &[MappingRecord]) -> Vec<GroupCount> {
    count_by(records, |r| r.universe_id.as_str())
}

/// Sum of all group counts
pub fn total(groups: &[GroupCount]) -> usize {
    groups.iter().map(|g| g.count).sum()
}
