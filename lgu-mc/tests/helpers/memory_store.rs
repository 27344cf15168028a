//! In-memory RecordStore test double
//!
//! Rows are held in their raw (nullable) form and validated on read, the same
//! way the SQLite store does it. Every call to `release` is counted.

use async_trait::async_trait;
use lgu_common::db::{
    MappingRecord, MappingRow, PoemRecord, PoemRow, RawMappingRow, RawPoemRow,
};
use lgu_common::{Error, Result};
use lgu_mc::RecordStore;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Message returned by injected failures
pub const INJECTED_STORE_ERROR: &str = "unable to open database file: lugarden.test.db";

/// Store operation that should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    ListMappings,
    PoemTitles,
    SamplePoems,
    CountPoems,
    CountWithoutBody,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    poems: Vec<RawPoemRow>,
    mappings: Vec<RawMappingRow>,
    fail_at: Option<FailPoint>,
    releases: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mapping(
        mut self,
        id: &str,
        chapter: &str,
        combination: &str,
        poem_title: &str,
        universe_id: &str,
    ) -> Self {
        self.mappings.push(RawMappingRow {
            id: Some(id.to_string()),
            chapter: Some(chapter.to_string()),
            combination: Some(combination.to_string()),
            poem_title: Some(poem_title.to_string()),
            universe_id: Some(universe_id.to_string()),
        });
        self
    }

    pub fn with_raw_mapping(mut self, raw: RawMappingRow) -> Self {
        self.mappings.push(raw);
        self
    }

    pub fn with_poem(mut self, id: &str, title: &str, body: Option<&str>) -> Self {
        self.poems.push(RawPoemRow {
            id: Some(id.to_string()),
            title: Some(title.to_string()),
            body: body.map(str::to_string),
        });
        self
    }

    /// Append another store's rows after this one's
    pub fn merge_mappings(mut self, other: MemoryStore) -> Self {
        self.mappings.extend(other.mappings);
        self.poems.extend(other.poems);
        self
    }

    pub fn failing_at(mut self, point: FailPoint) -> Self {
        self.fail_at = Some(point);
        self
    }

    /// Shared counter of `release` calls; grab it before moving the store
    pub fn release_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.releases)
    }

    fn check(&self, point: FailPoint) -> Result<()> {
        if self.fail_at == Some(point) {
            Err(Error::StoreUnavailable(INJECTED_STORE_ERROR.to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn count_poems(&self) -> Result<u64> {
        self.check(FailPoint::CountPoems)?;
        Ok(self.poems.len() as u64)
    }

    async fn sample_poems(&self, limit: u32) -> Result<Vec<PoemRow>> {
        self.check(FailPoint::SamplePoems)?;
        Ok(self
            .poems
            .iter()
            .take(limit as usize)
            .cloned()
            .map(PoemRecord::try_from)
            .collect())
    }

    async fn list_mappings(&self) -> Result<Vec<MappingRow>> {
        self.check(FailPoint::ListMappings)?;
        Ok(self
            .mappings
            .iter()
            .cloned()
            .map(MappingRecord::try_from)
            .collect())
    }

    async fn list_poem_titles(&self) -> Result<Vec<String>> {
        self.check(FailPoint::PoemTitles)?;
        let mut titles: Vec<String> = self.poems.iter().filter_map(|p| p.title.clone()).collect();
        titles.sort();
        titles.dedup();
        Ok(titles)
    }

    async fn count_poems_without_body(&self) -> Result<u64> {
        self.check(FailPoint::CountWithoutBody)?;
        Ok(self.poems.iter().filter(|p| p.body.is_none()).count() as u64)
    }

    async fn release(&self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}
