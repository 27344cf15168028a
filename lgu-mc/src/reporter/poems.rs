//! Poem sample summaries

use lgu_common::db::PoemRecord;
use serde::Serialize;
use std::fmt;

/// Whether a poem body is present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    Absent,
    Present,
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyKind::Absent => write!(f, "absent"),
            BodyKind::Present => write!(f, "present"),
        }
    }
}

/// One sampled poem as shown in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoemSummary {
    pub id: String,
    pub title: String,
    pub body: BodyKind,
    /// Body length in characters, 0 when absent
    pub body_length: usize,
    /// First `preview_chars` characters of the body, when present
    pub preview: Option<String>,
}

impl PoemSummary {
    pub fn from_record(poem: &PoemRecord, preview_chars: usize) -> Self {
        let (body, body_length, preview) = match &poem.body {
            Some(text) => (
                BodyKind::Present,
                text.chars().count(),
                Some(text.chars().take(preview_chars).collect()),
            ),
            None => (BodyKind::Absent, 0, None),
        };

        Self {
            id: poem.id.clone(),
            title: poem.title.clone(),
            body,
            body_length,
            preview,
        }
    }
}

/// Poem half of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoemSection {
    /// Total poem rows in the store
    pub total: u64,
    /// Poems whose body is NULL
    pub without_body: u64,
    pub sample: Vec<PoemSummary>,
}
