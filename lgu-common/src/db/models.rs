//! Poem and mapping row models
//!
//! Rows are fetched into `Raw*` structs whose columns are all nullable, then
//! validated into the typed records. A row with a NULL required column becomes
//! a [`MalformedRow`] instead of carrying an undefined value forward.

use serde::Serialize;
use std::fmt;

/// Which collection a row came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Poem,
    Mapping,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Poem => write!(f, "poem"),
            RecordKind::Mapping => write!(f, "mapping"),
        }
    }
}

/// Poem entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoemRecord {
    pub id: String,
    /// May be empty
    pub title: String,
    /// None when the store holds NULL; never conflated with ""
    pub body: Option<String>,
}

/// Chapter/combination → poem title mapping inside one universe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingRecord {
    pub id: String,
    pub chapter: String,
    pub combination: String,
    /// Soft reference to `PoemRecord::title`
    pub poem_title: String,
    pub universe_id: String,
}

/// Row missing one or more required fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedRow {
    pub kind: RecordKind,
    /// Row id, when the id column itself was present
    pub id: Option<String>,
    pub missing_fields: Vec<&'static str>,
}

/// A fetched poem row: valid record or malformed
pub type PoemRow = std::result::Result<PoemRecord, MalformedRow>;

/// A fetched mapping row: valid record or malformed
pub type MappingRow = std::result::Result<MappingRecord, MalformedRow>;

/// Poem row as it comes out of the store
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct RawPoemRow {
    pub id: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Mapping row as it comes out of the store
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct RawMappingRow {
    pub id: Option<String>,
    pub chapter: Option<String>,
    pub combination: Option<String>,
    pub poem_title: Option<String>,
    pub universe_id: Option<String>,
}

impl TryFrom<RawPoemRow> for PoemRecord {
    type Error = MalformedRow;

    fn try_from(raw: RawPoemRow) -> std::result::Result<Self, Self::Error> {
        match (raw.id, raw.title) {
            (Some(id), Some(title)) => Ok(PoemRecord {
                id,
                title,
                body: raw.body,
            }),
            (id, title) => {
                let mut missing_fields = Vec::new();
                if id.is_none() {
                    missing_fields.push("id");
                }
                if title.is_none() {
                    missing_fields.push("title");
                }
                Err(MalformedRow {
                    kind: RecordKind::Poem,
                    id,
                    missing_fields,
                })
            }
        }
    }
}

impl TryFrom<RawMappingRow> for MappingRecord {
    type Error = MalformedRow;

    fn try_from(raw: RawMappingRow) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawMappingRow {
                id: Some(id),
                chapter: Some(chapter),
                combination: Some(combination),
                poem_title: Some(poem_title),
                universe_id: Some(universe_id),
            } => Ok(MappingRecord {
                id,
                chapter,
                combination,
                poem_title,
                universe_id,
            }),
            raw => {
                let missing_fields = [
                    ("id", raw.id.is_none()),
                    ("chapter", raw.chapter.is_none()),
                    ("combination", raw.combination.is_none()),
                    ("poemTitle", raw.poem_title.is_none()),
                    ("universeId", raw.universe_id.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, missing)| missing.then_some(name))
                .collect();

                Err(MalformedRow {
                    kind: RecordKind::Mapping,
                    id: raw.id,
                    missing_fields,
                })
            }
        }
    }
}
