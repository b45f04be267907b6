//! Revision model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

/// A page revision.
///
/// Default (non-verbose) revision listings carry metadata only; verbose
/// pages and full-revision lookups also include `content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revision {
    /// SCUTTLE revision ID.
    pub id: u64,

    /// The page this revision belongs to.
    pub page_id: u64,

    /// Revision source, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Revision metadata.
    #[serde(default)]
    pub metadata: RevisionMetadata,

    /// Any other fields the API returned.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Metadata attached to a revision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevisionMetadata {
    #[serde(default)]
    pub wikidot_metadata: WikidotRevisionMetadata,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Revision metadata as scraped from Wikidot.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WikidotRevisionMetadata {
    /// Zero-based revision number. Wikidot reports it as a string.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub revision_number: u32,

    /// UNIX timestamp of the revision.
    #[serde(default)]
    pub timestamp: Option<i64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Revision {
    /// Zero-based position of this revision in the page history.
    pub fn revision_number(&self) -> u32 {
        self.metadata.wikidot_metadata.revision_number
    }

    /// When the revision was made, if known.
    pub fn timestamp(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.metadata
            .wikidot_metadata
            .timestamp
            .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0))
    }

    /// Whether the revision content was included.
    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }
}
