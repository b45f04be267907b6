//! Page model and per-page records (votes, tags, files).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

/// A wiki page.
///
/// Page listings only carry `id`, `slug` and `wd_page_id`; single-page
/// lookups add `metadata` and more.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WikiPage {
    /// SCUTTLE page ID.
    pub id: u64,

    /// Page slug (e.g. "scp-001").
    pub slug: String,

    /// The page's ID on Wikidot.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub wd_page_id: Option<u64>,

    /// Page metadata, including Wikidot metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    /// Any other fields the API returned.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WikiPage {
    /// The page's full name on Wikidot, when metadata is present.
    pub fn fullname(&self) -> Option<&str> {
        self.metadata
            .as_ref()?
            .get("wikidot_metadata")?
            .get("fullname")?
            .as_str()
    }
}

/// A vote on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    /// +1 or -1.
    pub vote: i32,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A tag, either on a page or in the wiki's tag list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A file attached to a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageFile {
    /// Storage path of the file.
    pub path: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_listing_entry() {
        let page: WikiPage = serde_json::from_value(json!({
            "id": 12,
            "slug": "main",
            "wd_page_id": "1000"
        }))
        .unwrap();

        assert_eq!(page.id, 12);
        assert_eq!(page.wd_page_id, Some(1000));
        assert!(page.fullname().is_none());
    }

    #[test]
    fn test_page_fullname_from_metadata() {
        let page: WikiPage = serde_json::from_value(json!({
            "id": 1,
            "slug": "scp-001",
            "metadata": {"wikidot_metadata": {"fullname": "scp-001"}}
        }))
        .unwrap();

        assert_eq!(page.fullname(), Some("scp-001"));
    }
}
