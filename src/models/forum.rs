//! Forum, thread and post models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A forum (a category of threads).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forum {
    pub id: u64,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A forum thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    pub id: u64,

    #[serde(default)]
    pub forum_id: Option<u64>,

    #[serde(default)]
    pub title: Option<String>,

    /// UNIX timestamp of thread creation.
    #[serde(default)]
    pub created_at: Option<i64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A post in a thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,

    #[serde(default)]
    pub thread_id: Option<u64>,

    /// The post this one replies to, if any.
    #[serde(default)]
    pub parent_id: Option<u64>,

    /// Post body. Only included in verbose pages and single-post lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// UNIX timestamp of posting.
    #[serde(default)]
    pub created_at: Option<i64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Post {
    /// Whether this post starts its thread rather than replying.
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}
