//! Wiki model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A wiki hosted by the SCUTTLE instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wiki {
    /// Numeric wiki ID.
    #[serde(default)]
    pub id: Option<u64>,

    /// The wiki's subdomain (e.g. "en").
    pub subdomain: String,

    /// Any other fields the API returned.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
