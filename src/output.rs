//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::endpoints::Endpoint;
use crate::models::{Revision, Wiki, WikiPage};
use crate::pagination::PageResult;

/// Trait for human-readable key-value output.
///
/// Implemented by records and pages to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for Wiki {
    fn pretty_print(&self) -> String {
        let header = format!("Wiki: {}", self.subdomain);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider];
        if let Some(id) = self.id {
            lines.push(format!("ID:             {}", id));
        }
        if let Some(name) = self.extra.get("name").and_then(Value::as_str) {
            lines.push(format!("Name:           {}", name));
        }
        lines.join("\n")
    }
}

impl PrettyPrint for WikiPage {
    fn pretty_print(&self) -> String {
        let header = format!("Page: {}", self.slug);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider, format!("ID:             {}", self.id)];

        if let Some(wd_page_id) = self.wd_page_id {
            lines.push(format!("Wikidot ID:     {}", wd_page_id));
        }
        if let Some(fullname) = self.fullname() {
            lines.push(format!("Full name:      {}", fullname));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Revision {
    fn pretty_print(&self) -> String {
        let header = format!("Revision #{}", self.id);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("Page:           {}", self.page_id),
            format!("Number:         {}", self.revision_number()),
        ];

        if let Some(when) = self.timestamp() {
            lines.push(format!("Made:           {}", when.format("%Y-%m-%d %H:%M:%S UTC")));
        }

        if let Some(ref content) = self.content {
            lines.push(format!("Content:        {} bytes", content.len()));
        }

        lines.join("\n")
    }
}

impl<T> PrettyPrint for PageResult<T> {
    fn pretty_print(&self) -> String {
        let end = if self.has_more() {
            "more may follow"
        } else {
            "end"
        };
        format!(
            "Offset {} ({} of {} records, {}; {})",
            self.request.offset,
            self.len(),
            self.request.limit,
            self.request.direction,
            end
        )
    }
}

/// Human-readable form of a single-record response, for the resources with
/// a typed model. Returns `None` for other resources or records that do not
/// decode.
pub fn pretty_record(endpoint: Endpoint, body: &Value) -> Option<String> {
    fn decode<T: DeserializeOwned + PrettyPrint>(body: &Value) -> Option<String> {
        serde_json::from_value::<T>(body.clone())
            .ok()
            .map(|record| record.pretty_print())
    }

    match endpoint {
        Endpoint::Wiki => decode::<Wiki>(body),
        Endpoint::PageById | Endpoint::PageBySlug => decode::<WikiPage>(body),
        Endpoint::Revision | Endpoint::FullRevision => decode::<Revision>(body),
        _ => None,
    }
}

/// One-line label for an opaque record: the first identifying field found.
pub fn record_label(record: &Value) -> String {
    ["slug", "title", "name", "username", "subdomain", "path"]
        .iter()
        .find_map(|key| record.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_default()
}
