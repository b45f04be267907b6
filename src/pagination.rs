//! Pagination types for SCUTTLE API requests and responses.
//!
//! Verbose SCUTTLE endpoints page with `limit`, `offset` and `direction`
//! request fields. A [`PageRequest`] carries those fields and a
//! [`PageResult`] holds the records one request returned. Neither knows the
//! total record count: a page shorter than its limit is the only signal that
//! the data has run out.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, ScuttleError};

/// Default number of records per verbose page.
pub const DEFAULT_LIMIT: u32 = 20;

/// Sort direction of a verbose page request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Oldest first.
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    /// Newest first.
    #[serde(rename = "desc")]
    Descending,
}

impl Direction {
    /// The wire value of this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ScuttleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Direction::Ascending),
            "desc" | "descending" => Ok(Direction::Descending),
            other => Err(ScuttleError::InvalidPaginationParameter(format!(
                "direction must be 'asc' or 'desc', got '{other}'"
            ))),
        }
    }
}

/// Paging fields sent with a verbose request.
///
/// Serializes to exactly `limit`, `offset` and `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Maximum number of records to return. Must be positive.
    pub limit: u32,
    /// Number of records to skip.
    pub offset: u32,
    /// Sort direction.
    pub direction: Direction,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            direction: Direction::Ascending,
        }
    }
}

impl PageRequest {
    /// Build a page request from untyped values, as given on a command line.
    ///
    /// # Errors
    ///
    /// Returns [`ScuttleError::InvalidPaginationParameter`] if `limit` is not
    /// a positive 32-bit integer, `offset` is negative or too large, or
    /// `direction` is neither ascending nor descending.
    pub fn parse(limit: i64, offset: i64, direction: &str) -> Result<Self> {
        let limit = u32::try_from(limit).map_err(|_| {
            ScuttleError::InvalidPaginationParameter(format!(
                "limit must be a positive integer, got {limit}"
            ))
        })?;
        let offset = u32::try_from(offset).map_err(|_| {
            ScuttleError::InvalidPaginationParameter(format!(
                "offset must be a non-negative integer, got {offset}"
            ))
        })?;
        let request = Self {
            limit,
            offset,
            direction: direction.parse()?,
        };
        request.validate()?;
        Ok(request)
    }

    /// Set the page size.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set the starting offset.
    #[must_use]
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Set the sort direction.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Check the invariants of a page request.
    ///
    /// # Errors
    ///
    /// Returns [`ScuttleError::InvalidPaginationParameter`] if `limit` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 {
            return Err(ScuttleError::InvalidPaginationParameter(
                "limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// One page of records returned by a verbose call.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct PageResult<T = Value> {
    /// The records on this page, in the order the API returned them.
    pub items: Vec<T>,
    /// The request that produced this page.
    pub request: PageRequest,
}

impl PageResult<Value> {
    /// Wrap a verbose response body, which must be a JSON array.
    pub(crate) fn from_response(body: Value, request: PageRequest) -> Result<Self> {
        match body {
            Value::Array(items) => Ok(Self { items, request }),
            other => Err(ScuttleError::UnexpectedResponse(format!(
                "expected a JSON array of records, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Deserialize every record into a typed model.
    ///
    /// # Errors
    ///
    /// Returns an error if any record does not match `U`.
    pub fn decode<U: DeserializeOwned>(&self) -> Result<PageResult<U>> {
        let items = self
            .items
            .iter()
            .cloned()
            .map(serde_json::from_value)
            .collect::<core::result::Result<Vec<U>, _>>()?;
        Ok(PageResult {
            items,
            request: self.request,
        })
    }
}

impl<T> PageResult<T> {
    /// Whether a walk should request another page after this one.
    ///
    /// A full page may be followed by more records; a short page is the end.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.items.len() >= self.request.limit as usize
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            request: self.request,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for PageResult<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a PageResult<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_request() {
        let request = PageRequest::default();
        assert_eq!(request.limit, 20);
        assert_eq!(request.offset, 0);
        assert_eq!(request.direction, Direction::Ascending);
    }

    #[test]
    fn test_request_serializes_exactly_paging_fields() {
        let request = PageRequest::default()
            .with_limit(100)
            .with_offset(10)
            .with_direction(Direction::Descending);

        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({"limit": 100, "offset": 10, "direction": "desc"})
        );
    }

    #[test]
    fn test_parse_rejects_negative_limit() {
        let err = PageRequest::parse(-1, 0, "asc").unwrap_err();
        assert!(matches!(err, ScuttleError::InvalidPaginationParameter(_)));
    }

    #[test]
    fn test_parse_rejects_zero_limit_and_negative_offset() {
        assert!(PageRequest::parse(0, 0, "asc").is_err());
        assert!(PageRequest::parse(20, -5, "asc").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_direction() {
        let err = PageRequest::parse(20, 0, "sideways").unwrap_err();
        assert!(err.to_string().contains("sideways"));
    }

    #[test]
    fn test_direction_accepts_long_names() {
        assert_eq!("DESCENDING".parse::<Direction>().unwrap(), Direction::Descending);
        assert_eq!("asc".parse::<Direction>().unwrap(), Direction::Ascending);
    }

    #[test]
    fn test_has_more_only_for_full_pages() {
        let request = PageRequest::default().with_limit(3);

        let full = PageResult::from_response(json!([1, 2, 3]), request).unwrap();
        assert!(full.has_more());

        let short = PageResult::from_response(json!([1]), request).unwrap();
        assert!(!short.has_more());

        let empty = PageResult::from_response(json!([]), request).unwrap();
        assert!(!empty.has_more());
    }

    #[test]
    fn test_from_response_requires_array() {
        let err = PageResult::from_response(json!({"error": "nope"}), PageRequest::default())
            .unwrap_err();
        assert!(matches!(err, ScuttleError::UnexpectedResponse(_)));
    }

    #[test]
    fn test_page_decode_and_map() {
        #[derive(Deserialize)]
        struct Row {
            id: u64,
        }

        let page =
            PageResult::from_response(json!([{"id": 1}, {"id": 2}]), PageRequest::default())
                .unwrap();
        let ids: Vec<u64> = page.decode::<Row>().unwrap().map(|r| r.id).items;
        assert_eq!(ids, vec![1, 2]);
    }
}
