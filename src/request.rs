//! Request descriptors handed to a [`Transport`](crate::Transport).

use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::{Result, ScuttleError};
use crate::pagination::PageRequest;

/// HTTP verb of an API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A positional resource argument (an ID, slug, user name or timestamp).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Int(i64),
    Str(String),
}

impl Arg {
    /// Parse a command-line token.
    ///
    /// Tokens written exactly as an integer prints (`42`, `-7`) become
    /// integers. Anything else, including `001`, `+5` and `-0`, stays a string
    /// so it reaches the URL unchanged.
    pub fn parse(token: &str) -> Self {
        match token.parse::<i64>() {
            Ok(n) if n.to_string() == token => Arg::Int(n),
            _ => Arg::Str(token.to_string()),
        }
    }

    /// Returns the integer value, parsing string arguments if they hold one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Arg::Int(n) => Some(*n),
            Arg::Str(s) => s.parse().ok(),
        }
    }

    /// Render the argument as a single URL path segment.
    pub(crate) fn to_path_segment(&self) -> String {
        match self {
            Arg::Int(n) => n.to_string(),
            Arg::Str(s) => urlencoding::encode(s).into_owned(),
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Int(n) => write!(f, "{n}"),
            Arg::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Arg::Int(value)
    }
}

impl From<u64> for Arg {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(n) => Arg::Int(n),
            Err(_) => Arg::Str(value.to_string()),
        }
    }
}

impl From<u32> for Arg {
    fn from(value: u32) -> Self {
        Arg::Int(i64::from(value))
    }
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self {
        Arg::Int(i64::from(value))
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Str(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Str(value)
    }
}

impl From<DateTime<Utc>> for Arg {
    fn from(value: DateTime<Utc>) -> Self {
        Arg::Int(value.timestamp())
    }
}

/// A fully resolved API call: path relative to the versioned endpoint plus
/// optional request data.
///
/// Requests without data are sent as GET; requests carrying data are POSTed
/// with the data form-encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Path relative to the versioned API root (e.g. `page/12/revisions`).
    pub path: String,
    /// Request data, if any.
    pub data: Option<Map<String, Value>>,
}

impl ApiRequest {
    /// Create a data-less request for a path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            data: None,
        }
    }

    /// Attach the fields of a page request as request data.
    pub fn with_page(mut self, page: Option<&PageRequest>) -> Result<Self> {
        if let Some(page) = page {
            let Value::Object(fields) = serde_json::to_value(page)? else {
                return Err(ScuttleError::UnexpectedResponse(
                    "page request did not serialize to an object".to_string(),
                ));
            };
            self.data.get_or_insert_with(Map::new).extend(fields);
        }
        Ok(self)
    }

    /// Attach a single data field.
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data
            .get_or_insert_with(Map::new)
            .insert(key.to_string(), value.into());
        self
    }

    /// The HTTP verb this request is sent with.
    pub fn method(&self) -> HttpMethod {
        if self.data.is_some() {
            HttpMethod::Post
        } else {
            HttpMethod::Get
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::Direction;

    #[test]
    fn test_arg_parse_prefers_integers() {
        assert_eq!(Arg::parse("42"), Arg::Int(42));
        assert_eq!(Arg::parse("scp-001"), Arg::Str("scp-001".to_string()));
    }

    #[test]
    fn test_arg_parse_keeps_non_canonical_integers_verbatim() {
        for token in ["001", "-0", "+5", "00"] {
            let arg = Arg::parse(token);
            assert_eq!(arg, Arg::Str(token.to_string()));
            assert_eq!(arg.to_path_segment(), urlencoding::encode(token));
        }
        assert_eq!(Arg::parse("-7"), Arg::Int(-7));
    }

    #[test]
    fn test_numeric_slug_reaches_path_unchanged() {
        let path = crate::endpoints::Endpoint::PageBySlug
            .path(&[Arg::parse("001")])
            .unwrap();
        assert_eq!(path, "page/slug/001");

        let path = crate::endpoints::Endpoint::WikidotUserByName
            .path(&[Arg::parse("-0")])
            .unwrap();
        assert_eq!(path, "wikidotuser/username/-0");
    }

    #[test]
    fn test_as_int_reads_string_integers() {
        assert_eq!(Arg::parse("0012").as_int(), Some(12));
        assert_eq!(Arg::from("yesterday").as_int(), None);
    }

    #[test]
    fn test_large_u64_ids_do_not_wrap() {
        assert_eq!(Arg::from(42u64), Arg::Int(42));

        let arg = Arg::from(u64::MAX);
        assert_eq!(arg, Arg::Str(u64::MAX.to_string()));
        assert_eq!(arg.to_path_segment(), "18446744073709551615");
    }

    #[test]
    fn test_string_args_are_percent_encoded() {
        let arg = Arg::from("a b/c");
        assert_eq!(arg.to_path_segment(), "a%20b%2Fc");
    }

    #[test]
    fn test_method_follows_data() {
        let request = ApiRequest::new("page");
        assert_eq!(request.method(), HttpMethod::Get);

        let request = request
            .with_page(Some(&PageRequest::default().with_direction(Direction::Descending)))
            .unwrap();
        assert_eq!(request.method(), HttpMethod::Post);
    }

    #[test]
    fn test_with_page_none_keeps_get() {
        let request = ApiRequest::new("page/1/revisions").with_page(None).unwrap();
        assert!(request.data.is_none());
    }

    #[test]
    fn test_datetime_arg_is_unix_timestamp() {
        let when = DateTime::from_timestamp(1_500_000_000, 0).unwrap();
        assert_eq!(Arg::from(when), Arg::Int(1_500_000_000));
    }
}
