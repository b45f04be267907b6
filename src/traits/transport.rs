//! Transport trait for sending resolved API requests.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::request::ApiRequest;

/// Send an [`ApiRequest`] to the API and return the parsed JSON body.
///
/// [`ScuttleClient`](crate::ScuttleClient) is the HTTP implementation. The
/// accessor and walk machinery only ever sees this trait, so tests can swap
/// in an in-memory transport.
///
/// Implementations handle authentication and timeouts. They must not retry:
/// a failed request is reported to the caller as-is.
///
/// # Example
///
/// ```ignore
/// use scuttle::{ApiRequest, Transport};
///
/// let client = scuttle::ScuttleClient::from_env("en")?;
/// let wikis = client.send(ApiRequest::new("wikis")).await?;
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and wait for the full response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent, the API answers with
    /// a non-success status, or the body is not JSON.
    async fn send(&self, request: ApiRequest) -> Result<Value>;
}
