//! SCUTTLE HTTP client.
//!
//! Low-level transport that handles authentication and raw requests.
//! Resource methods live on the versioned API types and reach the network
//! only through the [`Transport`] trait implemented here.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use url::Url;

use crate::error::{Result, ScuttleError};
use crate::request::{ApiRequest, HttpMethod};
use crate::traits::Transport;
use crate::versions::ApiVersion;

const USER_AGENT: &str = concat!("scuttle-rs/", env!("CARGO_PKG_VERSION"));

/// Host every wiki's API is served from, below its own subdomain.
const SCUTTLE_HOST: &str = "scuttle.bluesoul.net";

/// Low-level SCUTTLE API client.
///
/// Sends requests to one versioned API root, e.g.
/// `https://en.scuttle.bluesoul.net/api/v1/`. Requests without data are sent
/// as GET; requests with data are POSTed form-encoded. The API key, when
/// present, is sent as a bearer token.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use scuttle::{ApiVersion, ScuttleClient};
///
/// # fn example() -> scuttle::Result<()> {
/// // Create from environment variables
/// let client = ScuttleClient::from_env("en")?;
///
/// // Or configure manually
/// let client = ScuttleClient::for_wiki("en", Some("your-api-key"), ApiVersion::V1)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ScuttleClient {
    http: Client,
    base_url: Arc<Url>,
    token: Option<String>,
    version: ApiVersion,
}

impl std::fmt::Debug for ScuttleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScuttleClient")
            .field("base_url", &self.base_url.as_str())
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl ScuttleClient {
    /// Create a client from environment variables.
    ///
    /// Uses `SCUTTLE_API_KEY` for authentication when set (requests are
    /// anonymous otherwise), optionally `SCUTTLE_API_VERSION` (defaults to
    /// the latest version) and optionally `SCUTTLE_API_URL` to replace
    /// `https://{domain}.scuttle.bluesoul.net`.
    ///
    /// # Errors
    ///
    /// Returns an error if the version is not supported or the URL is
    /// invalid.
    pub fn from_env(domain: &str) -> Result<Self> {
        Self::from_env_with_version(domain, None)
    }

    /// Like [`ScuttleClient::from_env`], with an explicit version taking
    /// precedence over `SCUTTLE_API_VERSION`.
    ///
    /// # Errors
    ///
    /// Returns an error if the version is not supported or the URL is
    /// invalid.
    pub fn from_env_with_version(domain: &str, version: Option<ApiVersion>) -> Result<Self> {
        let token = env::var("SCUTTLE_API_KEY").ok();

        let version = match (version, env::var("SCUTTLE_API_VERSION")) {
            (Some(v), _) => v,
            (None, Ok(v)) => v.parse()?,
            (None, Err(_)) => ApiVersion::latest(),
        };

        let base_url = match env::var("SCUTTLE_API_URL") {
            Ok(url) => url,
            Err(_) => wiki_url(domain)?,
        };

        Self::new(token.as_deref(), &base_url, version)
    }

    /// Create a client for a wiki hosted on the public SCUTTLE instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain is empty or does not form a valid URL.
    pub fn for_wiki(domain: &str, token: Option<&str>, version: ApiVersion) -> Result<Self> {
        Self::new(token, &wiki_url(domain)?, version)
    }

    /// Create a new client against an arbitrary SCUTTLE server.
    ///
    /// # Arguments
    ///
    /// * `token` - SCUTTLE API key, if any
    /// * `base_url` - Server root (e.g., `https://en.scuttle.bluesoul.net`);
    ///   `api/v{n}/` is appended
    /// * `version` - API version to talk to
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(token: Option<&str>, base_url: &str, version: ApiVersion) -> Result<Self> {
        let base_url = Url::parse(&format!(
            "{}/api/v{}/",
            base_url.trim_end_matches('/'),
            version.number()
        ))?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(ScuttleError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: token.map(str::to_string),
            version,
        })
    }

    /// Get the versioned API root URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the API version this client talks to.
    pub fn version(&self) -> ApiVersion {
        self.version
    }

    /// Send a request and return the raw response.
    #[tracing::instrument(skip(self, request), fields(path = %request.path, method = ?request.method()))]
    pub async fn execute(&self, request: &ApiRequest) -> Result<Response> {
        let url = self.base_url.join(&request.path)?;

        let builder = match (request.method(), &request.data) {
            (HttpMethod::Post, Some(data)) => self.http.post(url).form(data),
            _ => self.http.get(url),
        };
        let builder = match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder.send().await.map_err(ScuttleError::HttpError)?;

        Self::check_response(response).await
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // Handle rate limiting
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(ScuttleError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let message = Self::extract_error_message(response, status).await;
        tracing::debug!(status = status.as_u16(), %message, "request failed");
        Err(ScuttleError::ApiError {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        // Try to parse as JSON and extract message field
        if let Ok(json) = serde_json::from_str::<Value>(&body) {
            if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
            if let Some(err) = json.get("error").and_then(|m| m.as_str()) {
                return err.to_string();
            }
        }

        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    }
}

#[async_trait]
impl Transport for ScuttleClient {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let response = self.execute(&request).await?;
        response.json().await.map_err(ScuttleError::HttpError)
    }
}

/// Server root of a wiki on the public SCUTTLE instance.
fn wiki_url(domain: &str) -> Result<String> {
    let domain = domain.trim();
    if domain.is_empty() {
        return Err(ScuttleError::ConfigMissing("wiki domain is empty".to_string()));
    }
    Ok(format!("https://{domain}.{SCUTTLE_HOST}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = ScuttleClient::for_wiki("en", Some("test-token"), ApiVersion::V1).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("ScuttleClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_wiki_base_url() {
        let client = ScuttleClient::for_wiki("en", None, ApiVersion::V1).unwrap();
        assert_eq!(
            client.base_url().as_str(),
            "https://en.scuttle.bluesoul.net/api/v1/"
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = ScuttleClient::new(None, "http://localhost:8080", ApiVersion::V1).unwrap();
        let client2 = ScuttleClient::new(None, "http://localhost:8080/", ApiVersion::V1).unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_empty_domain_is_rejected() {
        let err = ScuttleClient::for_wiki("  ", None, ApiVersion::V1).unwrap_err();
        assert!(matches!(err, ScuttleError::ConfigMissing(_)));
    }
}
