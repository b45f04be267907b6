//! Mock SCUTTLE API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the SCUTTLE
//! API for integration and end-to-end testing. Unlike wiremock which mocks at
//! the HTTP level per-test, this server keeps state across requests and pages
//! through its records the way the real API does, so whole walks can be
//! exercised.
//!
//! # Example
//!
//! ```ignore
//! use scuttle::mock_server::MockServer;
//! use scuttle::{ApiVersion, PageRequest, Scuttle, ScuttleClient};
//! use std::sync::Arc;
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = ScuttleClient::new(None, server.url(), ApiVersion::V1).unwrap();
//!     let wiki = Scuttle::with_transport("en", Arc::new(client), ApiVersion::V1);
//!
//!     // Server comes with default fixtures
//!     let page = wiki.page_by_slug("main").await.unwrap();
//!     assert_eq!(page["id"], 1);
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures, BASE_TIMESTAMP};
pub use server::MockServer;
pub use state::MockState;
