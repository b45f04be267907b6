//! Mock SCUTTLE API server.
//!
//! Provides an axum-based HTTP server that simulates the SCUTTLE API.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A mock SCUTTLE API server for testing.
///
/// The server runs in the background and can be used to test the SCUTTLE
/// client against a realistic API implementation. Routes live under
/// `/api/v1/`, so [`MockServer::url`] is passed to clients as a server root.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating a `ScuttleClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        let scenario = Fixtures::default_scenario();
        Self::state_from_scenario(scenario)
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        state.wikis = scenario.wikis;

        for page in scenario.pages {
            state.pages.insert(page.id, page);
        }

        for (page_id, revisions) in scenario.revisions {
            state.revisions.insert(page_id, revisions);
        }

        for forum in scenario.forums {
            state.forums.insert(forum.id, forum);
        }

        for thread in scenario.threads {
            state.threads.insert(thread.id, thread);
        }

        for (thread_id, posts) in scenario.posts {
            state.posts.insert(thread_id, posts);
        }

        state
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        let api = Router::new()
            // Wiki routes
            .route("/wikis", get(handlers::list_wikis))
            .route("/wiki", get(handlers::get_wiki))
            // Page routes
            .route("/page", get(handlers::list_pages))
            .route("/page/:id", get(handlers::get_page))
            .route("/page/slug/:slug", get(handlers::get_page_by_slug))
            .route(
                "/page/:id/revisions",
                get(handlers::list_page_revisions).post(handlers::page_revisions_page),
            )
            // Revision routes
            .route("/revision/:id", get(handlers::get_revision))
            .route("/revision/:id/full", get(handlers::get_full_revision))
            // Forum routes
            .route("/forum", get(handlers::list_forums))
            .route("/forum/:id", get(handlers::get_forum))
            .route("/forum/:id/threads", get(handlers::list_forum_threads))
            .route("/forum/:id/since", post(handlers::forum_threads_since))
            // Thread routes
            .route("/thread/:id", get(handlers::get_thread))
            .route(
                "/thread/:id/posts",
                get(handlers::list_thread_posts).post(handlers::thread_posts_page),
            )
            .route("/thread/:id/since", post(handlers::thread_posts_since))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                handlers::require_token,
            ));

        Router::new()
            .nest("/api/v1", api)
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ApiVersion, PageRequest, Scuttle, ScuttleClient, ScuttleError};

    fn connect(server: &MockServer, token: Option<&str>) -> Scuttle {
        let client = ScuttleClient::new(token, server.url(), ApiVersion::V1).unwrap();
        Scuttle::with_transport("en", Arc::new(client), ApiVersion::V1)
    }

    #[tokio::test]
    async fn test_server_starts_and_responds() {
        let server = MockServer::start().await;

        // Server should be accessible
        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/health", server.url()))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_get_page_with_scuttle_client() {
        let server = MockServer::start().await;
        let wiki = connect(&server, Some("test-token"));

        let page = wiki.page_by_slug("main").await.expect("Failed to get page");

        assert_eq!(page["id"], 1);
        assert_eq!(page["slug"], "main");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_verbose_page_with_scuttle_client() {
        let server = MockServer::start().await;
        let wiki = connect(&server, None);

        let page = wiki
            .page_revisions()
            .call_verbose(&[1u64.into()], &PageRequest::default().with_offset(40))
            .await
            .expect("Failed to fetch revisions");

        assert_eq!(page.len(), 5);
        assert!(page.items.iter().all(|r| r.get("content").is_some()));

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_empty_server() {
        let server = MockServer::start_empty().await;
        let wiki = connect(&server, None);

        let result = wiki.page_by_id(1).await;

        assert!(matches!(
            result,
            Err(ScuttleError::ApiError {
                status_code: Some(404),
                ..
            })
        ));

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_custom_state() {
        let state = MockState::new().with_page(Fixtures::page(9, "my-page"));

        let server = MockServer::with_state(state).await;
        let wiki = connect(&server, None);

        let page = wiki.page_by_id(9).await.expect("Failed to get page");

        assert_eq!(page["slug"], "my-page");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_required_token() {
        let state = MockState::new()
            .with_page(Fixtures::page(1, "main"))
            .with_required_token("secret");
        let server = MockServer::with_state(state).await;

        let err = connect(&server, Some("wrong")).page_by_id(1).await.unwrap_err();
        assert!(matches!(
            err,
            ScuttleError::ApiError {
                status_code: Some(401),
                ..
            }
        ));

        let page = connect(&server, Some("secret")).page_by_id(1).await.unwrap();
        assert_eq!(page["id"], 1);

        server.shutdown().await;
    }
}
