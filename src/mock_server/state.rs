//! Mock server state management.
//!
//! Provides the in-memory data store for the mock SCUTTLE API server.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{Forum, Post, Revision, Thread, Wiki, WikiPage};

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access. Ordered maps keep
/// listings in ID order, which is the ascending order pages are served in.
#[derive(Debug, Default)]
pub struct MockState {
    /// Wikis served by the instance. The first one answers `wiki`.
    pub wikis: Vec<Wiki>,

    /// Pages indexed by ID.
    pub pages: BTreeMap<u64, WikiPage>,

    /// Revisions of each page, oldest first, indexed by page ID.
    pub revisions: BTreeMap<u64, Vec<Revision>>,

    /// Forums indexed by ID.
    pub forums: BTreeMap<u64, Forum>,

    /// Threads indexed by ID.
    pub threads: BTreeMap<u64, Thread>,

    /// Posts of each thread, oldest first, indexed by thread ID.
    pub posts: BTreeMap<u64, Vec<Post>>,

    /// Optional authentication token. If set, requests must include this token.
    pub required_token: Option<String>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a wiki to the state.
    pub fn with_wiki(mut self, wiki: Wiki) -> Self {
        self.wikis.push(wiki);
        self
    }

    /// Add a page to the state.
    pub fn with_page(mut self, page: WikiPage) -> Self {
        self.pages.insert(page.id, page);
        self
    }

    /// Add revisions for a page.
    pub fn with_revisions(mut self, page_id: u64, revisions: Vec<Revision>) -> Self {
        self.revisions.entry(page_id).or_default().extend(revisions);
        self
    }

    /// Add a forum to the state.
    pub fn with_forum(mut self, forum: Forum) -> Self {
        self.forums.insert(forum.id, forum);
        self
    }

    /// Add a thread to the state.
    pub fn with_thread(mut self, thread: Thread) -> Self {
        self.threads.insert(thread.id, thread);
        self
    }

    /// Add posts for a thread.
    pub fn with_posts(mut self, thread_id: u64, posts: Vec<Post>) -> Self {
        self.posts.entry(thread_id).or_default().extend(posts);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Get a page by ID.
    pub fn get_page(&self, id: u64) -> Option<&WikiPage> {
        self.pages.get(&id)
    }

    /// Get a page by slug.
    pub fn get_page_by_slug(&self, slug: &str) -> Option<&WikiPage> {
        self.pages.values().find(|p| p.slug == slug)
    }

    /// Get a revision by ID, across all pages.
    pub fn get_revision(&self, id: u64) -> Option<&Revision> {
        self.revisions.values().flatten().find(|r| r.id == id)
    }

    /// Revisions of a page, oldest first.
    pub fn page_revisions(&self, page_id: u64) -> &[Revision] {
        self.revisions.get(&page_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Threads in a forum, optionally only those created at or after `since`.
    pub fn forum_threads(&self, forum_id: u64, since: Option<i64>) -> Vec<Thread> {
        self.threads
            .values()
            .filter(|t| t.forum_id == Some(forum_id))
            .filter(|t| created_since(t.created_at, since))
            .cloned()
            .collect()
    }

    /// Posts in a thread, optionally only those made at or after `since`.
    pub fn thread_posts(&self, thread_id: u64, since: Option<i64>) -> Vec<Post> {
        self.posts
            .get(&thread_id)
            .into_iter()
            .flatten()
            .filter(|p| created_since(p.created_at, since))
            .cloned()
            .collect()
    }

    /// Whether a bearer token is accepted.
    pub fn accepts(&self, token: Option<&str>) -> bool {
        match &self.required_token {
            Some(required) => token == Some(required.as_str()),
            None => true,
        }
    }
}

fn created_since(created_at: Option<i64>, since: Option<i64>) -> bool {
    match (created_at, since) {
        (_, None) => true,
        (Some(at), Some(since)) => at >= since,
        (None, Some(_)) => false,
    }
}
