//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use serde_json::{json, Map};

use crate::{
    Forum, Post, Revision, RevisionMetadata, Thread, Wiki, WikiPage, WikidotRevisionMetadata,
};

/// Timestamp the default scenario's records count up from.
pub const BASE_TIMESTAMP: i64 = 1_600_000_000;

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Wiki and page fixtures
    // =========================================================================

    /// Create a wiki with the given subdomain.
    pub fn wiki(id: u64, subdomain: &str) -> Wiki {
        let mut extra = Map::new();
        extra.insert("name".to_string(), json!(format!("Wiki {subdomain}")));
        Wiki {
            id: Some(id),
            subdomain: subdomain.to_string(),
            extra,
        }
    }

    /// Create a page with Wikidot metadata.
    pub fn page(id: u64, slug: &str) -> WikiPage {
        WikiPage {
            id,
            slug: slug.to_string(),
            wd_page_id: Some(1_000_000 + id),
            metadata: Some(json!({"wikidot_metadata": {"fullname": slug}})),
            extra: Map::new(),
        }
    }

    // =========================================================================
    // Revision fixtures
    // =========================================================================

    /// Create one revision with content.
    pub fn revision(id: u64, page_id: u64, revision_number: u32, timestamp: i64) -> Revision {
        Revision {
            id,
            page_id,
            content: Some(format!("Revision {revision_number} of page {page_id}")),
            metadata: RevisionMetadata {
                wikidot_metadata: WikidotRevisionMetadata {
                    revision_number,
                    timestamp: Some(timestamp),
                    extra: Map::new(),
                },
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }

    /// Create `count` consecutive revisions of a page, IDs from `first_id`.
    pub fn revisions(page_id: u64, first_id: u64, count: u32) -> Vec<Revision> {
        (0..count)
            .map(|n| {
                Self::revision(
                    first_id + u64::from(n),
                    page_id,
                    n,
                    BASE_TIMESTAMP + i64::from(n) * 3600,
                )
            })
            .collect()
    }

    // =========================================================================
    // Forum fixtures
    // =========================================================================

    /// Create a forum.
    pub fn forum(id: u64, title: &str) -> Forum {
        Forum {
            id,
            title: Some(title.to_string()),
            extra: Map::new(),
        }
    }

    /// Create a thread in a forum.
    pub fn thread(id: u64, forum_id: u64, title: &str, created_at: i64) -> Thread {
        Thread {
            id,
            forum_id: Some(forum_id),
            title: Some(title.to_string()),
            created_at: Some(created_at),
            extra: Map::new(),
        }
    }

    /// Create `count` posts in a thread, IDs from `first_id`, one minute
    /// apart. The first post opens the thread and every other post replies
    /// to it.
    pub fn posts(thread_id: u64, first_id: u64, count: u32) -> Vec<Post> {
        (0..count)
            .map(|n| {
                let id = first_id + u64::from(n);
                Post {
                    id,
                    thread_id: Some(thread_id),
                    parent_id: (n > 0).then_some(first_id),
                    content: Some(format!("Post {id}")),
                    created_at: Some(BASE_TIMESTAMP + i64::from(n) * 60),
                    extra: Map::new(),
                }
            })
            .collect()
    }

    // =========================================================================
    // Scenario Builders
    // =========================================================================

    /// The data every default mock server starts with.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// Default test scenario.
///
/// - wiki `en`
/// - page 1 `main` with 45 revisions (IDs 1000..1045)
/// - page 2 `scp-173` with 40 revisions (IDs 2000..2040)
/// - forum 1 with threads 1 to 3, created a day apart
/// - thread 1 with 45 posts (IDs 1..=45), thread 2 with 2 posts
pub struct DefaultScenario {
    pub wikis: Vec<Wiki>,
    pub pages: Vec<WikiPage>,
    pub revisions: Vec<(u64, Vec<Revision>)>,
    pub forums: Vec<Forum>,
    pub threads: Vec<Thread>,
    pub posts: Vec<(u64, Vec<Post>)>,
}

impl DefaultScenario {
    pub fn new() -> Self {
        Self {
            wikis: vec![Fixtures::wiki(1, "en")],
            pages: vec![Fixtures::page(1, "main"), Fixtures::page(2, "scp-173")],
            revisions: vec![
                (1, Fixtures::revisions(1, 1000, 45)),
                (2, Fixtures::revisions(2, 2000, 40)),
            ],
            forums: vec![Fixtures::forum(1, "General Discussion")],
            threads: (1..=3)
                .map(|id| {
                    Fixtures::thread(
                        id,
                        1,
                        &format!("Thread {id}"),
                        BASE_TIMESTAMP + (id as i64) * 86_400,
                    )
                })
                .collect(),
            posts: vec![(1, Fixtures::posts(1, 1, 45)), (2, Fixtures::posts(2, 100, 2))],
        }
    }
}

impl Default for DefaultScenario {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revisions_are_numbered_from_zero() {
        let revisions = Fixtures::revisions(7, 500, 3);

        assert_eq!(revisions.len(), 3);
        assert_eq!(revisions[0].id, 500);
        assert_eq!(revisions[2].revision_number(), 2);
        assert!(revisions.iter().all(|r| r.page_id == 7 && r.has_content()));
    }

    #[test]
    fn test_posts_reply_to_opening_post() {
        let posts = Fixtures::posts(1, 10, 3);

        assert!(posts[0].is_top_level());
        assert_eq!(posts[1].parent_id, Some(10));
        assert_eq!(posts[2].created_at, Some(BASE_TIMESTAMP + 120));
    }

    #[test]
    fn test_default_scenario() {
        let scenario = Fixtures::default_scenario();

        assert_eq!(scenario.wikis[0].subdomain, "en");
        assert_eq!(scenario.revisions[0].1.len(), 45);
        assert_eq!(scenario.posts[0].1.len(), 45);
        assert_eq!(scenario.threads.len(), 3);
    }
}
