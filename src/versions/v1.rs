//! Version 1 of the SCUTTLE API.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::accessor::{FetchFn, PaginatedMethod};
use crate::endpoints::{Endpoint, Paging};
use crate::error::{Result, ScuttleError};
use crate::pagination::PageRequest;
use crate::request::{ApiRequest, Arg};
use crate::traits::{Transport, WikiApi};

use super::ApiVersion;

/// SCUTTLE API version 1.
pub struct V1 {
    transport: Arc<dyn Transport>,
    pages_since: PaginatedMethod,
    page_revisions: PaginatedMethod,
    forum_threads_since: PaginatedMethod,
    thread_posts: PaginatedMethod,
    thread_posts_since: PaginatedMethod,
    wikidot_user_pages: PaginatedMethod,
    wikidot_user_posts: PaginatedMethod,
    wikidot_user_revisions: PaginatedMethod,
}

impl std::fmt::Debug for V1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("V1").finish_non_exhaustive()
    }
}

impl V1 {
    /// Bind every v1 resource to a transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let bind = |endpoint: Endpoint, fetch: FetchFn| {
            PaginatedMethod::new(
                endpoint.name(),
                fetch,
                endpoint.paging() == Paging::VerboseOnlySince,
                transport.clone(),
            )
        };

        Self {
            pages_since: bind(Endpoint::PagesSince, pages_since),
            page_revisions: bind(Endpoint::PageRevisions, page_revisions),
            forum_threads_since: bind(Endpoint::ForumThreadsSince, forum_threads_since),
            thread_posts: bind(Endpoint::ThreadPosts, thread_posts),
            thread_posts_since: bind(Endpoint::ThreadPostsSince, thread_posts_since),
            wikidot_user_pages: bind(Endpoint::WikidotUserPages, wikidot_user_pages),
            wikidot_user_posts: bind(Endpoint::WikidotUserPosts, wikidot_user_posts),
            wikidot_user_revisions: bind(Endpoint::WikidotUserRevisions, wikidot_user_revisions),
            transport,
        }
    }

    async fn get(&self, endpoint: Endpoint, args: &[Arg]) -> Result<Value> {
        let request = ApiRequest::new(endpoint.path(args)?);
        self.transport.send(request).await
    }
}

// Request builders for the paginated resources.

fn paged(endpoint: Endpoint, args: &[Arg], page: Option<&PageRequest>) -> Result<ApiRequest> {
    ApiRequest::new(endpoint.path(args)?).with_page(page)
}

/// The trailing argument is a UNIX timestamp sent as request data.
fn since(endpoint: Endpoint, args: &[Arg], page: Option<&PageRequest>) -> Result<ApiRequest> {
    let Some((since, path_args)) = args.split_last() else {
        return Err(ScuttleError::InvalidArgument(format!(
            "{} takes {} argument(s), got 0",
            endpoint.name(),
            endpoint.arity()
        )));
    };
    let timestamp = since.as_int().ok_or_else(|| {
        ScuttleError::InvalidArgument("`since` must be a UNIX timestamp".to_string())
    })?;

    ApiRequest::new(endpoint.path(path_args)?)
        .with_field("timestamp", timestamp)
        .with_page(page)
}

fn pages_since(args: &[Arg], page: Option<&PageRequest>) -> Result<ApiRequest> {
    paged(Endpoint::PagesSince, args, page)
}

fn page_revisions(args: &[Arg], page: Option<&PageRequest>) -> Result<ApiRequest> {
    paged(Endpoint::PageRevisions, args, page)
}

fn forum_threads_since(args: &[Arg], page: Option<&PageRequest>) -> Result<ApiRequest> {
    since(Endpoint::ForumThreadsSince, args, page)
}

fn thread_posts(args: &[Arg], page: Option<&PageRequest>) -> Result<ApiRequest> {
    paged(Endpoint::ThreadPosts, args, page)
}

fn thread_posts_since(args: &[Arg], page: Option<&PageRequest>) -> Result<ApiRequest> {
    since(Endpoint::ThreadPostsSince, args, page)
}

fn wikidot_user_pages(args: &[Arg], page: Option<&PageRequest>) -> Result<ApiRequest> {
    paged(Endpoint::WikidotUserPages, args, page)
}

fn wikidot_user_posts(args: &[Arg], page: Option<&PageRequest>) -> Result<ApiRequest> {
    paged(Endpoint::WikidotUserPosts, args, page)
}

fn wikidot_user_revisions(args: &[Arg], page: Option<&PageRequest>) -> Result<ApiRequest> {
    paged(Endpoint::WikidotUserRevisions, args, page)
}

#[async_trait]
impl WikiApi for V1 {
    fn version(&self) -> ApiVersion {
        ApiVersion::V1
    }

    async fn call(&self, endpoint: Endpoint, args: &[Arg]) -> Result<Value> {
        match self.paginated(endpoint) {
            Some(method) => method.call(args).await,
            None => self.get(endpoint, args).await,
        }
    }

    fn paginated(&self, endpoint: Endpoint) -> Option<&PaginatedMethod> {
        match endpoint {
            Endpoint::PagesSince => Some(&self.pages_since),
            Endpoint::PageRevisions => Some(&self.page_revisions),
            Endpoint::ForumThreadsSince => Some(&self.forum_threads_since),
            Endpoint::ThreadPosts => Some(&self.thread_posts),
            Endpoint::ThreadPostsSince => Some(&self.thread_posts_since),
            Endpoint::WikidotUserPages => Some(&self.wikidot_user_pages),
            Endpoint::WikidotUserPosts => Some(&self.wikidot_user_posts),
            Endpoint::WikidotUserRevisions => Some(&self.wikidot_user_revisions),
            _ => None,
        }
    }

    async fn wikis(&self) -> Result<Value> {
        self.get(Endpoint::Wikis, &[]).await
    }

    async fn wiki(&self) -> Result<Value> {
        self.get(Endpoint::Wiki, &[]).await
    }

    async fn pages(&self) -> Result<Value> {
        self.get(Endpoint::Pages, &[]).await
    }

    fn pages_since(&self) -> &PaginatedMethod {
        &self.pages_since
    }

    async fn page_by_id(&self, page_id: u64) -> Result<Value> {
        self.get(Endpoint::PageById, &[page_id.into()]).await
    }

    async fn page_by_slug(&self, slug: &str) -> Result<Value> {
        self.get(Endpoint::PageBySlug, &[slug.into()]).await
    }

    fn page_revisions(&self) -> &PaginatedMethod {
        &self.page_revisions
    }

    async fn page_votes(&self, page_id: u64) -> Result<Value> {
        self.get(Endpoint::PageVotes, &[page_id.into()]).await
    }

    async fn page_tags(&self, page_id: u64) -> Result<Value> {
        self.get(Endpoint::PageTags, &[page_id.into()]).await
    }

    async fn page_files(&self, page_id: u64) -> Result<Value> {
        self.get(Endpoint::PageFiles, &[page_id.into()]).await
    }

    async fn revision(&self, revision_id: u64) -> Result<Value> {
        self.get(Endpoint::Revision, &[revision_id.into()]).await
    }

    async fn full_revision(&self, revision_id: u64) -> Result<Value> {
        self.get(Endpoint::FullRevision, &[revision_id.into()]).await
    }

    async fn forums(&self) -> Result<Value> {
        self.get(Endpoint::Forums, &[]).await
    }

    async fn forum(&self, forum_id: u64) -> Result<Value> {
        self.get(Endpoint::Forum, &[forum_id.into()]).await
    }

    async fn forum_threads(&self, forum_id: u64) -> Result<Value> {
        self.get(Endpoint::ForumThreads, &[forum_id.into()]).await
    }

    fn forum_threads_since(&self) -> &PaginatedMethod {
        &self.forum_threads_since
    }

    async fn thread(&self, thread_id: u64) -> Result<Value> {
        self.get(Endpoint::Thread, &[thread_id.into()]).await
    }

    fn thread_posts(&self) -> &PaginatedMethod {
        &self.thread_posts
    }

    fn thread_posts_since(&self) -> &PaginatedMethod {
        &self.thread_posts_since
    }

    async fn post(&self, post_id: u64) -> Result<Value> {
        self.get(Endpoint::Post, &[post_id.into()]).await
    }

    async fn post_children(&self, post_id: u64) -> Result<Value> {
        self.get(Endpoint::PostChildren, &[post_id.into()]).await
    }

    async fn post_parent(&self, post_id: u64) -> Result<Value> {
        self.get(Endpoint::PostParent, &[post_id.into()]).await
    }

    async fn wikidot_user(&self, user_id: u64) -> Result<Value> {
        self.get(Endpoint::WikidotUser, &[user_id.into()]).await
    }

    async fn wikidot_user_by_name(&self, username: &str) -> Result<Value> {
        self.get(Endpoint::WikidotUserByName, &[username.into()]).await
    }

    async fn wikidot_user_avatar(&self, user_id: u64) -> Result<Value> {
        self.get(Endpoint::WikidotUserAvatar, &[user_id.into()]).await
    }

    fn wikidot_user_pages(&self) -> &PaginatedMethod {
        &self.wikidot_user_pages
    }

    fn wikidot_user_posts(&self) -> &PaginatedMethod {
        &self.wikidot_user_posts
    }

    fn wikidot_user_revisions(&self) -> &PaginatedMethod {
        &self.wikidot_user_revisions
    }

    async fn wikidot_user_votes(&self, user_id: u64) -> Result<Value> {
        self.get(Endpoint::WikidotUserVotes, &[user_id.into()]).await
    }

    async fn tags(&self) -> Result<Value> {
        self.get(Endpoint::Tags, &[]).await
    }

    async fn tag_pages(&self, tag_name: &str) -> Result<Value> {
        self.get(Endpoint::TagPages, &[tag_name.into()]).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;

    /// Records every request and answers with an empty array.
    #[derive(Default)]
    struct Recorder {
        requests: Mutex<Vec<ApiRequest>>,
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn send(&self, request: ApiRequest) -> Result<Value> {
            self.requests.lock().unwrap().push(request);
            Ok(json!([]))
        }
    }

    fn v1() -> (V1, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        (V1::new(recorder.clone()), recorder)
    }

    fn last(recorder: &Recorder) -> ApiRequest {
        recorder.requests.lock().unwrap().last().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_plain_resources_are_gets_on_catalog_paths() {
        let (api, recorder) = v1();

        api.page_by_slug("scp-001").await.unwrap();
        assert_eq!(last(&recorder).path, "page/slug/scp-001");

        api.full_revision(77).await.unwrap();
        let request = last(&recorder);
        assert_eq!(request.path, "revision/77/full");
        assert!(request.data.is_none());
    }

    #[tokio::test]
    async fn test_every_paginated_endpoint_has_an_accessor() {
        let (api, _) = v1();

        for endpoint in Endpoint::ALL {
            let method = api.paginated(*endpoint);
            assert_eq!(method.is_some(), endpoint.is_paginated(), "{endpoint}");
            if let Some(method) = method {
                assert_eq!(method.name(), endpoint.name());
                assert_eq!(
                    method.is_verbose_only(),
                    endpoint.paging() == Paging::VerboseOnlySince
                );
            }
        }
    }

    #[tokio::test]
    async fn test_since_sends_timestamp_with_paging_fields() {
        let (api, recorder) = v1();

        api.thread_posts_since()
            .call_verbose(&[Arg::Int(5), Arg::Int(1_500_000_000)], &PageRequest::default())
            .await
            .unwrap();

        let request = last(&recorder);
        assert_eq!(request.path, "thread/5/since");
        assert_eq!(
            request.data.map(Value::Object),
            Some(json!({
                "timestamp": 1_500_000_000,
                "limit": 20,
                "offset": 0,
                "direction": "asc"
            }))
        );
    }

    #[tokio::test]
    async fn test_since_requires_integer_timestamp() {
        let (api, recorder) = v1();

        let err = api
            .forum_threads_since()
            .call_verbose(&[Arg::Int(5), "yesterday".into()], &PageRequest::default())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("UNIX timestamp"));
        assert!(recorder.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_call_dispatches_to_paginated_default_form() {
        let (api, recorder) = v1();

        api.call(Endpoint::PageRevisions, &[Arg::Int(3)]).await.unwrap();
        let request = last(&recorder);
        assert_eq!(request.path, "page/3/revisions");
        assert!(request.data.is_none());

        let err = api
            .call(Endpoint::ThreadPostsSince, &[Arg::Int(3), Arg::Int(0)])
            .await
            .unwrap_err();
        assert!(matches!(err, ScuttleError::NoNonPaginatedVersion { .. }));
    }
}
