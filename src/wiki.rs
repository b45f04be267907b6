//! The `Scuttle` wrapper: one wiki, one API version.

use std::sync::Arc;

use serde_json::Value;

use crate::accessor::PaginatedMethod;
use crate::client::ScuttleClient;
use crate::endpoints::Endpoint;
use crate::error::{Result, ScuttleError};
use crate::pagination::{PageRequest, PageResult};
use crate::request::Arg;
use crate::traits::{Transport, WikiApi};
use crate::versions::ApiVersion;
use crate::walk::Walk;

/// Entry point for talking to one wiki's SCUTTLE API.
///
/// Holds the implementation of the selected API version behind the
/// [`WikiApi`] trait and exposes exactly the resources that trait declares.
///
/// # Example
///
/// ```no_run
/// use scuttle::{ApiVersion, PageRequest, Scuttle};
///
/// # async fn example() -> scuttle::Result<()> {
/// let wiki = Scuttle::new("en", Some("your-api-key"), ApiVersion::latest())?;
///
/// let page = wiki.page_by_slug("main").await?;
/// let page_id = page["id"].as_u64().unwrap_or_default();
///
/// let mut walk = wiki.verbose(
///     wiki.page_revisions(),
///     vec![page_id.into()],
///     PageRequest::default().with_limit(100),
/// )?;
/// while let Some(revisions) = walk.next_page().await? {
///     println!("{} revisions", revisions.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct Scuttle {
    domain: String,
    api: Box<dyn WikiApi>,
}

impl std::fmt::Debug for Scuttle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scuttle")
            .field("domain", &self.domain)
            .field("version", &self.api.version())
            .finish_non_exhaustive()
    }
}

impl Scuttle {
    /// Connect to a wiki on the public SCUTTLE instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain does not form a valid URL.
    pub fn new(domain: &str, api_key: Option<&str>, version: ApiVersion) -> Result<Self> {
        let client = ScuttleClient::for_wiki(domain, api_key, version)?;
        Ok(Self::with_transport(domain, Arc::new(client), version))
    }

    /// Connect using `SCUTTLE_*` environment variables.
    ///
    /// See [`ScuttleClient::from_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is missing or invalid.
    pub fn from_env(domain: &str) -> Result<Self> {
        Self::from_env_with_version(domain, None)
    }

    /// Connect using `SCUTTLE_*` environment variables, with an explicit
    /// version taking precedence over `SCUTTLE_API_VERSION`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is missing or invalid.
    pub fn from_env_with_version(domain: &str, version: Option<ApiVersion>) -> Result<Self> {
        let client = ScuttleClient::from_env_with_version(domain, version)?;
        let version = client.version();
        Ok(Self::with_transport(domain, Arc::new(client), version))
    }

    /// Build a wrapper on top of any transport.
    pub fn with_transport(domain: &str, transport: Arc<dyn Transport>, version: ApiVersion) -> Self {
        tracing::debug!(domain, %version, "connecting wiki");
        Self {
            domain: domain.to_string(),
            api: version.connect(transport),
        }
    }

    /// The wiki's domain (e.g. `en`).
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The API version in use.
    pub fn version(&self) -> ApiVersion {
        self.api.version()
    }

    /// The versioned API implementation.
    pub fn api(&self) -> &dyn WikiApi {
        self.api.as_ref()
    }

    /// Start a walk over the pages of a paginated resource.
    ///
    /// # Errors
    ///
    /// Returns [`ScuttleError::InvalidPaginationParameter`] if the starting
    /// request is invalid. Nothing is sent until the walk is advanced.
    pub fn verbose(
        &self,
        method: &PaginatedMethod,
        args: Vec<Arg>,
        request: PageRequest,
    ) -> Result<Walk> {
        Walk::new(method, args, request)
    }

    /// Start a walk over a resource given by name.
    ///
    /// # Errors
    ///
    /// Returns [`ScuttleError::UnknownResource`] for names outside the
    /// catalog and [`ScuttleError::InvalidIteratedAccessor`] for resources
    /// that do not page. Both are reported before anything is sent.
    pub fn verbose_by_name(&self, name: &str, args: Vec<Arg>, request: PageRequest) -> Result<Walk> {
        let method = self.paginated_by_name(name)?;
        Walk::new(method, args, request)
    }

    /// Call a resource given by name in its non-verbose form.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is unknown, the arguments do not fit, the
    /// resource is verbose-only, or the request fails.
    pub async fn call_by_name(&self, name: &str, args: &[Arg]) -> Result<Value> {
        let endpoint: Endpoint = name.parse()?;
        self.api.call(endpoint, args).await
    }

    /// Fetch one verbose page of a resource given by name.
    ///
    /// # Errors
    ///
    /// Same as [`Scuttle::verbose_by_name`], plus any error of the call.
    pub async fn page_by_name(
        &self,
        name: &str,
        args: &[Arg],
        request: &PageRequest,
    ) -> Result<PageResult> {
        self.paginated_by_name(name)?
            .call_verbose(args, request)
            .await
    }

    fn paginated_by_name(&self, name: &str) -> Result<&PaginatedMethod> {
        let endpoint: Endpoint = name.parse()?;
        self.api
            .paginated(endpoint)
            .ok_or_else(|| ScuttleError::InvalidIteratedAccessor(name.to_string()))
    }

    // Resource delegation

    pub async fn wikis(&self) -> Result<Value> {
        self.api.wikis().await
    }

    pub async fn wiki(&self) -> Result<Value> {
        self.api.wiki().await
    }

    pub async fn pages(&self) -> Result<Value> {
        self.api.pages().await
    }

    pub fn pages_since(&self) -> &PaginatedMethod {
        self.api.pages_since()
    }

    pub async fn page_by_id(&self, page_id: u64) -> Result<Value> {
        self.api.page_by_id(page_id).await
    }

    pub async fn page_by_slug(&self, slug: &str) -> Result<Value> {
        self.api.page_by_slug(slug).await
    }

    pub fn page_revisions(&self) -> &PaginatedMethod {
        self.api.page_revisions()
    }

    pub async fn page_votes(&self, page_id: u64) -> Result<Value> {
        self.api.page_votes(page_id).await
    }

    pub async fn page_tags(&self, page_id: u64) -> Result<Value> {
        self.api.page_tags(page_id).await
    }

    pub async fn page_files(&self, page_id: u64) -> Result<Value> {
        self.api.page_files(page_id).await
    }

    pub async fn revision(&self, revision_id: u64) -> Result<Value> {
        self.api.revision(revision_id).await
    }

    pub async fn full_revision(&self, revision_id: u64) -> Result<Value> {
        self.api.full_revision(revision_id).await
    }

    pub async fn forums(&self) -> Result<Value> {
        self.api.forums().await
    }

    pub async fn forum(&self, forum_id: u64) -> Result<Value> {
        self.api.forum(forum_id).await
    }

    pub async fn forum_threads(&self, forum_id: u64) -> Result<Value> {
        self.api.forum_threads(forum_id).await
    }

    pub fn forum_threads_since(&self) -> &PaginatedMethod {
        self.api.forum_threads_since()
    }

    pub async fn thread(&self, thread_id: u64) -> Result<Value> {
        self.api.thread(thread_id).await
    }

    pub fn thread_posts(&self) -> &PaginatedMethod {
        self.api.thread_posts()
    }

    pub fn thread_posts_since(&self) -> &PaginatedMethod {
        self.api.thread_posts_since()
    }

    pub async fn post(&self, post_id: u64) -> Result<Value> {
        self.api.post(post_id).await
    }

    pub async fn post_children(&self, post_id: u64) -> Result<Value> {
        self.api.post_children(post_id).await
    }

    pub async fn post_parent(&self, post_id: u64) -> Result<Value> {
        self.api.post_parent(post_id).await
    }

    pub async fn wikidot_user(&self, user_id: u64) -> Result<Value> {
        self.api.wikidot_user(user_id).await
    }

    pub async fn wikidot_user_by_name(&self, username: &str) -> Result<Value> {
        self.api.wikidot_user_by_name(username).await
    }

    pub async fn wikidot_user_avatar(&self, user_id: u64) -> Result<Value> {
        self.api.wikidot_user_avatar(user_id).await
    }

    pub fn wikidot_user_pages(&self) -> &PaginatedMethod {
        self.api.wikidot_user_pages()
    }

    pub fn wikidot_user_posts(&self) -> &PaginatedMethod {
        self.api.wikidot_user_posts()
    }

    pub fn wikidot_user_revisions(&self) -> &PaginatedMethod {
        self.api.wikidot_user_revisions()
    }

    pub async fn wikidot_user_votes(&self, user_id: u64) -> Result<Value> {
        self.api.wikidot_user_votes(user_id).await
    }

    pub async fn tags(&self) -> Result<Value> {
        self.api.tags().await
    }

    pub async fn tag_pages(&self, tag_name: &str) -> Result<Value> {
        self.api.tag_pages(tag_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::tests::FakeTransport;

    fn wiki(records: u32) -> (Scuttle, Arc<FakeTransport>) {
        let transport = FakeTransport::with_records(records);
        let wiki = Scuttle::with_transport("en", transport.clone(), ApiVersion::V1);
        (wiki, transport)
    }

    #[test]
    fn test_wrapper_reports_domain_and_version() {
        let (wiki, _) = wiki(0);
        assert_eq!(wiki.domain(), "en");
        assert_eq!(wiki.version(), ApiVersion::V1);
        assert!(format!("{wiki:?}").contains("V1"));
    }

    #[test]
    fn test_verbose_by_name_rejects_plain_resources_before_sending() {
        let (wiki, transport) = wiki(10);

        let err = wiki
            .verbose_by_name("page_by_id", vec![Arg::Int(1)], PageRequest::default())
            .unwrap_err();
        assert!(matches!(err, ScuttleError::InvalidIteratedAccessor(ref name) if name == "page_by_id"));

        let err = wiki
            .verbose_by_name("no_such_thing", vec![], PageRequest::default())
            .unwrap_err();
        assert!(matches!(err, ScuttleError::UnknownResource(_)));

        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_verbose_walks_page_revisions() {
        let (wiki, transport) = wiki(45);

        let walk = wiki
            .verbose(wiki.page_revisions(), vec![Arg::Int(9)], PageRequest::default())
            .unwrap();
        let records = walk.collect_records().await.unwrap();

        assert_eq!(records.len(), 45);
        assert_eq!(transport.call_count(), 3);
        let requests = transport.requests.lock().unwrap();
        assert!(requests.iter().all(|r| r.path == "page/9/revisions"));
    }

    #[tokio::test]
    async fn test_call_by_name_uses_catalog() {
        let (wiki, transport) = wiki(3);

        let body = wiki.call_by_name("pages", &[]).await.unwrap();

        assert_eq!(body.as_array().map(Vec::len), Some(3));
        assert_eq!(transport.requests.lock().unwrap()[0].path, "page");
    }

    #[tokio::test]
    async fn test_page_by_name_returns_single_page() {
        let (wiki, _) = wiki(45);

        let page = wiki
            .page_by_name(
                "thread_posts",
                &[Arg::Int(2)],
                &PageRequest::default().with_offset(40),
            )
            .await
            .unwrap();

        assert_eq!(page.len(), 5);
        assert!(!page.has_more());
    }
}
