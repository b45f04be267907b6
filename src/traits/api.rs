//! Capability trait implemented by each supported API version.

use async_trait::async_trait;
use serde_json::Value;

use crate::accessor::PaginatedMethod;
use crate::endpoints::Endpoint;
use crate::error::Result;
use crate::request::Arg;
use crate::versions::ApiVersion;

/// The resources one version of the SCUTTLE API offers.
///
/// Plain resources are async methods returning the JSON body. Paginated
/// resources return their [`PaginatedMethod`], which offers both the default
/// call and the verbose, paged call.
///
/// [`Scuttle`](crate::Scuttle) holds one implementation of this trait,
/// chosen by [`ApiVersion::connect`].
#[async_trait]
pub trait WikiApi: Send + Sync {
    /// The version this implementation speaks.
    fn version(&self) -> ApiVersion;

    /// Call any endpoint in its non-verbose form.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments do not fit the endpoint, the
    /// endpoint is verbose-only, or the request fails.
    async fn call(&self, endpoint: Endpoint, args: &[Arg]) -> Result<Value>;

    /// The accessor for a paginated endpoint, or `None` if it does not page.
    fn paginated(&self, endpoint: Endpoint) -> Option<&PaginatedMethod>;

    /// All wikis known to the API.
    async fn wikis(&self) -> Result<Value>;

    /// The wiki this API instance is bound to.
    async fn wiki(&self) -> Result<Value>;

    /// Every page of the wiki (IDs and slugs only).
    async fn pages(&self) -> Result<Value>;

    /// Pages created since a UNIX timestamp.
    fn pages_since(&self) -> &PaginatedMethod;

    async fn page_by_id(&self, page_id: u64) -> Result<Value>;

    async fn page_by_slug(&self, slug: &str) -> Result<Value>;

    /// Revisions of a page. The default call returns metadata for every
    /// revision; verbose pages include revision content.
    fn page_revisions(&self) -> &PaginatedMethod;

    async fn page_votes(&self, page_id: u64) -> Result<Value>;

    async fn page_tags(&self, page_id: u64) -> Result<Value>;

    async fn page_files(&self, page_id: u64) -> Result<Value>;

    async fn revision(&self, revision_id: u64) -> Result<Value>;

    /// A revision including its content.
    async fn full_revision(&self, revision_id: u64) -> Result<Value>;

    async fn forums(&self) -> Result<Value>;

    async fn forum(&self, forum_id: u64) -> Result<Value>;

    async fn forum_threads(&self, forum_id: u64) -> Result<Value>;

    /// Threads of a forum created since a UNIX timestamp. Verbose only.
    fn forum_threads_since(&self) -> &PaginatedMethod;

    async fn thread(&self, thread_id: u64) -> Result<Value>;

    fn thread_posts(&self) -> &PaginatedMethod;

    /// Posts of a thread made since a UNIX timestamp. Verbose only.
    fn thread_posts_since(&self) -> &PaginatedMethod;

    async fn post(&self, post_id: u64) -> Result<Value>;

    async fn post_children(&self, post_id: u64) -> Result<Value>;

    async fn post_parent(&self, post_id: u64) -> Result<Value>;

    async fn wikidot_user(&self, user_id: u64) -> Result<Value>;

    async fn wikidot_user_by_name(&self, username: &str) -> Result<Value>;

    async fn wikidot_user_avatar(&self, user_id: u64) -> Result<Value>;

    fn wikidot_user_pages(&self) -> &PaginatedMethod;

    fn wikidot_user_posts(&self) -> &PaginatedMethod;

    fn wikidot_user_revisions(&self) -> &PaginatedMethod;

    async fn wikidot_user_votes(&self, user_id: u64) -> Result<Value>;

    async fn tags(&self) -> Result<Value>;

    /// Pages carrying a tag.
    async fn tag_pages(&self, tag_name: &str) -> Result<Value>;
}
