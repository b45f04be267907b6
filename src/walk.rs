//! Page-by-page traversal of a paginated accessor.
//!
//! A [`Walk`] owns its cursor, so any number of walks over the same or
//! different accessors can be advanced independently. It requests one page
//! at a time and stops after the first page holding fewer records than the
//! limit. The total record count is never known, so a walk whose last page
//! happens to be exactly full makes one more request and ends on the empty
//! page that comes back.

use futures::stream::{self, Stream};
use serde_json::Value;

use crate::accessor::PaginatedMethod;
use crate::error::Result;
use crate::pagination::{PageRequest, PageResult};
use crate::request::Arg;

/// A lazy walk over the pages of one paginated resource.
///
/// # Example
///
/// ```ignore
/// let mut walk = wiki.verbose(
///     wiki.page_revisions(),
///     vec![page_id.into()],
///     PageRequest::default().with_limit(100),
/// )?;
///
/// while let Some(page) = walk.next_page().await? {
///     println!("{} revisions from offset {}", page.len(), page.request.offset);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Walk {
    method: PaginatedMethod,
    args: Vec<Arg>,
    cursor: PageRequest,
    finished: bool,
}

impl Walk {
    /// Start a walk at the position described by `request`.
    ///
    /// Nothing is sent until the first page is requested.
    ///
    /// # Errors
    ///
    /// Returns [`ScuttleError::InvalidPaginationParameter`](crate::ScuttleError::InvalidPaginationParameter)
    /// if the request is invalid.
    pub fn new(method: &PaginatedMethod, args: Vec<Arg>, request: PageRequest) -> Result<Self> {
        request.validate()?;
        Ok(Self {
            method: method.clone(),
            args,
            cursor: request,
            finished: false,
        })
    }

    /// The request the next page will be fetched with.
    pub fn cursor(&self) -> &PageRequest {
        &self.cursor
    }

    /// Whether the walk has ended, by a short page or an error.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Fetch the next page, or `None` once the walk has ended.
    ///
    /// # Errors
    ///
    /// Transport errors are returned unchanged and end the walk. Pages
    /// returned before the error remain valid.
    pub async fn next_page(&mut self) -> Result<Option<PageResult>> {
        if self.finished {
            return Ok(None);
        }

        tracing::debug!(
            method = self.method.name(),
            offset = self.cursor.offset,
            limit = self.cursor.limit,
            "fetching page"
        );

        let page = match self.method.call_verbose(&self.args, &self.cursor).await {
            Ok(page) => page,
            Err(e) => {
                self.finished = true;
                return Err(e);
            }
        };

        if page.has_more() {
            match self.cursor.offset.checked_add(self.cursor.limit) {
                Some(offset) => self.cursor.offset = offset,
                None => self.finished = true,
            }
        } else {
            self.finished = true;
        }

        Ok(Some(page))
    }

    /// Turn the walk into a stream of pages.
    pub fn into_stream(self) -> impl Stream<Item = Result<PageResult>> + Send {
        stream::try_unfold(self, |mut walk| async move {
            Ok(walk.next_page().await?.map(|page| (page, walk)))
        })
    }

    /// Walk to the end and return every record in order.
    ///
    /// # Errors
    ///
    /// Returns the first error any page request produces.
    pub async fn collect_records(mut self) -> Result<Vec<Value>> {
        let mut records = Vec::new();
        while let Some(page) = self.next_page().await? {
            records.extend(page.items);
        }
        Ok(records)
    }
}
