//! Paginated accessors: one resource, two calling conventions.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{Result, ScuttleError};
use crate::pagination::{PageRequest, PageResult};
use crate::request::{ApiRequest, Arg};
use crate::traits::Transport;

/// Builds the request for one resource call.
///
/// Receives the positional arguments and, for verbose calls, the page
/// request to attach as request data.
pub type FetchFn = fn(&[Arg], Option<&PageRequest>) -> Result<ApiRequest>;

/// A resource accessor with a default call and a verbose, paged call.
///
/// Built once when a versioned API is constructed; its fetch function and
/// `verbose_only` flag never change afterwards. Cloning is cheap and clones
/// share the underlying transport.
///
/// # Example
///
/// ```ignore
/// let revisions = wiki.page_revisions();
///
/// // Whatever the API returns by default (metadata only)
/// let all = revisions.call(&[page_id.into()]).await?;
///
/// // One page of full revisions
/// let first = revisions
///     .call_verbose(&[page_id.into()], &PageRequest::default().with_limit(1))
///     .await?;
/// ```
#[derive(Clone)]
pub struct PaginatedMethod {
    name: &'static str,
    fetch: FetchFn,
    verbose_only: bool,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for PaginatedMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginatedMethod")
            .field("name", &self.name)
            .field("verbose_only", &self.verbose_only)
            .finish_non_exhaustive()
    }
}

impl PaginatedMethod {
    /// Bind a fetch function to a transport.
    pub fn new(
        name: &'static str,
        fetch: FetchFn,
        verbose_only: bool,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            name,
            fetch,
            verbose_only,
            transport,
        }
    }

    /// The resource name this accessor is bound to.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether only the verbose form may be called.
    pub fn is_verbose_only(&self) -> bool {
        self.verbose_only
    }

    /// Call the resource without paging fields; the API picks the page.
    ///
    /// # Errors
    ///
    /// Returns [`ScuttleError::NoNonPaginatedVersion`] without touching the
    /// transport if this accessor is verbose-only. Transport errors are
    /// returned unchanged.
    #[tracing::instrument(skip(self, args), fields(method = self.name))]
    pub async fn call(&self, args: &[Arg]) -> Result<Value> {
        if self.verbose_only {
            return Err(ScuttleError::NoNonPaginatedVersion { method: self.name });
        }
        let request = (self.fetch)(args, None)?;
        self.transport.send(request).await
    }

    /// Call the resource for one explicit page.
    ///
    /// The page request is validated before anything is sent, then forwarded
    /// as the request data.
    ///
    /// # Errors
    ///
    /// Returns [`ScuttleError::InvalidPaginationParameter`] for an invalid
    /// page request, [`ScuttleError::UnexpectedResponse`] if the body is not a
    /// JSON array, and transport errors unchanged.
    #[tracing::instrument(skip(self, args), fields(method = self.name))]
    pub async fn call_verbose(&self, args: &[Arg], page: &PageRequest) -> Result<PageResult> {
        page.validate()?;
        let request = (self.fetch)(args, Some(page))?;
        let body = self.transport.send(request).await?;
        PageResult::from_response(body, *page)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{json, Map};

    use super::*;
    use crate::pagination::Direction;

    /// In-memory resource of `total` numbered records that honours the
    /// paging fields of POSTed requests.
    #[derive(Default)]
    pub(crate) struct FakeTransport {
        pub(crate) total: u32,
        pub(crate) calls: AtomicUsize,
        pub(crate) requests: Mutex<Vec<ApiRequest>>,
        pub(crate) fail_at_call: Option<usize>,
    }

    impl FakeTransport {
        pub(crate) fn with_records(total: u32) -> Arc<Self> {
            Arc::new(Self {
                total,
                ..Default::default()
            })
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn page(&self, data: &Map<String, Value>) -> Value {
            let limit = data["limit"].as_u64().unwrap_or(20) as u32;
            let offset = data["offset"].as_u64().unwrap_or(0) as u32;
            let descending = data["direction"] == "desc";

            let ids: Vec<u32> = (offset..self.total.max(offset))
                .take(limit as usize)
                .map(|i| if descending { self.total - 1 - i } else { i })
                .collect();
            json!(ids.iter().map(|id| json!({"id": id})).collect::<Vec<_>>())
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn send(&self, request: ApiRequest) -> Result<Value> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            self.requests.lock().unwrap().push(request.clone());

            if self.fail_at_call == Some(call) {
                return Err(ScuttleError::ApiError {
                    message: "backend unavailable".to_string(),
                    status_code: Some(503),
                });
            }

            Ok(match &request.data {
                Some(data) => self.page(data),
                None => json!((0..self.total).map(|id| json!({"id": id})).collect::<Vec<_>>()),
            })
        }
    }

    fn records(args: &[Arg], page: Option<&PageRequest>) -> Result<ApiRequest> {
        let [id] = args else {
            return Err(ScuttleError::InvalidArgument("expected one id".to_string()));
        };
        ApiRequest::new(format!("records/{id}")).with_page(page)
    }

    pub(crate) fn accessor(transport: Arc<FakeTransport>, verbose_only: bool) -> PaginatedMethod {
        PaginatedMethod::new("records", records, verbose_only, transport)
    }

    #[tokio::test]
    async fn test_call_uses_default_page() {
        let transport = FakeTransport::with_records(45);
        let method = accessor(transport.clone(), false);

        let body = method.call(&[Arg::Int(1)]).await.unwrap();

        assert_eq!(body.as_array().unwrap().len(), 45);
        let requests = transport.requests.lock().unwrap();
        assert_eq!(requests[0].path, "records/1");
        assert!(requests[0].data.is_none());
    }

    #[tokio::test]
    async fn test_verbose_only_call_never_reaches_transport() {
        let transport = FakeTransport::with_records(45);
        let method = accessor(transport.clone(), true);

        let err = method.call(&[Arg::Int(1)]).await.unwrap_err();

        assert!(matches!(
            err,
            ScuttleError::NoNonPaginatedVersion { method: "records" }
        ));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_verbose_only_still_allows_verbose_call() {
        let transport = FakeTransport::with_records(45);
        let method = accessor(transport.clone(), true);

        let page = method
            .call_verbose(&[Arg::Int(1)], &PageRequest::default())
            .await
            .unwrap();

        assert_eq!(page.len(), 20);
    }

    #[tokio::test]
    async fn test_call_verbose_forwards_exactly_paging_fields() {
        let transport = FakeTransport::with_records(45);
        let method = accessor(transport.clone(), false);
        let request = PageRequest::default()
            .with_limit(7)
            .with_offset(14)
            .with_direction(Direction::Descending);

        method.call_verbose(&[Arg::Int(3)], &request).await.unwrap();

        let requests = transport.requests.lock().unwrap();
        assert_eq!(
            requests[0].data.clone().map(Value::Object),
            Some(json!({"limit": 7, "offset": 14, "direction": "desc"}))
        );
    }

    #[tokio::test]
    async fn test_invalid_limit_fails_before_transport() {
        let transport = FakeTransport::with_records(45);
        let method = accessor(transport.clone(), false);

        let err = method
            .call_verbose(&[Arg::Int(1)], &PageRequest::default().with_limit(0))
            .await
            .unwrap_err();

        assert!(matches!(err, ScuttleError::InvalidPaginationParameter(_)));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_transport_errors_pass_through() {
        let transport = Arc::new(FakeTransport {
            total: 10,
            fail_at_call: Some(1),
            ..Default::default()
        });
        let method = accessor(transport, false);

        let err = method
            .call_verbose(&[Arg::Int(1)], &PageRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ScuttleError::ApiError {
                status_code: Some(503),
                ..
            }
        ));
    }
}
