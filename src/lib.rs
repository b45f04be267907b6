//! SCUTTLE API client library.
//!
//! A Rust library for the SCUTTLE REST API, which mirrors the pages,
//! revisions, forums and users of Wikidot-hosted wikis. Each wiki is reached
//! through a [`Scuttle`] wrapper bound to one API version; paginated
//! resources are walked page by page with a [`Walk`].
//!
//! # Quick Start
//!
//! ```no_run
//! use scuttle::{PageRequest, Scuttle};
//!
//! #[tokio::main]
//! async fn main() -> scuttle::Result<()> {
//!     // Connect to the English wiki using environment variables
//!     let wiki = Scuttle::from_env("en")?;
//!
//!     // Plain resources return the decoded JSON body
//!     let page = wiki.page_by_slug("main").await?;
//!     let page_id = page["id"].as_u64().unwrap_or_default();
//!
//!     // Paginated resources are walked with a verbose iterator
//!     let walk = wiki.verbose(
//!         wiki.page_revisions(),
//!         vec![page_id.into()],
//!         PageRequest::default().with_limit(50),
//!     )?;
//!     let revisions = walk.collect_records().await?;
//!     println!("Found {} revisions", revisions.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`ScuttleClient`] implements [`Transport`]: authentication, GET for
//!   plain requests and form-encoded POST for paginated ones
//! - [`WikiApi`] is the capability set of one API version; [`V1`] is the
//!   only implementation and [`ApiVersion::connect`] picks it
//! - [`PaginatedMethod`] is a resource that can be called plainly or one
//!   page at a time
//! - [`Walk`] advances offsets until a short page arrives
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `SCUTTLE_API_KEY` (optional) - Your SCUTTLE API key; requests are anonymous without it
//! - `SCUTTLE_API_VERSION` (optional) - API version number (defaults to the latest)
//! - `SCUTTLE_API_URL` (optional) - Server root (defaults to
//!   `https://{domain}.scuttle.bluesoul.net`)

mod accessor;
mod client;
mod endpoints;
mod error;
mod models;
mod pagination;
mod request;
mod traits;
mod versions;
mod walk;
mod wiki;

pub mod cli;
pub mod output;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::ScuttleClient;
pub use error::{Result, ScuttleError};
pub use wiki::Scuttle;

// Requests and pagination
pub use accessor::{FetchFn, PaginatedMethod};
pub use endpoints::{Endpoint, Paging};
pub use pagination::{Direction, PageRequest, PageResult, DEFAULT_LIMIT};
pub use request::{ApiRequest, Arg, HttpMethod};
pub use walk::Walk;

// Re-export traits
pub use traits::{Transport, WikiApi};

// Versions
pub use versions::{ApiVersion, V1};

// Re-export models
pub use models::{
    Forum, PageFile, Post, Revision, RevisionMetadata, Tag, Thread, Vote, Wiki, WikiPage,
    WikidotRevisionMetadata,
};
