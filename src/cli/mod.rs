//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the scuttle binary.

use clap::{Args, Parser, Subcommand};

use crate::error::Result;
use crate::pagination::{PageRequest, DEFAULT_LIMIT};
use crate::request::Arg;

/// SCUTTLE API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "scuttle", about = "SCUTTLE wiki API CLI", version)]
pub struct Cli {
    /// Wiki domain (subdomain of the SCUTTLE instance).
    #[arg(long, global = true, env = "SCUTTLE_WIKI", default_value = "en")]
    pub wiki: String,

    /// API version to use (defaults to the latest).
    #[arg(long = "api-version", global = true)]
    pub api_version: Option<u32>,

    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every resource the API offers.
    Resources,

    /// Call a resource in its default, non-paginated form.
    Get {
        /// Resource name (e.g. page_by_slug).
        resource: String,

        /// Positional arguments (IDs, slugs, user names).
        args: Vec<String>,
    },

    /// Fetch one verbose page of a paginated resource.
    Page {
        /// Resource name (e.g. page_revisions).
        resource: String,

        /// Positional arguments; "since" resources take a UNIX timestamp last.
        args: Vec<String>,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Walk every page of a paginated resource.
    Walk {
        /// Resource name (e.g. thread_posts).
        resource: String,

        /// Positional arguments; "since" resources take a UNIX timestamp last.
        args: Vec<String>,

        #[command(flatten)]
        paging: PagingArgs,

        /// Stop after this many pages.
        #[arg(long)]
        max_pages: Option<usize>,
    },
}

/// Paging options shared by `page` and `walk`.
#[derive(Args, Debug, Clone, Default)]
pub struct PagingArgs {
    /// Records per page.
    #[arg(long, allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Records to skip before the first page.
    #[arg(long, allow_negative_numbers = true)]
    pub offset: Option<i64>,

    /// Sort direction: asc or desc.
    #[arg(long)]
    pub direction: Option<String>,
}

impl PagingArgs {
    /// Validate the options into a page request, filling in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ScuttleError::InvalidPaginationParameter`](crate::ScuttleError::InvalidPaginationParameter)
    /// for a non-positive limit, a negative offset or an unknown direction.
    pub fn to_request(&self) -> Result<PageRequest> {
        PageRequest::parse(
            self.limit.unwrap_or(i64::from(DEFAULT_LIMIT)),
            self.offset.unwrap_or(0),
            self.direction.as_deref().unwrap_or("asc"),
        )
    }
}

/// Turn command-line tokens into positional resource arguments.
pub fn parse_args(tokens: &[String]) -> Vec<Arg> {
    tokens.iter().map(|t| Arg::parse(t)).collect()
}
