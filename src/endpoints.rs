//! Endpoint catalog for version 1 of the SCUTTLE API.
//!
//! Every resource the client can reach is one [`Endpoint`] with a URL
//! template relative to the versioned API root. `{}` marks a positional
//! parameter.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ScuttleError};
use crate::request::Arg;

/// How an endpoint can be called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paging {
    /// Plain GET only.
    None,
    /// GET for the default page, POST with paging fields for verbose pages.
    Paginated,
    /// Only the verbose POST form exists; it also takes a `since` timestamp.
    VerboseOnlySince,
}

/// A SCUTTLE API resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Wikis,
    Wiki,
    Pages,
    PagesSince,
    PageById,
    PageBySlug,
    PageRevisions,
    PageVotes,
    PageTags,
    PageFiles,
    Revision,
    FullRevision,
    Forums,
    Forum,
    ForumThreads,
    ForumThreadsSince,
    Thread,
    ThreadPosts,
    ThreadPostsSince,
    Post,
    PostChildren,
    PostParent,
    WikidotUser,
    WikidotUserByName,
    WikidotUserAvatar,
    WikidotUserPages,
    WikidotUserPosts,
    WikidotUserRevisions,
    WikidotUserVotes,
    Tags,
    TagPages,
}

impl Endpoint {
    /// Every endpoint in catalog order.
    pub const ALL: &'static [Endpoint] = &[
        Endpoint::Wikis,
        Endpoint::Wiki,
        Endpoint::Pages,
        Endpoint::PagesSince,
        Endpoint::PageById,
        Endpoint::PageBySlug,
        Endpoint::PageRevisions,
        Endpoint::PageVotes,
        Endpoint::PageTags,
        Endpoint::PageFiles,
        Endpoint::Revision,
        Endpoint::FullRevision,
        Endpoint::Forums,
        Endpoint::Forum,
        Endpoint::ForumThreads,
        Endpoint::ForumThreadsSince,
        Endpoint::Thread,
        Endpoint::ThreadPosts,
        Endpoint::ThreadPostsSince,
        Endpoint::Post,
        Endpoint::PostChildren,
        Endpoint::PostParent,
        Endpoint::WikidotUser,
        Endpoint::WikidotUserByName,
        Endpoint::WikidotUserAvatar,
        Endpoint::WikidotUserPages,
        Endpoint::WikidotUserPosts,
        Endpoint::WikidotUserRevisions,
        Endpoint::WikidotUserVotes,
        Endpoint::Tags,
        Endpoint::TagPages,
    ];

    /// Resource name, URL template and paging mode.
    fn entry(&self) -> (&'static str, &'static str, Paging) {
        match self {
            Endpoint::Wikis => ("wikis", "wikis", Paging::None),
            Endpoint::Wiki => ("wiki", "wiki", Paging::None),
            Endpoint::Pages => ("pages", "page", Paging::None),
            Endpoint::PagesSince => ("pages_since", "page/since/{}", Paging::Paginated),
            Endpoint::PageById => ("page_by_id", "page/{}", Paging::None),
            Endpoint::PageBySlug => ("page_by_slug", "page/slug/{}", Paging::None),
            Endpoint::PageRevisions => ("page_revisions", "page/{}/revisions", Paging::Paginated),
            Endpoint::PageVotes => ("page_votes", "page/{}/votes", Paging::None),
            Endpoint::PageTags => ("page_tags", "page/{}/tags", Paging::None),
            Endpoint::PageFiles => ("page_files", "page/{}/files", Paging::None),
            Endpoint::Revision => ("revision", "revision/{}", Paging::None),
            Endpoint::FullRevision => ("full_revision", "revision/{}/full", Paging::None),
            Endpoint::Forums => ("forums", "forum", Paging::None),
            Endpoint::Forum => ("forum", "forum/{}", Paging::None),
            Endpoint::ForumThreads => ("forum_threads", "forum/{}/threads", Paging::None),
            Endpoint::ForumThreadsSince => (
                "forum_threads_since",
                "forum/{}/since",
                Paging::VerboseOnlySince,
            ),
            Endpoint::Thread => ("thread", "thread/{}", Paging::None),
            Endpoint::ThreadPosts => ("thread_posts", "thread/{}/posts", Paging::Paginated),
            Endpoint::ThreadPostsSince => (
                "thread_posts_since",
                "thread/{}/since",
                Paging::VerboseOnlySince,
            ),
            Endpoint::Post => ("post", "post/{}", Paging::None),
            Endpoint::PostChildren => ("post_children", "post/{}/children", Paging::None),
            Endpoint::PostParent => ("post_parent", "post/{}/parent", Paging::None),
            Endpoint::WikidotUser => ("wikidot_user", "wikidotuser/{}", Paging::None),
            Endpoint::WikidotUserByName => (
                "wikidot_user_by_name",
                "wikidotuser/username/{}",
                Paging::None,
            ),
            Endpoint::WikidotUserAvatar => (
                "wikidot_user_avatar",
                "wikidotuser/{}/avatar",
                Paging::None,
            ),
            Endpoint::WikidotUserPages => (
                "wikidot_user_pages",
                "wikidotuser/{}/pages",
                Paging::Paginated,
            ),
            Endpoint::WikidotUserPosts => (
                "wikidot_user_posts",
                "wikidotuser/{}/posts",
                Paging::Paginated,
            ),
            Endpoint::WikidotUserRevisions => (
                "wikidot_user_revisions",
                "wikidotuser/{}/revisions",
                Paging::Paginated,
            ),
            Endpoint::WikidotUserVotes => (
                "wikidot_user_votes",
                "wikidotuser/{}/votes",
                Paging::None,
            ),
            Endpoint::Tags => ("tags", "tag", Paging::None),
            Endpoint::TagPages => ("tag_pages", "tag/{}/pages", Paging::None),
        }
    }

    /// The resource name used for name-based dispatch.
    pub fn name(&self) -> &'static str {
        self.entry().0
    }

    /// URL template relative to the versioned API root.
    pub fn template(&self) -> &'static str {
        self.entry().1
    }

    /// How this endpoint pages.
    pub fn paging(&self) -> Paging {
        self.entry().2
    }

    /// Number of positional parameters in the URL template.
    pub fn path_params(&self) -> usize {
        self.template().matches("{}").count()
    }

    /// Number of positional arguments a caller passes, including a trailing
    /// `since` timestamp for [`Paging::VerboseOnlySince`] endpoints.
    pub fn arity(&self) -> usize {
        match self.paging() {
            Paging::VerboseOnlySince => self.path_params() + 1,
            _ => self.path_params(),
        }
    }

    /// Whether this endpoint supports verbose (paged) calls.
    pub fn is_paginated(&self) -> bool {
        !matches!(self.paging(), Paging::None)
    }

    /// Substitute positional arguments into the URL template.
    ///
    /// # Errors
    ///
    /// Returns [`ScuttleError::InvalidArgument`] if the number of arguments
    /// does not match the template.
    pub fn path(&self, args: &[Arg]) -> Result<String> {
        let expected = self.path_params();
        if args.len() != expected {
            return Err(ScuttleError::InvalidArgument(format!(
                "{} takes {} argument(s), got {}",
                self.name(),
                expected,
                args.len()
            )));
        }

        let mut path = String::with_capacity(self.template().len() + 8);
        let mut args = args.iter();
        for (i, part) in self.template().split("{}").enumerate() {
            if i > 0 {
                if let Some(arg) = args.next() {
                    path.push_str(&arg.to_path_segment());
                }
            }
            path.push_str(part);
        }
        Ok(path)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Endpoint {
    type Err = ScuttleError;

    fn from_str(s: &str) -> Result<Self> {
        Endpoint::ALL
            .iter()
            .copied()
            .find(|e| e.name() == s)
            .ok_or_else(|| ScuttleError::UnknownResource(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_substitutes_arguments() {
        let path = Endpoint::PageRevisions.path(&[Arg::Int(12)]).unwrap();
        assert_eq!(path, "page/12/revisions");

        let path = Endpoint::PageBySlug.path(&["scp-001".into()]).unwrap();
        assert_eq!(path, "page/slug/scp-001");

        assert_eq!(Endpoint::Wikis.path(&[]).unwrap(), "wikis");
    }

    #[test]
    fn test_path_rejects_wrong_arity() {
        let err = Endpoint::PageById.path(&[]).unwrap_err();
        assert!(matches!(err, ScuttleError::InvalidArgument(_)));

        let err = Endpoint::Wiki.path(&[Arg::Int(1)]).unwrap_err();
        assert!(err.to_string().contains("takes 0 argument(s)"));
    }

    #[test]
    fn test_names_resolve_back_to_endpoints() {
        for endpoint in Endpoint::ALL {
            assert_eq!(endpoint.name().parse::<Endpoint>().unwrap(), *endpoint);
        }
        assert!(matches!(
            "page_revision".parse::<Endpoint>(),
            Err(ScuttleError::UnknownResource(_))
        ));
    }

    #[test]
    fn test_since_endpoints_take_an_extra_argument() {
        assert_eq!(Endpoint::ThreadPostsSince.path_params(), 1);
        assert_eq!(Endpoint::ThreadPostsSince.arity(), 2);
        assert_eq!(Endpoint::ThreadPosts.arity(), 1);
        assert!(Endpoint::ThreadPostsSince.is_paginated());
        assert!(!Endpoint::Thread.is_paginated());
    }
}
