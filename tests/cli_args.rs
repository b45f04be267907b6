//! CLI argument parsing tests.
//!
//! These tests pin down the command-line interface of the scuttle binary.

use clap::Parser;
use scuttle::cli::{parse_args, Cli, Command};
use scuttle::{Arg, Direction, ScuttleError};
use tokio_test::{assert_err, assert_ok};

#[test]
fn test_cli_parses_resources_subcommand() {
    let cli = Cli::parse_from(["scuttle", "resources"]);

    assert!(!cli.json);
    assert_eq!(cli.wiki, "en");
    assert!(matches!(cli.command, Command::Resources));
}

#[test]
fn test_cli_parses_get_subcommand() {
    let cli = Cli::parse_from(["scuttle", "get", "page_by_slug", "scp-173"]);

    match cli.command {
        Command::Get { resource, args } => {
            assert_eq!(resource, "page_by_slug");
            assert_eq!(parse_args(&args), vec![Arg::Str("scp-173".to_string())]);
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_parses_page_subcommand_with_paging() {
    let cli = Cli::parse_from([
        "scuttle",
        "page",
        "page_revisions",
        "42",
        "--limit",
        "50",
        "--offset",
        "100",
        "--direction",
        "desc",
    ]);

    match cli.command {
        Command::Page {
            resource,
            args,
            paging,
        } => {
            assert_eq!(resource, "page_revisions");
            assert_eq!(parse_args(&args), vec![Arg::Int(42)]);

            let request = assert_ok!(paging.to_request());
            assert_eq!(request.limit, 50);
            assert_eq!(request.offset, 100);
            assert_eq!(request.direction, Direction::Descending);
        }
        _ => panic!("Expected Page command"),
    }
}

#[test]
fn test_cli_paging_defaults() {
    let cli = Cli::parse_from(["scuttle", "walk", "thread_posts", "7"]);

    match cli.command {
        Command::Walk {
            paging, max_pages, ..
        } => {
            let request = assert_ok!(paging.to_request());
            assert_eq!(request.limit, 20);
            assert_eq!(request.offset, 0);
            assert_eq!(request.direction, Direction::Ascending);
            assert_eq!(max_pages, None);
        }
        _ => panic!("Expected Walk command"),
    }
}

#[test]
fn test_cli_rejects_bad_paging_values_at_validation() {
    let cli = Cli::parse_from(["scuttle", "page", "thread_posts", "7", "--limit", "-5"]);
    let Command::Page { paging, .. } = cli.command else {
        panic!("Expected Page command");
    };
    let err = assert_err!(paging.to_request());
    assert!(matches!(err, ScuttleError::InvalidPaginationParameter(_)));

    let cli = Cli::parse_from(["scuttle", "page", "thread_posts", "7", "--direction", "up"]);
    let Command::Page { paging, .. } = cli.command else {
        panic!("Expected Page command");
    };
    assert_err!(paging.to_request());
}

#[test]
fn test_cli_global_flags() {
    let cli = Cli::parse_from([
        "scuttle",
        "walk",
        "forum_threads_since",
        "1",
        "1600000000",
        "--wiki",
        "fr",
        "--api-version",
        "1",
        "--json",
        "--max-pages",
        "3",
    ]);

    assert!(cli.json);
    assert_eq!(cli.wiki, "fr");
    assert_eq!(cli.api_version, Some(1));
    match cli.command {
        Command::Walk {
            args, max_pages, ..
        } => {
            assert_eq!(parse_args(&args), vec![Arg::Int(1), Arg::Int(1_600_000_000)]);
            assert_eq!(max_pages, Some(3));
        }
        _ => panic!("Expected Walk command"),
    }
}

#[test]
fn test_cli_requires_subcommand() {
    assert!(Cli::try_parse_from(["scuttle"]).is_err());
}
