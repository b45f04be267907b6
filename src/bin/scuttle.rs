//! SCUTTLE API CLI binary.
//!
//! A command-line interface for interacting with the SCUTTLE API.

use std::process::ExitCode;

use clap::Parser;
use futures::{pin_mut, StreamExt};
use scuttle::cli::{parse_args, Cli, Command, PagingArgs};
use scuttle::output::{pretty_record, record_label, PrettyPrint};
use scuttle::{ApiVersion, Endpoint, PageResult, Scuttle};
use serde_json::Value;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if matches!(cli.command, Command::Resources) {
        return match handle_resources(cli.json) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let version = match cli.api_version.map(ApiVersion::try_from).transpose() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Without SCUTTLE_API_KEY requests go out anonymously.
    let wiki = match Scuttle::from_env_with_version(&cli.wiki, version) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&wiki, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(wiki: &Scuttle, cli: Cli) -> scuttle::Result<()> {
    match cli.command {
        Command::Resources => handle_resources(cli.json),
        Command::Get { resource, args } => handle_get(wiki, &resource, &args, cli.json).await,
        Command::Page {
            resource,
            args,
            paging,
        } => handle_page(wiki, &resource, &args, &paging, cli.json).await,
        Command::Walk {
            resource,
            args,
            paging,
            max_pages,
        } => handle_walk(wiki, &resource, &args, &paging, max_pages, cli.json).await,
    }
}

fn handle_resources(json: bool) -> scuttle::Result<()> {
    if json {
        let entries: Vec<Value> = Endpoint::ALL
            .iter()
            .map(|e| {
                serde_json::json!({
                    "name": e.name(),
                    "template": e.template(),
                    "arguments": e.arity(),
                    "paginated": e.is_paginated(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        let rows: Vec<ResourceRow> = Endpoint::ALL.iter().map(ResourceRow::from).collect();
        println!("{}", Table::new(rows));
    }
    Ok(())
}

async fn handle_get(
    wiki: &Scuttle,
    resource: &str,
    args: &[String],
    json: bool,
) -> scuttle::Result<()> {
    let endpoint: Endpoint = resource.parse()?;
    let body = wiki.call_by_name(resource, &parse_args(args)).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }
    match body {
        Value::Array(records) => output_records(&records),
        other => match pretty_record(endpoint, &other) {
            Some(text) => println!("{text}"),
            None => println!("{}", serde_json::to_string_pretty(&other)?),
        },
    }
    Ok(())
}

async fn handle_page(
    wiki: &Scuttle,
    resource: &str,
    args: &[String],
    paging: &PagingArgs,
    json: bool,
) -> scuttle::Result<()> {
    let request = paging.to_request()?;
    let page = wiki
        .page_by_name(resource, &parse_args(args), &request)
        .await?;
    output_page(&page, json)
}

async fn handle_walk(
    wiki: &Scuttle,
    resource: &str,
    args: &[String],
    paging: &PagingArgs,
    max_pages: Option<usize>,
    json: bool,
) -> scuttle::Result<()> {
    let request = paging.to_request()?;
    let walk = wiki.verbose_by_name(resource, parse_args(args), request)?;

    let pages = walk.into_stream().take(max_pages.unwrap_or(usize::MAX));
    pin_mut!(pages);
    while let Some(page) = pages.next().await {
        output_page(&page?, json)?;
    }
    Ok(())
}

fn output_page(page: &PageResult, json: bool) -> scuttle::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&page.items)?);
    } else {
        output_records(&page.items);
        println!("\n{}", page.pretty_print());
    }
    Ok(())
}

fn output_records(records: &[Value]) {
    let rows: Vec<RecordRow> = records.iter().map(RecordRow::from).collect();
    println!("{}", Table::new(rows));
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct ResourceRow {
    name: &'static str,
    template: &'static str,
    arguments: usize,
    paginated: String,
}

impl From<&Endpoint> for ResourceRow {
    fn from(e: &Endpoint) -> Self {
        Self {
            name: e.name(),
            template: e.template(),
            arguments: e.arity(),
            paginated: match e.paging() {
                scuttle::Paging::None => String::new(),
                scuttle::Paging::Paginated => "yes".to_string(),
                scuttle::Paging::VerboseOnlySince => "verbose only".to_string(),
            },
        }
    }
}

#[derive(Tabled)]
struct RecordRow {
    id: String,
    label: String,
}

impl From<&Value> for RecordRow {
    fn from(record: &Value) -> Self {
        Self {
            id: record
                .get("id")
                .map(|id| id.to_string())
                .unwrap_or_default(),
            label: record_label(record),
        }
    }
}
