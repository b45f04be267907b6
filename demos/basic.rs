//! Basic example demonstrating the SCUTTLE API client.
//!
//! Run with:
//! ```
//! SCUTTLE_API_KEY=your-key cargo run --example basic
//! ```

use scuttle::{Direction, PageRequest, Revision, Scuttle, WikiPage};

#[tokio::main]
async fn main() -> scuttle::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Connect to the English wiki from environment variables
    println!("Connecting to SCUTTLE...");
    let wiki = Scuttle::from_env("en")?;
    println!("Connected to: {} ({})", wiki.domain(), wiki.version());

    // Look up a page by slug
    println!("\n--- Page Details ---");
    let page: WikiPage = serde_json::from_value(wiki.page_by_slug("main").await?)?;
    println!("Page: {}", page.slug);
    println!("  ID: {}", page.id);
    println!("  Wikidot ID: {:?}", page.wd_page_id);
    println!("  Full name: {}", page.fullname().unwrap_or("unknown"));

    // Tags come back in one plain call
    let tags = wiki.page_tags(page.id).await?;
    println!("  Tags: {}", tags);

    // Walk the revision history, newest first, 50 at a time
    println!("\n--- Latest Revisions ---");
    let mut walk = wiki.verbose(
        wiki.page_revisions(),
        vec![page.id.into()],
        PageRequest::default()
            .with_limit(50)
            .with_direction(Direction::Descending),
    )?;

    let mut total = 0;
    while let Some(revisions) = walk.next_page().await? {
        let revisions = revisions.decode::<Revision>()?;
        for revision in revisions.iter().take(5usize.saturating_sub(total)) {
            let when = revision
                .timestamp()
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "unknown".to_string());
            println!("  #{} on {}", revision.revision_number(), when);
        }
        total += revisions.len();
    }
    println!("Found {} revisions", total);

    println!("\nDone!");
    Ok(())
}
