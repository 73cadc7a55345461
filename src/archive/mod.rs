//! Archive module: retrieval pipeline
//!
//! This module populates the two content stores:
//! - the index crawler derives one `YYYYMM` identifier per month in the
//!   configured range and fetches each missing index page
//! - post references are extracted from every stored index page via the
//!   `[l]` anchor marker
//! - the post crawler fetches each referenced post page that is absent
//!
//! All fetches are sequential and idempotent; a re-run skips every
//! identifier that is already stored.

mod fetcher;
mod index;
mod posts;

pub use fetcher::{build_http_client, fetch_into_store, FetchOutcome, FetchTally};
pub use index::{collect_post_refs, extract_post_refs, fetch_month_indexes, month_key, MonthRange};
pub use posts::{fetch_posts, post_key};

use crate::config::Config;
use crate::store::ContentStore;
use crate::Result;

/// Counts describing one archive run
#[derive(Debug, Default, Clone, Copy)]
pub struct ArchiveSummary {
    /// Month index page fetch totals
    pub months: FetchTally,
    /// Post references found across all stored index pages
    pub refs_discovered: usize,
    /// Post page fetch totals
    pub posts: FetchTally,
}

/// Runs the complete archive pipeline
///
/// Fetches missing month index pages, extracts post references from every
/// stored index page, then fetches missing post pages. Transport failures
/// shrink the archive but never abort the run.
pub async fn run_archive(config: &Config) -> Result<ArchiveSummary> {
    let client = build_http_client(&config.client.user_agent)?;

    let month_store = ContentStore::create(&config.archive.month_dir)?;
    let post_store = ContentStore::create(&config.archive.post_dir)?;

    tracing::info!(
        "Archiving months {}..={}",
        month_key(config.range.start_year, config.range.start_month),
        month_key(config.range.end_year, config.range.end_month)
    );
    let months = fetch_month_indexes(&client, config, &month_store).await?;
    tracing::info!(
        "Month indexes: {} fetched, {} already archived, {} failed",
        months.stored,
        months.skipped,
        months.failed
    );

    let refs = collect_post_refs(&month_store)?;
    tracing::info!("Discovered {} post references", refs.len());

    let posts = fetch_posts(&client, config, &post_store, &refs).await?;
    tracing::info!(
        "Posts: {} fetched, {} already archived, {} failed",
        posts.stored,
        posts.skipped,
        posts.failed
    );

    Ok(ArchiveSummary {
        months,
        refs_discovered: refs.len(),
        posts,
    })
}
