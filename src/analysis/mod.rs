//! Analysis module: statistics over the archived posts
//!
//! Consumes the post content store, extracts one record per post and
//! computes:
//! - the console report (totals, averages, daily and per-post maxima,
//!   blank posts, link classification, longest reference chain)
//! - raw word/link/domain/filetype occurrence lists
//! - the posting-time-of-day bar charts (raw and cutover-corrected)

mod chart;
mod dataset;
mod frequency;
mod histogram;
mod stats;

pub use chart::render_bar_chart;
pub use dataset::PostDataset;
pub use frequency::{
    capitalized_words, domain_occurrences, filetype_occurrences, link_occurrences,
    occurrence_counts, print_top, write_lines,
};
pub use histogram::{slot_label, slot_of, TimeOfDayHistogram, SLOTS_PER_DAY, SLOT_MINUTES};
pub use stats::{build_report, print_report, ChainSummary, LinkBreakdown, MetricSummary, Report};

use crate::config::Config;
use crate::extract::extract_records;
use crate::store::ContentStore;
use crate::{FefelogError, Result};
use std::path::Path;

/// Number of entries shown per frequency table in the console report
const TOP_ENTRIES: usize = 10;

/// Runs the complete analysis pass
///
/// Opens the post store (an archive run must have happened), extracts all
/// records, prints the report, writes the raw occurrence lists and renders
/// both posting-time charts.
pub fn run_analysis(config: &Config) -> Result<()> {
    let store = ContentStore::open(&config.archive.post_dir)?;

    let records = extract_records(&store)?;
    if records.is_empty() {
        return Err(FefelogError::EmptyArchive);
    }
    let dataset = PostDataset::from_records(records);

    let report = build_report(&dataset, &config.blog.domain);
    print_report(&report);
    println!();

    let words = capitalized_words(&dataset);
    let links = link_occurrences(&dataset);
    let domains = domain_occurrences(&dataset);
    let filetypes = filetype_occurrences(&dataset);

    print_top("words", &occurrence_counts(&words), TOP_ENTRIES);
    print_top("domains", &occurrence_counts(&domains), TOP_ENTRIES);
    print_top("filetypes", &occurrence_counts(&filetypes), TOP_ENTRIES);

    for (path, items) in [
        (&config.output.words_path, &words),
        (&config.output.links_path, &links),
        (&config.output.domains_path, &domains),
        (&config.output.filetypes_path, &filetypes),
    ] {
        write_lines(Path::new(path), items)?;
        tracing::info!("Wrote {} entries to {}", items.len(), path);
    }

    render_time_charts(config, &dataset)?;

    Ok(())
}

/// Renders the raw and cutover-corrected posting-time charts
fn render_time_charts(config: &Config, dataset: &PostDataset) -> Result<()> {
    let labels = TimeOfDayHistogram::labels();

    let raw = TimeOfDayHistogram::from_dataset(dataset, None);
    render_bar_chart(
        &labels,
        raw.counts(),
        "Number of posts",
        Some(config.analysis.highlight_slot),
        Path::new(&config.output.times_chart_path),
    )?;
    tracing::info!(
        "Rendered posting-time chart ({} posts) to {}",
        raw.total(),
        config.output.times_chart_path
    );

    let cutover = config.analysis.cutover_time().map_err(FefelogError::Config)?;
    let fixed = TimeOfDayHistogram::from_dataset(dataset, Some(cutover));
    render_bar_chart(
        &labels,
        fixed.counts(),
        "Number of posts",
        None,
        Path::new(&config.output.times_chart_fixed_path),
    )?;
    tracing::info!(
        "Rendered corrected posting-time chart ({} posts) to {}",
        fixed.total(),
        config.output.times_chart_fixed_path
    );

    Ok(())
}
