//! Aggregate statistics over the post dataset
//!
//! Totals, per-day and per-post averages and maxima for each metric, the
//! blank-post count, a link classification breakdown and the longest
//! internal reference chain. Daily buckets are half-open: bucket start
//! inclusive, end exclusive.

use crate::analysis::PostDataset;
use crate::extract::PostRecord;
use crate::links;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// One metric line of the console report
#[derive(Debug, Clone)]
pub struct MetricSummary {
    pub label: &'static str,
    pub total: u64,
    pub per_day_avg: f64,
    /// None for the posts metric, which has no per-post columns
    pub per_post_avg: Option<f64>,
    pub per_day_max: u64,
    pub per_post_max: Option<u64>,
}

/// Classification tallies over every link in the dataset
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkBreakdown {
    pub internal: usize,
    pub internal_references: usize,
    pub external: usize,
    pub https: usize,
    pub http: usize,
    pub non_web: usize,
}

/// Longest chain of internal references found in the dataset
#[derive(Debug, Clone, Default)]
pub struct ChainSummary {
    pub depth: usize,
    /// Post the longest chain starts at; None when no chain exists
    pub start: Option<String>,
}

/// Everything the console report prints
#[derive(Debug, Clone)]
pub struct Report {
    pub days_spanned: i64,
    pub metrics: Vec<MetricSummary>,
    pub blank_posts: usize,
    pub links: LinkBreakdown,
    pub chain: ChainSummary,
}

/// Computes the full report over a dataset
pub fn build_report(dataset: &PostDataset, blog_domain: &str) -> Report {
    let days = days_spanned(dataset);

    let metrics = vec![
        metric(dataset, days, "Posts", |_| 1, false),
        metric(dataset, days, "Updates", |r| u64::from(r.updates), true),
        metric(dataset, days, "Quotes", |r| u64::from(r.quotes), true),
        metric(dataset, days, "Links", |r| r.links.len() as u64, true),
        metric(dataset, days, "Text length", |r| r.text_length() as u64, true),
    ];

    let blank_posts = dataset.iter().filter(|r| r.is_blank()).count();

    let all_links: Vec<String> = dataset.all_links().cloned().collect();
    let link_breakdown = LinkBreakdown {
        internal: links::count_internal_links(&all_links, blog_domain),
        internal_references: links::count_internal_references(&all_links, blog_domain),
        external: links::count_external_links(&all_links, blog_domain),
        https: links::count_prot(&all_links, "https", false, blog_domain),
        http: links::count_prot(&all_links, "http", false, blog_domain),
        non_web: links::count_non_web(&all_links),
    };

    Report {
        days_spanned: days,
        metrics,
        blank_posts,
        links: link_breakdown,
        chain: longest_chain(dataset, blog_domain),
    }
}

/// Calendar days from the first to the last record, inclusive
fn days_spanned(dataset: &PostDataset) -> i64 {
    match (dataset.records().first(), dataset.records().last()) {
        (Some(first), Some(last)) => {
            (last.created.date_naive() - first.created.date_naive()).num_days() + 1
        }
        _ => 0,
    }
}

fn metric(
    dataset: &PostDataset,
    days: i64,
    label: &'static str,
    value: impl Fn(&PostRecord) -> u64,
    per_post: bool,
) -> MetricSummary {
    let total: u64 = dataset.iter().map(&value).sum();
    let posts = dataset.len() as u64;

    let per_day_avg = if days > 0 {
        total as f64 / days as f64
    } else {
        0.0
    };
    let per_post_avg = per_post.then(|| {
        if posts > 0 {
            total as f64 / posts as f64
        } else {
            0.0
        }
    });
    let per_post_max = per_post.then(|| dataset.iter().map(&value).max().unwrap_or(0));

    MetricSummary {
        label,
        total,
        per_day_avg,
        per_post_avg,
        per_day_max: daily_max(dataset, &value),
        per_post_max,
    }
}

/// Sums a metric into daily buckets (start inclusive, end exclusive)
fn daily_totals(
    dataset: &PostDataset,
    value: impl Fn(&PostRecord) -> u64,
) -> BTreeMap<NaiveDate, u64> {
    let mut buckets = BTreeMap::new();
    for record in dataset.iter() {
        *buckets.entry(record.created.date_naive()).or_insert(0) += value(record);
    }
    buckets
}

/// Maximum daily aggregate; ties keep the earliest bucket's value
fn daily_max(dataset: &PostDataset, value: impl Fn(&PostRecord) -> u64) -> u64 {
    let mut max = 0;
    for (_, total) in daily_totals(dataset, value) {
        if total > max {
            max = total;
        }
    }
    max
}

/// Deepest internal reference chain over all posts
///
/// Ties keep the first post in dataset order.
fn longest_chain(dataset: &PostDataset, blog_domain: &str) -> ChainSummary {
    let map = dataset.links_by_post();
    let mut best = ChainSummary::default();

    for record in dataset.iter() {
        let depth = links::reference_chain_depth(&map, &record.name, blog_domain);
        if depth > best.depth {
            best = ChainSummary {
                depth,
                start: Some(record.name.clone()),
            };
        }
    }

    best
}

/// Prints the report to stdout
pub fn print_report(report: &Report) {
    println!("=== Blog Statistics ===\n");

    println!("Days spanned: {}", report.days_spanned);
    for metric in &report.metrics {
        println!(
            "{}: {} / per day (avg): {:.2} / per post (avg): {} / per day (max): {} / per post (max): {}",
            metric.label,
            metric.total,
            metric.per_day_avg,
            fmt_avg(metric.per_post_avg),
            metric.per_day_max,
            fmt_max(metric.per_post_max),
        );
    }
    println!();

    println!("Posts without links/media/quotes: {}", report.blank_posts);
    println!();

    println!("Link classification:");
    println!(
        "  Internal: {} ({} post references)",
        report.links.internal, report.links.internal_references
    );
    println!("  External: {}", report.links.external);
    println!(
        "  https: {} / http: {} / non-web: {}",
        report.links.https, report.links.http, report.links.non_web
    );
    match &report.chain.start {
        Some(start) => println!(
            "Longest internal reference chain: {} (starting at {})",
            report.chain.depth, start
        ),
        None => println!("Longest internal reference chain: 0"),
    }
}

fn fmt_avg(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{:.2}", value),
        None => "-".to_string(),
    }
}

fn fmt_max(value: Option<u64>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "-".to_string(),
    }
}
