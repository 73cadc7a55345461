//! Word, link, domain and filetype frequency lists
//!
//! Raw occurrence lists are written out one item per line, not
//! deduplicated; the deduplicated count views back the report's top-N
//! lines. Occurrence counting over the raw files stays possible downstream.

use crate::analysis::PostDataset;
use crate::links;
use regex::Regex;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;

fn word_pattern() -> &'static Regex {
    static WORD_RE: OnceLock<Regex> = OnceLock::new();
    WORD_RE.get_or_init(|| Regex::new(r"\w+").expect("static word pattern is valid"))
}

/// All capitalized words across the dataset, in record order
///
/// A word is a contiguous word-character sequence of length >= 2 whose
/// first character is uppercase. Case-sensitive: a crude proper-noun
/// heuristic, nothing more.
pub fn capitalized_words(dataset: &PostDataset) -> Vec<String> {
    let mut words = Vec::new();

    for record in dataset.iter() {
        for found in word_pattern().find_iter(&record.text) {
            let word = found.as_str();
            let mut chars = word.chars();
            let starts_upper = chars.next().map(char::is_uppercase).unwrap_or(false);
            // chars has been advanced past the first character
            if starts_upper && chars.next().is_some() {
                words.push(word.to_string());
            }
        }
    }

    words
}

/// All raw link occurrences, in record order
pub fn link_occurrences(dataset: &PostDataset) -> Vec<String> {
    dataset.all_links().cloned().collect()
}

/// Every link's target domain, `www.`-normalized, in record order
pub fn domain_occurrences(dataset: &PostDataset) -> Vec<String> {
    dataset
        .all_links()
        .map(|link| links::normalize_domain(&links::SplitUrl::parse(link).host))
        .collect()
}

/// Every link's filetype, in record order
///
/// Links without a recognizable extension contribute nothing.
pub fn filetype_occurrences(dataset: &PostDataset) -> Vec<String> {
    dataset
        .all_links()
        .filter_map(|link| links::filetype_of(link))
        .collect()
}

/// Deduplicated occurrence counts, highest first
///
/// Ties are ordered lexically so the view is deterministic.
pub fn occurrence_counts(items: &[String]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for item in items {
        *counts.entry(item.as_str()).or_insert(0) += 1;
    }

    let mut view: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(item, count)| (item.to_string(), count))
        .collect();
    view.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    view
}

/// Writes a raw occurrence list, one item per line
pub fn write_lines(path: &Path, items: &[String]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    for item in items {
        writeln!(file, "{}", item)?;
    }
    Ok(())
}

/// Prints the top entries of a count view
pub fn print_top(label: &str, view: &[(String, usize)], limit: usize) {
    println!("Top {} {}:", limit.min(view.len()), label);
    for (item, count) in view.iter().take(limit) {
        println!("  {:6}  {}", count, item);
    }
    println!();
}
