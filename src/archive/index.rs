//! Index crawler
//!
//! Enumerates the configured month range, fetches each month's index page
//! if absent, and extracts post references from every stored index page.
//! A month that failed to download is simply absent from the store and
//! contributes no references.

use crate::archive::fetcher::{fetch_into_store, FetchTally};
use crate::config::{Config, RangeConfig};
use crate::store::ContentStore;
use crate::Result;
use reqwest::Client;
use scraper::{Html, Selector};

/// Visible anchor text marking a post permalink on index pages
const POST_LINK_MARKER: &str = "[l]";

/// Iterator over every (year, month) in an inclusive month range
#[derive(Debug, Clone)]
pub struct MonthRange {
    year: i32,
    month: u32,
    end_year: i32,
    end_month: u32,
}

impl MonthRange {
    pub fn new(range: &RangeConfig) -> Self {
        Self {
            year: range.start_year,
            month: range.start_month,
            end_year: range.end_year,
            end_month: range.end_month,
        }
    }
}

impl Iterator for MonthRange {
    type Item = (i32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if (self.year, self.month) > (self.end_year, self.end_month) {
            return None;
        }
        let current = (self.year, self.month);
        if self.month == 12 {
            self.year += 1;
            self.month = 1;
        } else {
            self.month += 1;
        }
        Some(current)
    }
}

/// Derives the zero-padded `YYYYMM` identifier for a month
///
/// The identifier doubles as the store key and the index URL suffix.
pub fn month_key(year: i32, month: u32) -> String {
    format!("{}{:02}", year, month)
}

/// Fetches every missing index page in the configured range
pub async fn fetch_month_indexes(
    client: &Client,
    config: &Config,
    store: &ContentStore,
) -> Result<FetchTally> {
    let mut tally = FetchTally::default();

    for (year, month) in MonthRange::new(&config.range) {
        let key = month_key(year, month);
        let url = format!("{}{}", config.blog.month_url, key);
        let outcome = fetch_into_store(client, &url, store, &key).await?;
        tally.record(&outcome);
    }

    Ok(tally)
}

/// Extracts post references from one index page
///
/// A post reference is the href of an anchor whose visible text is exactly
/// the `[l]` marker. References come back in document order.
pub fn extract_post_refs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut refs = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            let text: String = element.text().collect();
            if text != POST_LINK_MARKER {
                continue;
            }
            if let Some(href) = element.value().attr("href") {
                refs.push(href.to_string());
            }
        }
    }

    refs
}

/// Extracts post references from every stored index page
///
/// All stored pages are parsed, not only the ones fetched this run, so an
/// interrupted archive resumes with the full reference set.
pub fn collect_post_refs(store: &ContentStore) -> Result<Vec<String>> {
    let mut refs = Vec::new();

    for key in store.keys()? {
        let raw = store.read(&key)?;
        let html = String::from_utf8_lossy(&raw);
        let page_refs = extract_post_refs(&html);
        tracing::debug!("{}: {} post references", key, page_refs.len());
        refs.extend(page_refs);
    }

    Ok(refs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn range(start: (i32, u32), end: (i32, u32)) -> RangeConfig {
        RangeConfig {
            start_year: start.0,
            start_month: start.1,
            end_year: end.0,
            end_month: end.1,
        }
    }

    #[test]
    fn test_month_key_zero_pads() {
        assert_eq!(month_key(2005, 3), "200503");
        assert_eq!(month_key(2017, 12), "201712");
    }

    #[test]
    fn test_month_range_within_year() {
        let months: Vec<_> = MonthRange::new(&range((2005, 3), (2005, 5))).collect();
        assert_eq!(months, vec![(2005, 3), (2005, 4), (2005, 5)]);
    }

    #[test]
    fn test_month_range_across_years() {
        let months: Vec<_> = MonthRange::new(&range((2005, 11), (2006, 2))).collect();
        assert_eq!(months, vec![(2005, 11), (2005, 12), (2006, 1), (2006, 2)]);
    }

    #[test]
    fn test_month_range_single_month() {
        let months: Vec<_> = MonthRange::new(&range((2017, 2), (2017, 2))).collect();
        assert_eq!(months, vec![(2017, 2)]);
    }

    #[test]
    fn test_extract_post_refs_in_document_order() {
        let html = r#"<html><body><ul>
            <li><a href="?ts=aaa">[l]</a> first post</li>
            <li><a href="?ts=bbb">[l]</a> second post</li>
            <li><a href="?ts=ccc">[l]</a> third post</li>
        </ul></body></html>"#;
        assert_eq!(extract_post_refs(html), vec!["?ts=aaa", "?ts=bbb", "?ts=ccc"]);
    }

    #[test]
    fn test_extract_post_refs_ignores_other_anchors() {
        let html = r#"<html><body>
            <a href="?mon=200502">previous month</a>
            <a href="?ts=aaa">[l]</a>
            <a href="https://www.heise.de/">[link]</a>
            <a href="?ts=zzz">permalink</a>
        </body></html>"#;
        assert_eq!(extract_post_refs(html), vec!["?ts=aaa"]);
    }

    #[test]
    fn test_extract_post_refs_empty_page() {
        assert!(extract_post_refs("<html><body></body></html>").is_empty());
    }

    #[test]
    fn test_collect_post_refs_over_all_pages() {
        let dir = TempDir::new().unwrap();
        let store = ContentStore::create(dir.path().join("month")).unwrap();
        store
            .write("200504", br#"<a href="?ts=bbb">[l]</a>"#)
            .unwrap();
        store
            .write("200503", br#"<a href="?ts=aaa">[l]</a>"#)
            .unwrap();

        // Keys iterate sorted, so references come back in month order
        let refs = collect_post_refs(&store).unwrap();
        assert_eq!(refs, vec!["?ts=aaa", "?ts=bbb"]);
    }
}
