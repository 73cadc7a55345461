//! Immutable time-ordered dataset of post records

use crate::extract::PostRecord;
use std::collections::HashMap;

/// All extracted post records, sorted ascending by creation timestamp
///
/// Built once from the extraction pass and passed by reference to every
/// consumer; nothing mutates it afterwards.
#[derive(Debug)]
pub struct PostDataset {
    records: Vec<PostRecord>,
}

impl PostDataset {
    /// Builds the dataset, sorting records by creation timestamp
    ///
    /// The sort is stable, so records sharing a timestamp keep their
    /// extraction order.
    pub fn from_records(mut records: Vec<PostRecord>) -> Self {
        records.sort_by_key(|record| record.created);
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in ascending creation order
    pub fn records(&self) -> &[PostRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &PostRecord> {
        self.records.iter()
    }

    /// Looks up a record by post identifier
    pub fn get(&self, name: &str) -> Option<&PostRecord> {
        self.records.iter().find(|record| record.name == name)
    }

    /// All links across the dataset, in record order
    pub fn all_links(&self) -> impl Iterator<Item = &String> {
        self.records.iter().flat_map(|record| record.links.iter())
    }

    /// Per-post link lists, keyed by post identifier
    ///
    /// This is the adjacency map the reference chain traversal walks.
    pub fn links_by_post(&self) -> HashMap<String, Vec<String>> {
        self.records
            .iter()
            .map(|record| (record.name.clone(), record.links.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

    fn record(name: &str, created: &str) -> PostRecord {
        let naive = NaiveDateTime::parse_from_str(created, "%Y-%m-%d %H:%M").unwrap();
        let created: DateTime<Local> = Local.from_local_datetime(&naive).unwrap();
        PostRecord {
            name: name.to_string(),
            created,
            text: String::new(),
            updates: 0,
            quotes: 0,
            tables: 0,
            links: Vec::new(),
            images: Vec::new(),
            videos: Vec::new(),
            audios: Vec::new(),
        }
    }

    #[test]
    fn test_records_sorted_by_creation_time() {
        let dataset = PostDataset::from_records(vec![
            record("c", "2005-03-09 10:00"),
            record("a", "2005-03-07 10:00"),
            record("b", "2005-03-08 10:00"),
        ]);
        let names: Vec<_> = dataset.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_get_by_name() {
        let dataset = PostDataset::from_records(vec![record("a", "2005-03-07 10:00")]);
        assert!(dataset.get("a").is_some());
        assert!(dataset.get("z").is_none());
    }

    #[test]
    fn test_all_links_in_record_order() {
        let mut first = record("a", "2005-03-07 10:00");
        first.links.push("http://one.example/".to_string());
        let mut second = record("b", "2005-03-08 10:00");
        second.links.push("http://two.example/".to_string());
        second.links.push("http://three.example/".to_string());

        let dataset = PostDataset::from_records(vec![second, first]);
        let links: Vec<_> = dataset.all_links().cloned().collect();
        assert_eq!(
            links,
            vec![
                "http://one.example/",
                "http://two.example/",
                "http://three.example/"
            ]
        );
    }

    #[test]
    fn test_links_by_post() {
        let mut rec = record("a", "2005-03-07 10:00");
        rec.links.push("?ts=b".to_string());
        let dataset = PostDataset::from_records(vec![rec]);
        let map = dataset.links_by_post();
        assert_eq!(map["a"], vec!["?ts=b"]);
    }
}
