//! Time-of-day posting histogram
//!
//! All post timestamps are bucketed into fixed 30-minute slots of the day,
//! date ignored, summed across the whole corpus. The corrected variant
//! drops every post created before the configured cutover, compensating for
//! early archive entries whose file times do not reflect the true local
//! posting time.

use crate::analysis::PostDataset;
use chrono::{NaiveDateTime, NaiveTime, Timelike};

/// Width of one slot in minutes
pub const SLOT_MINUTES: u32 = 30;

/// Number of slots in a day
pub const SLOTS_PER_DAY: usize = (24 * 60 / SLOT_MINUTES) as usize;

/// Post counts per 30-minute slot of the day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeOfDayHistogram {
    counts: [u64; SLOTS_PER_DAY],
}

impl TimeOfDayHistogram {
    /// Buckets every record's creation time of day
    ///
    /// With a cutover set, records created at or before it are excluded.
    pub fn from_dataset(dataset: &PostDataset, cutover: Option<NaiveDateTime>) -> Self {
        let mut counts = [0u64; SLOTS_PER_DAY];

        for record in dataset.iter() {
            let local = record.created.naive_local();
            if let Some(cutover) = cutover {
                if local <= cutover {
                    continue;
                }
            }
            counts[slot_of(local.time())] += 1;
        }

        Self { counts }
    }

    pub fn counts(&self) -> &[u64; SLOTS_PER_DAY] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Labels for all slots, `00:00` through `23:30`
    pub fn labels() -> Vec<String> {
        (0..SLOTS_PER_DAY).map(slot_label).collect()
    }
}

/// Slot index for a time of day
pub fn slot_of(time: NaiveTime) -> usize {
    (time.hour() * (60 / SLOT_MINUTES) + time.minute() / SLOT_MINUTES) as usize
}

/// `HH:MM` label of a slot's start
pub fn slot_label(slot: usize) -> String {
    let minutes = slot as u32 * SLOT_MINUTES;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::PostRecord;
    use chrono::{DateTime, Local, TimeZone};

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
    fn test_slot_of() {
        let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        assert_eq!(slot_of(t(0, 0)), 0);
        assert_eq!(slot_of(t(0, 29)), 0);
        assert_eq!(slot_of(t(0, 30)), 1);
        assert_eq!(slot_of(t(12, 30)), 25);
        assert_eq!(slot_of(t(23, 59)), 47);
    }

    #[test]
    fn test_slot_label() {
        assert_eq!(slot_label(0), "00:00");
        assert_eq!(slot_label(1), "00:30");
        assert_eq!(slot_label(25), "12:30");
        assert_eq!(slot_label(47), "23:30");
    }

    #[test]
    fn test_labels_cover_day() {
        let labels = TimeOfDayHistogram::labels();
        assert_eq!(labels.len(), SLOTS_PER_DAY);
        assert_eq!(labels.first().map(String::as_str), Some("00:00"));
        assert_eq!(labels.last().map(String::as_str), Some("23:30"));
    }

    #[test]
    fn test_histogram_sums_across_days() {
        let dataset = PostDataset::from_records(vec![
            record("a", "2005-03-07 14:10"),
            record("b", "2005-04-01 14:20"),
            record("c", "2005-04-01 15:00"),
        ]);
        let histogram = TimeOfDayHistogram::from_dataset(&dataset, None);

        // Same slot on different days accumulates
        assert_eq!(histogram.counts()[slot_of(NaiveTime::from_hms_opt(14, 0, 0).unwrap())], 2);
        assert_eq!(histogram.counts()[slot_of(NaiveTime::from_hms_opt(15, 0, 0).unwrap())], 1);
        assert_eq!(histogram.total(), 3);
    }

    #[test]
    fn test_histogram_cutover_excludes_early_posts() {
        let dataset = PostDataset::from_records(vec![
            record("early", "2005-03-07 14:10"),
            record("late", "2005-08-01 14:20"),
        ]);
        let cutover =
            NaiveDateTime::parse_from_str("2005-07-01 13:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let histogram = TimeOfDayHistogram::from_dataset(&dataset, Some(cutover));

        assert_eq!(histogram.total(), 1);
    }
}
