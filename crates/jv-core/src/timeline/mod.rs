//! Month timeline
//!
//! The sorted list of `YYYY-MM` buckets present in the dataset, backing the
//! month slider and auto-play. Lexicographic order of the bucket strings is
//! chronological order. Auto-play itself is external; the core only
//! supplies the wrap-around step.

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Sorted, deduplicated month buckets for slider-style navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthTimeline {
    months: Vec<String>,
}

impl MonthTimeline {
    /// Collect the distinct months across a record collection.
    pub fn from_records(records: &[Record]) -> Self {
        let mut months: Vec<String> = records
            .iter()
            .filter_map(|record| record.month.clone())
            .collect();
        months.sort();
        months.dedup();
        Self { months }
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn months(&self) -> &[String] {
        &self.months
    }

    /// Month at a slider index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.months.get(index).map(String::as_str)
    }

    /// Slider index of a month.
    pub fn position(&self, month: &str) -> Option<usize> {
        self.months.iter().position(|m| m == month)
    }

    pub fn first(&self) -> Option<&str> {
        self.get(0)
    }

    /// Next slider index, wrapping at the end (the auto-play step).
    pub fn next_index(&self, index: usize) -> usize {
        if self.months.is_empty() {
            0
        } else {
            (index + 1) % self.months.len()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn record(month: Option<&str>) -> Record {
        Record {
            job_title: "ML Engineer".to_string(),
            company_location: "Germany".to_string(),
            location_key: "germany".to_string(),
            posting_date: None,
            month: month.map(str::to_string),
            salary_usd: None,
            years_experience: None,
            remote_ratio: Some(0),
            required_skills: BTreeSet::new(),
        }
    }

    #[test]
    fn months_are_sorted_and_deduplicated() {
        let records = vec![
            record(Some("2024-03")),
            record(Some("2024-01")),
            record(None),
            record(Some("2024-03")),
            record(Some("2023-12")),
        ];
        let timeline = MonthTimeline::from_records(&records);

        assert_eq!(timeline.months(), ["2023-12", "2024-01", "2024-03"]);
        assert_eq!(timeline.first(), Some("2023-12"));
        assert_eq!(timeline.position("2024-01"), Some(1));
        assert_eq!(timeline.get(5), None);
    }

    #[test]
    fn next_index_wraps_around() {
        let records = vec![record(Some("2024-01")), record(Some("2024-02"))];
        let timeline = MonthTimeline::from_records(&records);

        assert_eq!(timeline.next_index(0), 1);
        assert_eq!(timeline.next_index(1), 0);
    }

    #[test]
    fn empty_timeline_is_safe() {
        let timeline = MonthTimeline::from_records(&[]);
        assert!(timeline.is_empty());
        assert_eq!(timeline.next_index(0), 0);
        assert_eq!(timeline.first(), None);
    }
}
