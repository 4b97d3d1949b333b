//! Skills bar chart view model
//!
//! Skill checkboxes with view-local selection and the per-job-title totals
//! behind the bars. This chart intentionally works over the full record
//! collection rather than the cross-filtered subset, matching the dashboard
//! it models.

use std::collections::BTreeSet;

use serde::Serialize;

use jv_core::aggregate::count_by;
use jv_core::record::Record;

/// Skill pre-selected on load and re-instated when the selection empties.
pub const DEFAULT_SKILL: &str = "Python";

/// Maximum number of bars shown.
const TOP_JOBS: usize = 20;

/// One bar: a job title and how many postings require a selected skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobTotal {
    pub job_title: String,
    pub total: usize,
}

/// The skill checkbox panel and its selection.
///
/// The selection never goes empty: clearing the last skill re-instates the
/// default (or the first known skill when the default is absent from the
/// dataset).
#[derive(Debug, Clone, Serialize)]
pub struct SkillsBoard {
    skills: Vec<String>,
    selected: BTreeSet<String>,
}

impl SkillsBoard {
    /// Build the board from the full record collection. The skill universe
    /// is sorted ascending with the default skill pinned first.
    pub fn new(records: &[Record]) -> Self {
        let mut skills: Vec<String> = records
            .iter()
            .flat_map(|record| record.required_skills.iter().cloned())
            .collect();
        skills.sort();
        skills.dedup();
        if let Some(position) = skills.iter().position(|skill| skill == DEFAULT_SKILL) {
            let default = skills.remove(position);
            skills.insert(0, default);
        }

        let mut board = Self {
            skills,
            selected: BTreeSet::new(),
        };
        board.reset_selection();
        board
    }

    /// All known skills in display order.
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Currently selected skills.
    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn is_selected(&self, skill: &str) -> bool {
        self.selected.contains(skill)
    }

    /// Checkbox toggle. Emptying the selection falls back to the default.
    pub fn toggle(&mut self, skill: &str) {
        if !self.selected.remove(skill) {
            if self.skills.iter().any(|known| known == skill) {
                self.selected.insert(skill.to_string());
            }
            return;
        }
        if self.selected.is_empty() {
            self.reset_selection();
        }
    }

    /// Postings whose skills intersect the selection, grouped by job title,
    /// top bars first.
    pub fn job_totals(&self, records: &[Record]) -> Vec<JobTotal> {
        let matching = records
            .iter()
            .filter(|record| record.required_skills.iter().any(|s| self.selected.contains(s)));

        let counts = count_by(matching, |record| record.job_title.clone());

        let mut totals: Vec<JobTotal> = counts
            .into_iter()
            .map(|(job_title, total)| JobTotal { job_title, total })
            .collect();
        totals.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.job_title.cmp(&b.job_title)));
        totals.truncate(TOP_JOBS);
        totals
    }

    fn reset_selection(&mut self) {
        self.selected.clear();
        let fallback = self
            .skills
            .iter()
            .find(|skill| *skill == DEFAULT_SKILL)
            .or_else(|| self.skills.first());
        if let Some(skill) = fallback {
            self.selected.insert(skill.clone());
        }
    }
}
