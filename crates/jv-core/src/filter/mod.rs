//! Visibility predicate engine
//!
//! A record is visible iff it passes every clause: job, country, time, and
//! scatter selection. The clauses are independent and order-insensitive,
//! kept as a small ordered list so a future dimension is an append rather
//! than a rewrite of one monolithic condition. Evaluation is stateless and
//! recomputed on demand; nothing here is cached.

use crate::record::Record;
use crate::state::{FilterState, TimeMode};

/// Relative half-width of the scatter-selection salary band (±5%).
pub const SALARY_TOLERANCE: f64 = 0.05;

type Clause = fn(&Record, &FilterState) -> bool;

/// The conjunction evaluated by [`is_visible`], short-circuit AND.
const CLAUSES: [Clause; 4] = [job_clause, country_clause, time_clause, scatter_clause];

/// Decide whether a record passes the current filters.
pub fn is_visible(record: &Record, state: &FilterState) -> bool {
    CLAUSES.iter().all(|clause| clause(record, state))
}

/// Apply [`is_visible`] to a collection, preserving relative order.
pub fn filter_visible<'a>(records: &'a [Record], state: &FilterState) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|record| is_visible(record, state))
        .collect()
}

/// Empty selection = no restriction, otherwise exact title membership.
fn job_clause(record: &Record, state: &FilterState) -> bool {
    state.selected_jobs.is_empty() || state.selected_jobs.contains(&record.job_title)
}

/// Country membership over lowercase location keys on both sides.
fn country_clause(record: &Record, state: &FilterState) -> bool {
    state.selected_countries.is_empty() || state.selected_countries.contains(&record.location_key)
}

/// Overall mode passes everything; month mode requires an exact bucket
/// match. A record without a month never matches a selected month.
fn time_clause(record: &Record, state: &FilterState) -> bool {
    match state.time_mode {
        TimeMode::Overall => true,
        TimeMode::Month => match &state.selected_month {
            None => true,
            Some(month) => record.month.as_deref() == Some(month.as_str()),
        },
    }
}

/// Approximate match against the captured scatter point: salary within
/// tolerance, exact job title, and the point's month when it has one.
fn scatter_clause(record: &Record, state: &FilterState) -> bool {
    let Some(selection) = &state.scatter_selection else {
        return true;
    };

    salary_within_tolerance(record.salary_usd, selection.salary_usd)
        && record.job_title == selection.job_title
        && selection
            .month
            .as_ref()
            .map_or(true, |month| record.month.as_deref() == Some(month.as_str()))
}

/// Salary band test, bounds inclusive.
///
/// A missing or non-finite record salary cannot confirm a match and fails.
/// A non-finite target waives the check entirely (no constraint).
pub fn salary_within_tolerance(salary: Option<f64>, target: f64) -> bool {
    if !target.is_finite() {
        return true;
    }
    match salary {
        Some(value) if value.is_finite() => {
            let min = target * (1.0 - SALARY_TOLERANCE);
            let max = target * (1.0 + SALARY_TOLERANCE);
            value >= min && value <= max
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ScatterSelection;
    use std::collections::BTreeSet;

    fn record(job: &str, location: &str, month: Option<&str>, salary: Option<f64>) -> Record {
        Record {
            job_title: job.to_string(),
            company_location: location.to_string(),
            location_key: location.to_lowercase(),
            posting_date: None,
            month: month.map(str::to_string),
            salary_usd: salary,
            years_experience: Some(3.0),
            remote_ratio: Some(0),
            required_skills: BTreeSet::new(),
        }
    }

    fn month_state(month: &str) -> FilterState {
        FilterState {
            time_mode: TimeMode::Month,
            selected_month: Some(month.to_string()),
            ..FilterState::default()
        }
    }

    #[test]
    fn default_state_shows_everything() {
        let state = FilterState::default();
        let r = record("ML Engineer", "Germany", Some("2024-01"), Some(100_000.0));
        assert!(is_visible(&r, &state));
    }

    #[test]
    fn job_clause_restricts_to_selected_titles() {
        let mut state = FilterState::default();
        state.selected_jobs.insert("Data Scientist".to_string());

        assert!(!is_visible(
            &record("ML Engineer", "Germany", None, None),
            &state
        ));
        assert!(is_visible(
            &record("Data Scientist", "Germany", None, None),
            &state
        ));
    }

    #[test]
    fn country_clause_matches_on_lowercase_key() {
        let mut state = FilterState::default();
        state.selected_countries.insert("germany".to_string());

        assert!(is_visible(
            &record("ML Engineer", "Germany", None, None),
            &state
        ));
        assert!(!is_visible(
            &record("ML Engineer", "France", None, None),
            &state
        ));
    }

    #[test]
    fn month_mode_requires_exact_bucket() {
        let state = month_state("2024-03");

        assert!(is_visible(
            &record("ML Engineer", "Germany", Some("2024-03"), None),
            &state
        ));
        assert!(!is_visible(
            &record("ML Engineer", "Germany", Some("2024-02"), None),
            &state
        ));
        assert!(!is_visible(
            &record("ML Engineer", "Germany", None, None),
            &state
        ));
    }

    #[test]
    fn month_mode_without_selected_month_passes() {
        let state = FilterState {
            time_mode: TimeMode::Month,
            ..FilterState::default()
        };
        assert!(is_visible(
            &record("ML Engineer", "Germany", None, None),
            &state
        ));
    }

    #[test]
    fn salary_tolerance_bounds_are_inclusive() {
        assert!(salary_within_tolerance(Some(105_000.0), 100_000.0));
        assert!(!salary_within_tolerance(Some(105_001.0), 100_000.0));
        assert!(salary_within_tolerance(Some(95_000.0), 100_000.0));
        assert!(!salary_within_tolerance(Some(94_999.0), 100_000.0));
    }

    #[test]
    fn missing_salary_fails_unless_target_waived() {
        assert!(!salary_within_tolerance(None, 100_000.0));
        assert!(!salary_within_tolerance(Some(f64::NAN), 100_000.0));
        assert!(salary_within_tolerance(None, f64::NAN));
        assert!(salary_within_tolerance(Some(1.0), f64::INFINITY));
    }

    #[test]
    fn scatter_selection_without_month_waives_month_check() {
        let state = FilterState {
            scatter_selection: Some(ScatterSelection {
                salary_usd: 100_000.0,
                job_title: "Data Scientist".to_string(),
                month: None,
            }),
            ..FilterState::default()
        };

        // Salary within ±5%, job matches, month constraint waived.
        let r = record(
            "Data Scientist",
            "Germany",
            Some("2024-06"),
            Some(103_000.0),
        );
        assert!(is_visible(&r, &state));
    }

    #[test]
    fn scatter_selection_with_month_requires_that_month() {
        let state = FilterState {
            scatter_selection: Some(ScatterSelection {
                salary_usd: 100_000.0,
                job_title: "Data Scientist".to_string(),
                month: Some("2024-06".to_string()),
            }),
            ..FilterState::default()
        };

        let matching = record(
            "Data Scientist",
            "Germany",
            Some("2024-06"),
            Some(100_000.0),
        );
        let wrong_month = record(
            "Data Scientist",
            "Germany",
            Some("2024-07"),
            Some(100_000.0),
        );
        let no_month = record("Data Scientist", "Germany", None, Some(100_000.0));

        assert!(is_visible(&matching, &state));
        assert!(!is_visible(&wrong_month, &state));
        assert!(!is_visible(&no_month, &state));
    }

    #[test]
    fn filter_visible_is_stable_and_exact() {
        let records = vec![
            record("ML Engineer", "Germany", Some("2024-01"), Some(100_000.0)),
            record("ML Engineer", "Germany", Some("2024-02"), Some(100_000.0)),
        ];
        let state = month_state("2024-01");

        let visible = filter_visible(&records, &state);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].month.as_deref(), Some("2024-01"));
    }

    #[test]
    fn adding_a_constraint_never_grows_the_subset() {
        let records = vec![
            record("ML Engineer", "Germany", Some("2024-01"), Some(100_000.0)),
            record("Data Scientist", "France", Some("2024-02"), Some(90_000.0)),
            record("ML Engineer", "France", None, None),
        ];

        let unrestricted = FilterState::default();
        let mut narrowed = FilterState::default();
        narrowed.selected_jobs.insert("ML Engineer".to_string());

        let before: Vec<&Record> = filter_visible(&records, &unrestricted);
        let after: Vec<&Record> = filter_visible(&records, &narrowed);

        assert!(after.len() <= before.len());
        // Every record visible under the narrower state was visible before.
        for record in &after {
            assert!(before.iter().any(|r| std::ptr::eq(*r, *record)));
        }
    }
}
