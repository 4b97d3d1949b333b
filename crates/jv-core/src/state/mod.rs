//! Shared filter state
//!
//! A single [`FilterState`] drives every view. Views never edit it in
//! place; they submit a [`FilterPatch`] through the store and react to the
//! resulting change notification.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Time filtering mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeMode {
    /// No month constraint
    #[default]
    Overall,
    /// Exact-month constraint against `selected_month`
    Month,
}

/// Fingerprint of a clicked scatter point, used as an approximate-match
/// filter by the other views.
///
/// Always captured whole from one record: a selection carries a concrete
/// salary and job title, never a partial combination. Structural equality
/// (not identity) is what the toggle protocol compares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSelection {
    pub salary_usd: f64,
    pub job_title: String,
    /// Month of the clicked point; `None` imposes no month constraint
    pub month: Option<String>,
}

/// The shared selection state, single source of truth for all views.
///
/// Empty selection sets mean "no restriction". `selected_countries` holds
/// lowercase location keys, the one canonical form for location matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Selected job titles, empty = all
    pub selected_jobs: BTreeSet<String>,

    /// Selected countries as lowercase location keys, empty = all
    pub selected_countries: BTreeSet<String>,

    /// Overall vs. single-month filtering
    pub time_mode: TimeMode,

    /// Current month in `Month` mode, `YYYY-MM`
    pub selected_month: Option<String>,

    /// Active scatter-point selection, if any
    pub scatter_selection: Option<ScatterSelection>,
}

impl FilterState {
    /// Merge a patch, field-level replace: a field present in the patch
    /// fully replaces the current value, absent fields are untouched.
    pub fn apply(&mut self, patch: FilterPatch) {
        if let Some(jobs) = patch.selected_jobs {
            self.selected_jobs = jobs;
        }
        if let Some(countries) = patch.selected_countries {
            self.selected_countries = countries;
        }
        if let Some(mode) = patch.time_mode {
            self.time_mode = mode;
        }
        if let Some(month) = patch.selected_month {
            self.selected_month = month;
        }
        if let Some(selection) = patch.scatter_selection {
            self.scatter_selection = selection;
        }
    }
}

/// A partial [`FilterState`]: `Some` fields replace, `None` fields are left
/// alone. The clearable fields are double-wrapped so "set to absent" and
/// "don't touch" stay distinct.
#[derive(Debug, Clone, Default)]
pub struct FilterPatch {
    pub selected_jobs: Option<BTreeSet<String>>,
    pub selected_countries: Option<BTreeSet<String>>,
    pub time_mode: Option<TimeMode>,
    pub selected_month: Option<Option<String>>,
    pub scatter_selection: Option<Option<ScatterSelection>>,
}

impl FilterPatch {
    /// Replace the job selection.
    pub fn jobs(jobs: BTreeSet<String>) -> Self {
        Self {
            selected_jobs: Some(jobs),
            ..Self::default()
        }
    }

    /// Replace the country selection (lowercase location keys).
    pub fn countries(countries: BTreeSet<String>) -> Self {
        Self {
            selected_countries: Some(countries),
            ..Self::default()
        }
    }

    /// Replace the time mode.
    pub fn time_mode(mode: TimeMode) -> Self {
        Self {
            time_mode: Some(mode),
            ..Self::default()
        }
    }

    /// Replace the selected month.
    pub fn month(month: Option<String>) -> Self {
        Self {
            selected_month: Some(month),
            ..Self::default()
        }
    }

    /// Replace (or clear) the scatter selection.
    pub fn scatter(selection: Option<ScatterSelection>) -> Self {
        Self {
            scatter_selection: Some(selection),
            ..Self::default()
        }
    }
}
