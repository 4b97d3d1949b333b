//! Selection-toggle protocol
//!
//! The rules by which a raw UI event becomes a state patch, and the one
//! place where "same point" is decided. Everything here is pure: helpers
//! take the current state and return either a new value or a ready-made
//! [`FilterPatch`] for the store.

use std::collections::BTreeSet;

use crate::record::Record;
use crate::state::{FilterPatch, FilterState, ScatterSelection};

/// Set-membership toggle: remove the value if present, insert it if not.
/// Applying the same toggle twice returns the set to its original value.
pub fn toggle_membership(set: &BTreeSet<String>, value: &str) -> BTreeSet<String> {
    let mut next = set.clone();
    if !next.remove(value) {
        next.insert(value.to_string());
    }
    next
}

/// Replace a selection set with the full universe of known values.
pub fn select_all<I>(universe: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = String>,
{
    universe.into_iter().collect()
}

/// Replace a selection set with the empty set ("all" semantics).
pub fn select_none() -> BTreeSet<String> {
    BTreeSet::new()
}

/// Patch for a job-title click in a multi-select.
pub fn toggle_job(state: &FilterState, title: &str) -> FilterPatch {
    FilterPatch::jobs(toggle_membership(&state.selected_jobs, title))
}

/// Patch for a map-country click. Accepts the display name and normalizes
/// to the lowercase location key before toggling.
pub fn toggle_country(state: &FilterState, name: &str) -> FilterPatch {
    let key = name.to_lowercase();
    FilterPatch::countries(toggle_membership(&state.selected_countries, &key))
}

/// Does the current selection point at this exact record?
///
/// Value equality over the (salary, job title, month) fingerprint; no
/// selection is never the same. An absent-month selection matches an
/// absent-month record, so monthless points deselect like any other.
pub fn is_same_selection(selection: Option<&ScatterSelection>, record: &Record) -> bool {
    let Some(selection) = selection else {
        return false;
    };
    record.salary_usd == Some(selection.salary_usd)
        && record.job_title == selection.job_title
        && record.month == selection.month
}

/// Compute the next scatter selection for a click on `record`.
///
/// Clicking the selected point clears the selection; clicking another point
/// captures its fingerprint. A record without a finite salary cannot become
/// a selection (a selection always carries a concrete salary), so clicking
/// one leaves the current selection as it is.
pub fn toggle_scatter(
    current: Option<&ScatterSelection>,
    record: &Record,
) -> Option<ScatterSelection> {
    if is_same_selection(current, record) {
        return None;
    }

    match record.salary_usd {
        Some(salary) if salary.is_finite() => Some(ScatterSelection {
            salary_usd: salary,
            job_title: record.job_title.clone(),
            month: record.month.clone(),
        }),
        _ => current.cloned(),
    }
}

/// Patch for a scatter-point click.
pub fn scatter_click(state: &FilterState, record: &Record) -> FilterPatch {
    FilterPatch::scatter(toggle_scatter(state.scatter_selection.as_ref(), record))
}

/// Patch clearing the scatter selection regardless of its current value.
pub fn clear_scatter() -> FilterPatch {
    FilterPatch::scatter(None)
}
