//! Choropleth map view model
//!
//! Per-country counts over the visible subset, the color-scale domain
//! derived from them, the hover summary, and the detail table shown under
//! the map. The map itself (projection, paths, legend gradient) is the
//! renderer's business.

use ahash::AHashMap;
use serde::Serialize;

use jv_core::aggregate::{count_by, mean_of, min_mid_max};
use jv_core::filter::{filter_visible, is_visible, SALARY_TOLERANCE};
use jv_core::record::Record;
use jv_core::state::{FilterState, ScatterSelection, TimeMode};

/// Tooltip payload for one hovered country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryHover {
    pub jobs: usize,
    /// Mean remote ratio, rounded to whole percent
    pub avg_remote: i64,
}

/// One row of the detail table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryRow {
    /// Display-form country name
    pub country: String,
    pub jobs: usize,
    /// Mean salary, rounded to whole dollars
    pub avg_salary: i64,
    /// Mean remote ratio, rounded to whole percent
    pub avg_remote: i64,
}

/// The detail table shown when a country or scatter selection is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailsTable {
    /// Table heading: the selected month in month mode, else "Overall"
    pub caption: String,
    pub rows: Vec<CountryRow>,
}

/// Job counts per location key over the visible subset.
pub fn country_counts(records: &[Record], state: &FilterState) -> AHashMap<String, usize> {
    let visible = filter_visible(records, state);
    count_by(visible, |record| record.location_key.clone())
}

/// Color-scale domain for the current counts.
pub fn color_domain(counts: &AHashMap<String, usize>) -> (usize, usize, usize) {
    min_mid_max(counts.values().copied())
}

/// Summary for a hovered country.
///
/// Honors every filter except the country selection itself: hovering any
/// country reports its stats even while another country is selected.
pub fn hover_summary(records: &[Record], state: &FilterState, location_key: &str) -> CountryHover {
    let mut relaxed = state.clone();
    relaxed.selected_countries.clear();

    let rows: Vec<&Record> = records
        .iter()
        .filter(|record| record.location_key == location_key && is_visible(record, &relaxed))
        .collect();

    CountryHover {
        jobs: rows.len(),
        avg_remote: round(mean_of(rows.iter().copied(), |record| {
            record.remote_ratio.map(|ratio| ratio as f64)
        })),
    }
}

/// Build the detail table, or `None` when nothing is selected.
///
/// Countries shown are the selected set (even when a selected country has
/// no visible postings), otherwise every country present in the visible
/// subset, sorted by key.
pub fn details(records: &[Record], state: &FilterState) -> Option<DetailsTable> {
    let scatter_active = state.scatter_selection.is_some();
    if state.selected_countries.is_empty() && !scatter_active {
        return None;
    }

    let visible = filter_visible(records, state);

    let keys: Vec<String> = if !state.selected_countries.is_empty() {
        state.selected_countries.iter().cloned().collect()
    } else {
        let mut keys: Vec<String> = visible.iter().map(|r| r.location_key.clone()).collect();
        keys.sort();
        keys.dedup();
        keys
    };

    let rows = keys
        .into_iter()
        .map(|key| {
            let in_country: Vec<&Record> = visible
                .iter()
                .copied()
                .filter(|record| record.location_key == key)
                .collect();

            CountryRow {
                country: display_name(records, &key),
                jobs: in_country.len(),
                avg_salary: round(mean_of(in_country.iter().copied(), |r| r.salary_usd)),
                avg_remote: round(mean_of(in_country.iter().copied(), |r| {
                    r.remote_ratio.map(|ratio| ratio as f64)
                })),
            }
        })
        .collect();

    Some(DetailsTable {
        caption: caption(state),
        rows,
    })
}

/// Rounded salary band of a scatter selection, for the filter hint line.
pub fn salary_band(selection: &ScatterSelection) -> (i64, i64) {
    let min = selection.salary_usd * (1.0 - SALARY_TOLERANCE);
    let max = selection.salary_usd * (1.0 + SALARY_TOLERANCE);
    (round(min), round(max))
}

fn caption(state: &FilterState) -> String {
    match state.time_mode {
        TimeMode::Month => state.selected_month.clone().unwrap_or_default(),
        TimeMode::Overall => "Overall".to_string(),
    }
}

/// Display form of a location key, taken from the first record carrying it.
fn display_name(records: &[Record], key: &str) -> String {
    records
        .iter()
        .find(|record| record.location_key == key)
        .map(|record| record.company_location.clone())
        .unwrap_or_else(|| key.to_string())
}

fn round(value: f64) -> i64 {
    value.round() as i64
}
