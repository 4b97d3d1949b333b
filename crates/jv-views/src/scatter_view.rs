//! Scatter plot view model
//!
//! Experience-vs-salary points for the visible subset. The scatter plot is
//! the one view that does NOT filter by the scatter selection (it
//! highlights the selected point instead), so its visibility check runs
//! with that clause relaxed.

use serde::Serialize;

use jv_core::filter::is_visible;
use jv_core::record::{Record, RemoteKind};
use jv_core::state::{FilterState, TimeMode};
use jv_core::toggle::is_same_selection;

/// One plottable point. Records without a finite salary or experience have
/// no position and are omitted.
#[derive(Debug, Clone, Serialize)]
pub struct ScatterPoint<'a> {
    #[serde(skip)]
    pub record: &'a Record,
    pub experience: f64,
    pub salary: f64,
    /// Work-mode category driving the point color, `None` = unrecognized
    pub remote: Option<RemoteKind>,
    /// Whether this point is the current scatter selection (highlight)
    pub selected: bool,
}

/// Axis domains for the current point set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisExtents {
    pub experience: (f64, f64),
    pub salary: (f64, f64),
}

/// Points visible under every clause except the scatter selection.
pub fn scatter_points<'a>(records: &'a [Record], state: &FilterState) -> Vec<ScatterPoint<'a>> {
    let mut relaxed = state.clone();
    relaxed.scatter_selection = None;

    records
        .iter()
        .filter(|record| is_visible(record, &relaxed))
        .filter_map(|record| {
            let experience = finite(record.years_experience)?;
            let salary = finite(record.salary_usd)?;
            Some(ScatterPoint {
                record,
                experience,
                salary,
                remote: record.remote_kind(),
                selected: is_same_selection(state.scatter_selection.as_ref(), record),
            })
        })
        .collect()
}

/// Min/max of both axes, `None` when there are no points.
pub fn axis_extents(points: &[ScatterPoint<'_>]) -> Option<AxisExtents> {
    let first = points.first()?;
    let mut extents = AxisExtents {
        experience: (first.experience, first.experience),
        salary: (first.salary, first.salary),
    };

    for point in &points[1..] {
        extents.experience.0 = extents.experience.0.min(point.experience);
        extents.experience.1 = extents.experience.1.max(point.experience);
        extents.salary.0 = extents.salary.0.min(point.salary);
        extents.salary.1 = extents.salary.1.max(point.salary);
    }
    Some(extents)
}

/// The "(YYYY-MM)" caption next to the chart title, month mode only.
pub fn month_caption(state: &FilterState) -> Option<String> {
    match (state.time_mode, &state.selected_month) {
        (TimeMode::Month, Some(month)) => Some(format!("({month})")),
        _ => None,
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
