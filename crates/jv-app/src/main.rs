//! Command-line entry point
//!
//! Loads the job-postings dataset, wires the filter store to the view
//! models, replays a small interaction sequence, and prints the summaries
//! each view would render. Useful for smoke-testing a dataset without the
//! rendering layer.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use jv_core::state::{FilterPatch, FilterState};
use jv_core::toggle;
use jv_core::{FilterStore, MonthTimeline, StateSubscriber};
use jv_data::CsvSource;
use jv_views::{
    color_domain, country_counts, details, scatter_points, DetailsTable, JobTotal, SkillsBoard,
};

const DEFAULT_DATASET: &str = "ai_job_dataset.csv";

/// Logs every state change the store broadcasts.
struct ChangeLogger;

impl StateSubscriber for ChangeLogger {
    fn on_state_change(&self, state: &FilterState) {
        debug!(
            jobs = state.selected_jobs.len(),
            countries = state.selected_countries.len(),
            mode = ?state.time_mode,
            month = state.selected_month.as_deref().unwrap_or("-"),
            scatter = state.scatter_selection.is_some(),
            "filter state changed"
        );
    }
}

#[derive(Serialize)]
struct Summary {
    records: usize,
    months: Vec<String>,
    visible: usize,
    scatter_points: usize,
    color_domain: (usize, usize, usize),
    top_jobs: Vec<JobTotal>,
    details: Option<DetailsTable>,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let as_json = args.iter().any(|arg| arg == "--json");
    let path = args
        .iter()
        .find(|arg| !arg.starts_with("--"))
        .cloned()
        .unwrap_or_else(|| DEFAULT_DATASET.to_string());

    let records = CsvSource::load_records(&path)
        .with_context(|| format!("failed to load dataset from '{path}'"))?;
    info!(records = records.len(), "dataset normalized");

    let store = FilterStore::new();
    let logger = Arc::new(ChangeLogger);
    store.add_subscriber(logger.clone());

    // Seed the month slider the way the dashboard does on load.
    let timeline = MonthTimeline::from_records(&records);
    if let Some(first) = timeline.first() {
        store.patch(FilterPatch::month(Some(first.to_string())));
    }

    // Replay a map click on the busiest country so the detail table has
    // something to show.
    if let Some(busiest) = busiest_country(&records) {
        store.patch(toggle::toggle_country(&store.state(), &busiest));
        info!(country = %busiest, "selected busiest country");
    }

    // Click a scatter point and immediately deselect it; the store
    // broadcasts both rounds.
    if let Some(point) = scatter_points(&records, &store.state()).first() {
        store.patch(toggle::scatter_click(&store.state(), point.record));
        store.patch(toggle::clear_scatter());
    }

    let state = store.state();
    let visible = jv_core::filter_visible(&records, &state);
    let counts = country_counts(&records, &state);
    let board = SkillsBoard::new(&records);

    let summary = Summary {
        records: records.len(),
        months: timeline.months().to_vec(),
        visible: visible.len(),
        scatter_points: scatter_points(&records, &state).len(),
        color_domain: color_domain(&counts),
        top_jobs: board.job_totals(&records),
        details: details(&records, &state),
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

fn busiest_country(records: &[jv_core::Record]) -> Option<String> {
    let counts = jv_core::count_by(records.iter(), |record| record.company_location.clone());
    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
        .map(|(country, _)| country)
}

fn print_summary(summary: &Summary) {
    println!(
        "{} postings across {} months ({} visible, {} plottable)",
        summary.records,
        summary.months.len(),
        summary.visible,
        summary.scatter_points
    );
    let (min, mid, max) = summary.color_domain;
    println!("Choropleth domain: min {min} / mid {mid} / max {max}");

    if let Some(table) = &summary.details {
        println!("\nDetails — {}", table.caption);
        println!(
            "{:<24} {:>6} {:>12} {:>9}",
            "Country", "Jobs", "Avg salary", "Remote %"
        );
        for row in &table.rows {
            println!(
                "{:<24} {:>6} {:>12} {:>8}%",
                row.country,
                row.jobs,
                format!("${}", row.avg_salary),
                row.avg_remote
            );
        }
    }

    println!("\nTop roles for the selected skills");
    for total in &summary.top_jobs {
        println!("{:<40} {:>6}", total.job_title, total.total);
    }
}
