//! Record model and normalizer
//!
//! Raw rows come from the loading layer as parsed column values; the
//! normalizer turns each one into an immutable [`Record`] with the derived
//! fields every view matches against (month bucket, lowercase location key,
//! deduplicated skill set). Normalization happens once at load time; the
//! resulting collection is only ever filtered, never mutated.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One row as delivered by the loading layer, columns parsed but not yet
/// normalized.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    pub job_title: String,
    pub company_location: String,
    pub posting_date: String,
    pub salary_usd: Option<f64>,
    pub years_experience: Option<f64>,
    pub remote_ratio: Option<i64>,
    pub required_skills: String,
}

/// One normalized job posting.
///
/// `month` is present iff `posting_date` parsed; records with unparseable
/// dates stay in the collection (time-agnostic views still want them) but
/// never match a month-mode filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Job title, display form (also the matching form)
    pub job_title: String,

    /// Company location, display form
    pub company_location: String,

    /// Lowercased location, the canonical form for all location matching
    pub location_key: String,

    /// Parsed posting date, `None` when the source string was unusable
    pub posting_date: Option<NaiveDate>,

    /// `YYYY-MM` bucket derived from `posting_date`
    pub month: Option<String>,

    /// Salary in USD
    pub salary_usd: Option<f64>,

    /// Years of professional experience
    pub years_experience: Option<f64>,

    /// Remote ratio, expected to be one of {0, 50, 100}; other values are
    /// kept as parsed and reported once per load
    pub remote_ratio: Option<i64>,

    /// Required skills, comma-split, trimmed and deduplicated
    pub required_skills: BTreeSet<String>,
}

impl Record {
    /// Classify the remote ratio, `None` for unrecognized values.
    pub fn remote_kind(&self) -> Option<RemoteKind> {
        RemoteKind::from_ratio(self.remote_ratio)
    }
}

/// Work-mode category derived from the remote ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteKind {
    OnSite,
    Hybrid,
    Remote,
}

impl RemoteKind {
    /// Map a remote ratio onto its category; values outside {0, 50, 100}
    /// have no category.
    pub fn from_ratio(ratio: Option<i64>) -> Option<Self> {
        match ratio {
            Some(0) => Some(RemoteKind::OnSite),
            Some(50) => Some(RemoteKind::Hybrid),
            Some(100) => Some(RemoteKind::Remote),
            _ => None,
        }
    }

    /// Human-readable label used by legends and tooltips.
    pub fn label(&self) -> &'static str {
        match self {
            RemoteKind::OnSite => "On-site",
            RemoteKind::Hybrid => "Hybrid",
            RemoteKind::Remote => "Remote",
        }
    }
}

/// Source date format, `YYYY-MM-DD`.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Normalize a load-time batch of raw rows, preserving order.
///
/// Rows are never dropped here: a bad date only costs the row its month
/// bucket, and a malformed remote ratio is kept as parsed. Malformed remote
/// ratios are counted and reported with a single warning per batch.
pub fn normalize(rows: Vec<RawRow>) -> Vec<Record> {
    let mut malformed_remote = 0usize;

    let records: Vec<Record> = rows
        .into_iter()
        .map(|row| {
            let posting_date = NaiveDate::parse_from_str(row.posting_date.trim(), DATE_FORMAT).ok();
            let month = posting_date.map(|date| date.format("%Y-%m").to_string());

            if RemoteKind::from_ratio(row.remote_ratio).is_none() {
                malformed_remote += 1;
            }

            let location_key = row.company_location.to_lowercase();

            Record {
                job_title: row.job_title,
                company_location: row.company_location,
                location_key,
                posting_date,
                month,
                salary_usd: row.salary_usd,
                years_experience: row.years_experience,
                remote_ratio: row.remote_ratio,
                required_skills: split_skills(&row.required_skills),
            }
        })
        .collect();

    if malformed_remote > 0 {
        warn!(
            rows = malformed_remote,
            "remote_ratio outside {{0, 50, 100}}; values kept as parsed"
        );
    }

    records
}

/// Split a comma-joined skills string into a deduplicated set.
pub fn split_skills(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}
