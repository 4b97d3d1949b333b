//! Core cross-filter engine for the job-postings dashboard
//!
//! This crate provides the shared filter state, the visibility predicate
//! that decides which records the linked views show, the aggregation
//! primitives built on top of that decision, and the selection-toggle
//! protocol views use to mutate shared state.

pub mod aggregate;
pub mod filter;
pub mod record;
pub mod state;
pub mod store;
pub mod timeline;
pub mod toggle;

// Re-export commonly used types
pub use aggregate::{count_by, mean_of, min_mid_max};
pub use filter::{filter_visible, is_visible, salary_within_tolerance, SALARY_TOLERANCE};
pub use record::{normalize, RawRow, Record, RemoteKind};
pub use state::{FilterPatch, FilterState, ScatterSelection, TimeMode};
pub use store::{FilterStore, StateSubscriber};
pub use timeline::MonthTimeline;
