//! View models for the dashboard views
//!
//! The data side of each view: everything a renderer would bind to marks,
//! with no drawing. Each model asks the core "what is visible" and "what
//! are the summaries" and exposes plain values.

pub mod map_view;
pub mod scatter_view;
pub mod skills_view;

pub use map_view::{color_domain, country_counts, details, hover_summary, salary_band};
pub use map_view::{CountryHover, CountryRow, DetailsTable};
pub use scatter_view::{axis_extents, month_caption, scatter_points, AxisExtents, ScatterPoint};
pub use skills_view::{JobTotal, SkillsBoard, DEFAULT_SKILL};
