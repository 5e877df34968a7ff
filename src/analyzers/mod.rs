//! Aggregation engine.
//!
//! Pure functions over a slice of [`SchoolRecord`](crate::dataset::SchoolRecord):
//! category filtering, per-category means, per-school overall scores, the
//! PEI versus Regular comparison and the narrative trend analysis.

pub mod aggregate;
pub mod grade;
pub mod trend;
pub mod types;
pub mod utility;

pub use aggregate::{category_comparison, filter_by_category, group_statistics, overall_score};
pub use trend::{analyze_trend, school_detail};
