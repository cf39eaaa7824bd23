//! Transformation for submission exports.
//!
//! - **normalization**: Header-keyed cell rules and number formatting
//! - **metrics**: Height metrics and batch-update fields from shot metadata
//! - **rows**: Spreadsheet row assembly for one version

pub mod metrics;
pub mod normalization;
pub mod rows;

// Re-export common functions for external use
pub use metrics::{MetricsError, extract_height_metrics, height_metrics, submission_fields};
pub use normalization::{RuleTable, normalize_field};
pub use rows::build_row;
