//! CLI library components for the submission writer.

pub mod context;
pub mod logging;
pub mod pipeline;
pub mod types;
