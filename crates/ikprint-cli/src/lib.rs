//! CLI library components for ikprint.

pub mod config;
pub mod logging;
pub mod prompt;
pub mod workflow;
