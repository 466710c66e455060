//! Library entry for droid-study exposing the selection and reporting logic
//! for the binary and integration tests.

pub mod app;
pub mod args;
pub mod config;
pub mod coverage;
pub mod download;
pub mod index;
pub mod plot;
pub mod report;
pub mod selection;
pub mod util;

/// Result type shared by fallible operations whose errors end the run.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
