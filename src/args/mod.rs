//! Command-line argument parsing.

pub mod definition;
pub mod utils;

// Re-export commonly used items
pub use definition::{Args, Command, DirectoryArgs, FormatIndexArgs, SelectArgs};
pub use utils::determine_log_level;
