use std::env;
use std::path::{Path, PathBuf};

/// Name of the per-user settings directory.
const APP_DIR: &str = "droid-study";
/// Settings file consulted by `select` and `format-index`.
const SELECTOR_FILE: &str = "selector.conf";

/// What: Determine the selector config file, searching in priority order.
///
/// Inputs:
/// - None (reads `XDG_CONFIG_HOME` and `HOME`).
///
/// Output:
/// - First existing candidate, or `None` when no file is present.
///
/// Details:
/// - `$XDG_CONFIG_HOME/droid-study/selector.conf` wins over
///   `$HOME/.config/droid-study/selector.conf`.
pub fn resolve_selector_config_path() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME").ok();
    let home = env::var("HOME").ok();
    selector_config_candidates(xdg_config.as_deref(), home.as_deref())
        .into_iter()
        .find(|p| p.is_file())
}

/// Candidate paths in search order for the given environment values.
fn selector_config_candidates(xdg_config: Option<&str>, home: Option<&str>) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(xdg) = xdg_config.filter(|x| !x.trim().is_empty()) {
        candidates.push(Path::new(xdg).join(APP_DIR).join(SELECTOR_FILE));
    }
    if let Some(h) = home {
        candidates.push(
            Path::new(h)
                .join(".config")
                .join(APP_DIR)
                .join(SELECTOR_FILE),
        );
    }
    candidates
}
