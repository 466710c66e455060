//! `compare`: bar charts and LaTeX tables across every app of a results tree.

use std::path::Path;

use crate::coverage::CoverageKind;
use crate::plot::save;
use crate::report::{bar_chart, bar_chart_stem, load_apps, write_table};

/// What: Entry point of the `compare` subcommand.
///
/// Inputs:
/// - `base`: Directory whose subdirectories are app results.
///
/// Output:
/// - `<kind>_results_bar_plot.{png,svg}` and `<kind>_results_table.txt` in `base`
///   for control and method coverage.
///
/// Details:
/// - Tables are written first; chart failures are logged and skipped.
///
/// # Errors
/// - A table file cannot be written.
pub fn run(base: &Path) -> crate::Result<()> {
    if !base.is_dir() {
        return Err(format!("results directory not found: {}", base.display()).into());
    }
    let apps = load_apps(base);

    tracing::info!("Tabling data for app comparison.");
    for kind in CoverageKind::ALL {
        write_table(base, kind, &apps)?;
    }

    tracing::info!(apps = apps.len(), "Plotting data for app comparison bar chart.");
    for kind in CoverageKind::ALL {
        let stem = bar_chart_stem(base, kind);
        if let Err(e) = save(&bar_chart(kind, &apps), &stem) {
            tracing::error!(stem = %stem.display(), error = %e, "failed to render chart");
        }
    }
    Ok(())
}
