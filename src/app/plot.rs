//! `plot`: charts for one app's results directory.

use std::path::Path;

use crate::coverage::layout::{
    AVERAGE_FILE, MAXIMUM_FILE, MINIMUM_FILE, MONKEY_CLICK_DIR, RESULTS_RAW_FILE, TRAVERSAL_DIR,
    test_directories, test_type,
};
use crate::coverage::{CoverageKind, CoverageTable, load_coverage};
use crate::plot::{LineChart, save};

/// Load `path` if it is a file; invalid logs are reported by the loader.
fn load_existing(path: &Path) -> Option<CoverageTable> {
    path.is_file().then(|| load_coverage(path)).flatten()
}

/// Render `chart` to `stem`, logging the outcome; returns whether it worked.
fn render(chart: &LineChart, stem: &Path) -> bool {
    match save(chart, stem) {
        Ok(files) => {
            tracing::info!(png = %files.png.display(), "chart written");
            true
        }
        Err(e) => {
            tracing::error!(stem = %stem.display(), error = %e, "failed to render chart");
            false
        }
    }
}

/// What: Chart every test run and the average of a monkey results directory.
///
/// Inputs:
/// - `monkey_dir`: Directory such as `<app>/Monkey_Click`.
///
/// Output:
/// - Number of charts written.
///
/// Details:
/// - Runs with no log are skipped silently; invalid logs are logged and skipped.
pub fn plot_monkey_results(monkey_dir: &Path) -> usize {
    let kind = test_type(monkey_dir);
    let mut written = 0;

    for (dir, number) in test_directories(monkey_dir) {
        let log = dir.join(format!("results_raw_{number}.csv"));
        let Some(table) = load_existing(&log) else {
            continue;
        };
        let chart = LineChart::coverage(format!("Monkey {kind} Interaction Test {number} Coverage"), &table);
        if render(&chart, &dir.join(format!("results_plot_{number}"))) {
            written += 1;
        }
    }

    if let Some(table) = load_existing(&monkey_dir.join(AVERAGE_FILE)) {
        let chart = LineChart::coverage(format!("Monkey {kind} Interaction Average Coverage"), &table);
        if render(&chart, &monkey_dir.join("average_plot")) {
            written += 1;
        }
    }
    written
}

/// What: Chart the traversal run of an app.
///
/// Inputs:
/// - `traversal_dir`: Directory such as `<app>/Droid_Traversal`.
///
/// Output:
/// - `true` when `results_plot` was written.
pub fn plot_traversal_results(traversal_dir: &Path) -> bool {
    load_existing(&traversal_dir.join(RESULTS_RAW_FILE)).is_some_and(|table| {
        render(
            &LineChart::coverage("Dynamic Traversal Test", &table),
            &traversal_dir.join("results_plot"),
        )
    })
}

/// What: Chart traversal against the monkey average for one coverage column.
///
/// Inputs:
/// - `kind`: Coverage column.
/// - `traversal_dir`, `monkey_dir`: Result directories of the app.
/// - `out_dir`: Where `<kind>_results_<type>_plot` is written.
///
/// Output:
/// - `true` when the chart was written; `false` when a log is missing or invalid.
pub fn plot_traversal_vs_monkey(
    kind: CoverageKind,
    traversal_dir: &Path,
    monkey_dir: &Path,
    out_dir: &Path,
) -> bool {
    let paths = [
        traversal_dir.join(RESULTS_RAW_FILE),
        monkey_dir.join(AVERAGE_FILE),
        monkey_dir.join(MINIMUM_FILE),
        monkey_dir.join(MAXIMUM_FILE),
    ];
    if !paths.iter().all(|p| p.is_file()) {
        tracing::debug!(kind = %kind, "comparison logs incomplete");
        return false;
    }
    let [Some(traversal), Some(average), Some(minimum), Some(maximum)] =
        paths.map(|p| load_coverage(&p))
    else {
        return false;
    };

    let monkey = test_type(monkey_dir);
    let chart = LineChart::comparison(
        kind,
        format!("Monkey {monkey}"),
        &traversal,
        &average,
        &minimum,
        &maximum,
    );
    let stem = out_dir.join(format!(
        "{}_results_{}_plot",
        kind.column(),
        monkey.to_lowercase()
    ));
    render(&chart, &stem)
}

/// What: Entry point of the `plot` subcommand.
///
/// Inputs:
/// - `app_dir`: Results directory of one app.
///
/// Output:
/// - Charts written next to their logs; missing parts are logged as errors.
pub fn run(app_dir: &Path) {
    let monkey_dir = app_dir.join(MONKEY_CLICK_DIR);
    let traversal_dir = app_dir.join(TRAVERSAL_DIR);

    if monkey_dir.is_dir() {
        tracing::info!("Plotting data for Monkey click interaction tests.");
        plot_monkey_results(&monkey_dir);
    } else {
        tracing::error!(dir = %monkey_dir.display(), "Monkey click interaction test data not found.");
    }

    if traversal_dir.is_dir() {
        tracing::info!("Plotting data for dynamic traversal test.");
        plot_traversal_results(&traversal_dir);
    } else {
        tracing::error!(dir = %traversal_dir.display(), "Dynamic traversal test data not found.");
    }

    if monkey_dir.is_dir() && traversal_dir.is_dir() {
        tracing::info!("Plotting data for dynamic traversal vs. Monkey click interaction tests.");
        for kind in CoverageKind::ALL {
            plot_traversal_vs_monkey(kind, &traversal_dir, &monkey_dir, app_dir);
        }
    } else {
        tracing::error!("Dynamic traversal test data or Monkey click test data not found.");
    }
}
