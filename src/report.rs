//! Cross-app coverage summary: bar chart data and the LaTeX table rows.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::coverage::layout::{
    AVERAGE_FILE, MAXIMUM_FILE, MINIMUM_FILE, MONKEY_ALL_DIR, MONKEY_CLICK_DIR, RESULTS_RAW_FILE,
    TRAVERSAL_DIR, app_label,
};
use crate::coverage::{CoverageKind, CoverageTable, load_coverage};
use crate::plot::{AQUA, BarChart, BarGroup, DARK_GREEN, ORANGE};
use crate::util::format_coverage;

/// Aggregate logs of one monkey results directory.
#[derive(Clone, Debug, Default)]
pub struct MonkeyLogs {
    /// `average_results_raw.csv`.
    pub average: Option<CoverageTable>,
    /// `minimum_results_raw.csv`.
    pub minimum: Option<CoverageTable>,
    /// `maximum_results_raw.csv`.
    pub maximum: Option<CoverageTable>,
}

impl MonkeyLogs {
    /// Load whichever aggregate logs exist and validate in `dir`.
    #[must_use]
    pub fn load(dir: &Path) -> Self {
        if !dir.is_dir() {
            return Self::default();
        }
        Self {
            average: load_if_present(&dir.join(AVERAGE_FILE)),
            minimum: load_if_present(&dir.join(MINIMUM_FILE)),
            maximum: load_if_present(&dir.join(MAXIMUM_FILE)),
        }
    }
}

/// Every coverage log of one app that the summary reads.
#[derive(Clone, Debug)]
pub struct AppCoverage {
    /// Table and axis label derived from the directory name.
    pub label: String,
    /// Explorative traversal log.
    pub traversal: Option<CoverageTable>,
    /// Click-only monkey aggregates.
    pub click: MonkeyLogs,
    /// All-events monkey aggregates.
    pub all: MonkeyLogs,
}

/// Read `path` only if it is a file; invalid logs are reported by the loader.
fn load_if_present(path: &Path) -> Option<CoverageTable> {
    if path.is_file() {
        load_coverage(path)
    } else {
        None
    }
}

/// Column maximum of an optional log.
fn max_of(table: Option<&CoverageTable>, kind: CoverageKind) -> Option<f64> {
    table.and_then(|t| t.max(kind))
}

impl AppCoverage {
    /// What: Load the logs of one app directory.
    ///
    /// Inputs:
    /// - `app_dir`: Directory such as `<base>/K9_Mail_12`.
    ///
    /// Output:
    /// - Logs found under the traversal and both monkey directories; anything
    ///   missing or invalid is `None`.
    #[must_use]
    pub fn load(app_dir: &Path) -> Self {
        let name = app_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let traversal_dir = app_dir.join(TRAVERSAL_DIR);
        let traversal = if traversal_dir.is_dir() {
            load_if_present(&traversal_dir.join(RESULTS_RAW_FILE))
        } else {
            None
        };
        Self {
            label: app_label(&name),
            traversal,
            click: MonkeyLogs::load(&app_dir.join(MONKEY_CLICK_DIR)),
            all: MonkeyLogs::load(&app_dir.join(MONKEY_ALL_DIR)),
        }
    }

    /// The seven maxima in table order: ET, Click avg/min/max, All avg/min/max.
    #[must_use]
    pub fn maxima(&self, kind: CoverageKind) -> [Option<f64>; 7] {
        [
            max_of(self.traversal.as_ref(), kind),
            max_of(self.click.average.as_ref(), kind),
            max_of(self.click.minimum.as_ref(), kind),
            max_of(self.click.maximum.as_ref(), kind),
            max_of(self.all.average.as_ref(), kind),
            max_of(self.all.minimum.as_ref(), kind),
            max_of(self.all.maximum.as_ref(), kind),
        ]
    }

    /// What: Render this app's LaTeX table row.
    ///
    /// Inputs:
    /// - `kind`: Coverage column.
    ///
    /// Output:
    /// - `Label & ET & ClickAvg & ClickMin & ClickMax & AllAvg & AllMin & AllMax \\`
    #[must_use]
    pub fn table_line(&self, kind: CoverageKind) -> String {
        let mut line = self.label.clone();
        for value in self.maxima(kind) {
            let _ = write!(line, " & {}", format_coverage(value));
        }
        line.push_str(" \\\\");
        line
    }
}

/// What: Load every app directory under `base` in name order.
///
/// Inputs:
/// - `base`: Results base directory.
///
/// Output:
/// - One entry per immediate subdirectory.
#[must_use]
pub fn load_apps(base: &Path) -> Vec<AppCoverage> {
    crate::coverage::layout::sorted_subdirectories(base)
        .iter()
        .map(|dir| AppCoverage::load(dir))
        .collect()
}

/// What: Bar chart data comparing the tools across apps.
///
/// Inputs:
/// - `kind`: Coverage column.
/// - `apps`: Loaded apps.
///
/// Output:
/// - ET (orange), Monkey Click average (green) and Monkey All average (cyan)
///   bars; missing values are drawn as zero.
#[must_use]
pub fn bar_chart(kind: CoverageKind, apps: &[AppCoverage]) -> BarChart {
    let values = |pick: fn(&AppCoverage) -> Option<&CoverageTable>| -> Vec<f64> {
        apps.iter()
            .map(|a| max_of(pick(a), kind).unwrap_or(0.0))
            .collect()
    };
    BarChart {
        labels: apps.iter().map(|a| a.label.clone()).collect(),
        groups: vec![
            BarGroup {
                label: "ET".to_string(),
                color: ORANGE,
                values: values(|a| a.traversal.as_ref()),
            },
            BarGroup {
                label: "Monkey Click".to_string(),
                color: DARK_GREEN,
                values: values(|a| a.click.average.as_ref()),
            },
            BarGroup {
                label: "Monkey All".to_string(),
                color: AQUA,
                values: values(|a| a.all.average.as_ref()),
            },
        ],
    }
}

/// Chart stem for `kind` inside `base`.
#[must_use]
pub fn bar_chart_stem(base: &Path, kind: CoverageKind) -> PathBuf {
    base.join(format!("{}_results_bar_plot", kind.column()))
}

/// Table file for `kind` inside `base`.
#[must_use]
pub fn table_path(base: &Path, kind: CoverageKind) -> PathBuf {
    base.join(format!("{}_results_table.txt", kind.column()))
}

/// What: Write the LaTeX table rows for `kind`.
///
/// Inputs:
/// - `base`: Results base directory (the file lands here).
/// - `kind`: Coverage column.
/// - `apps`: Loaded apps.
///
/// Output:
/// - Path of the written table.
///
/// # Errors
/// - The file cannot be written.
pub fn write_table(base: &Path, kind: CoverageKind, apps: &[AppCoverage]) -> crate::Result<PathBuf> {
    let path = table_path(base, kind);
    let mut body = String::new();
    for app in apps {
        body.push_str(&app.table_line(kind));
        body.push('\n');
    }
    std::fs::write(&path, body).map_err(|e| format!("cannot write {}: {e}", path.display()))?;
    tracing::info!(file = %path.display(), rows = apps.len(), "table written");
    Ok(path)
}
