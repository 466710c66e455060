//! Chart rendering.
//!
//! Each chart is drawn once per backend: a PNG for quick viewing and an SVG
//! that can be edited or converted for the paper. The default `ttf-fonts`
//! feature gives plotters its font backend, which every chart needs for
//! captions, axis labels and legends. Without it [`save`] refuses to draw.

use std::error::Error;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;

mod bar;
mod line;

pub use bar::{BarChart, BarGroup};
pub use line::{Band, Line, LineChart};

/// Result of chart rendering; plotters errors are not `Send`-bound.
pub type PlotResult<T = ()> = Result<T, Box<dyn Error>>;

/// Default matplotlib blue, used for the interface coverage line.
pub const TAB_BLUE: RGBColor = RGBColor(31, 119, 180);
/// Default matplotlib orange, used for the method coverage line.
pub const TAB_ORANGE: RGBColor = RGBColor(255, 127, 14);
/// Explorative traversal.
pub const ORANGE: RGBColor = RGBColor(255, 165, 0);
/// Monkey click runs.
pub const DARK_GREEN: RGBColor = RGBColor(0, 128, 0);
/// Monkey runs with every event type.
pub const AQUA: RGBColor = RGBColor(0, 255, 255);
/// Min/max band.
pub const SILVER: RGBColor = RGBColor(192, 192, 192);

/// A chart that can be drawn onto any plotters backend.
pub trait Chart {
    /// Pixel size of the rendered image.
    fn size(&self) -> (u32, u32);

    /// What: Draw the chart onto `root`.
    ///
    /// # Errors
    /// - Backend errors while drawing.
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> PlotResult
    where
        DB::ErrorType: 'static;
}

/// Files written for one chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartFiles {
    /// Raster image.
    pub png: PathBuf,
    /// Vector image.
    pub svg: PathBuf,
}

impl ChartFiles {
    /// Output paths for `stem` (a path without extension).
    #[must_use]
    pub fn for_stem(stem: &Path) -> Self {
        Self {
            png: with_suffix(stem, ".png"),
            svg: with_suffix(stem, ".svg"),
        }
    }
}

/// Append `suffix` to the file name without touching dots already in it.
fn with_suffix(stem: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(stem.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// What: Render `chart` to `<stem>.png` and `<stem>.svg`.
///
/// Inputs:
/// - `chart`: Chart description.
/// - `stem`: Output path without extension.
///
/// Output:
/// - Paths of both files.
///
/// # Errors
/// - Built without the `ttf-fonts` feature; nothing is written.
/// - Any drawing or file error; a PNG may exist when the SVG step fails.
pub fn save<C: Chart>(chart: &C, stem: &Path) -> PlotResult<ChartFiles> {
    if !cfg!(feature = "ttf-fonts") {
        return Err("chart text needs the `ttf-fonts` font backend".into());
    }
    let files = ChartFiles::for_stem(stem);
    {
        let root = BitMapBackend::new(&files.png, chart.size()).into_drawing_area();
        chart.draw(&root)?;
        root.present()?;
    }
    {
        let root = SVGBackend::new(&files.svg, chart.size()).into_drawing_area();
        chart.draw(&root)?;
        root.present()?;
    }
    tracing::debug!(png = %files.png.display(), svg = %files.svg.display(), "chart written");
    Ok(files)
}

/// What: Evenly spaced tick positions from zero.
///
/// Inputs:
/// - `step`: Distance between ticks, positive.
/// - `end`: Exclusive upper bound.
///
/// Output:
/// - `0, step, 2*step, ...` strictly below `end`; at least `[0.0]`.
#[must_use]
pub fn ticks(step: f64, end: f64) -> Vec<f64> {
    let mut out = vec![0.0];
    if step <= 0.0 || !end.is_finite() {
        return out;
    }
    let mut k = 1.0;
    while k * step < end {
        out.push(k * step);
        k += 1.0;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Tick lists stop strictly below the bound.
    ///
    /// Inputs:
    /// - Step 50 up to 501, step 5 up to 12.5, and degenerate arguments.
    ///
    /// Output:
    /// - `0..=500` by 50, `[0, 5, 10]`, `[0]`.
    fn plot_ticks_exclusive_bound() {
        let x = ticks(50.0, 501.0);
        assert_eq!(x.len(), 11);
        assert_eq!(x.last().copied(), Some(500.0));
        assert_eq!(ticks(5.0, 12.5), vec![0.0, 5.0, 10.0]);
        assert_eq!(ticks(0.0, 10.0), vec![0.0]);
        assert_eq!(ticks(5.0, f64::NAN), vec![0.0]);
    }

    #[test]
    /// What: Output files keep dots already present in the stem.
    ///
    /// Inputs:
    /// - Stems `out/average_plot` and `out/run.v2`.
    ///
    /// Output:
    /// - `.png`/`.svg` appended rather than replacing `v2`.
    fn plot_chart_files_append_suffix() {
        let files = ChartFiles::for_stem(Path::new("out/average_plot"));
        assert_eq!(files.png, PathBuf::from("out/average_plot.png"));
        assert_eq!(files.svg, PathBuf::from("out/average_plot.svg"));
        let dotted = ChartFiles::for_stem(Path::new("out/run.v2"));
        assert_eq!(dotted.svg, PathBuf::from("out/run.v2.svg"));
    }

    #[test]
    /// What: Saving depends on the font backend and never panics without it.
    ///
    /// Inputs:
    /// - Captioned coverage chart saved under a temp directory.
    ///
    /// Output:
    /// - Both files with `ttf-fonts`; otherwise an error and no PNG.
    fn plot_save_needs_font_backend() {
        let dir = tempfile::tempdir().expect("tempdir");
        let table = crate::coverage::CoverageTable {
            rows: vec![crate::coverage::CoverageRow {
                interaction: 0.0,
                control: 1.0,
                method: 2.0,
            }],
        };
        let stem = dir.path().join("results_plot");
        let result = save(&LineChart::coverage("Dynamic Traversal Test", &table), &stem);
        if cfg!(feature = "ttf-fonts") {
            let files = result.expect("render");
            assert!(files.png.exists() && files.svg.exists());
        } else {
            assert!(result.is_err());
            assert!(!ChartFiles::for_stem(&stem).png.exists());
        }
    }
}
