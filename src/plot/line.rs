//! Coverage-over-interactions line charts.

use plotters::coord::Shift;
use plotters::prelude::*;

use super::{Chart, DARK_GREEN, ORANGE, PlotResult, SILVER, TAB_BLUE, TAB_ORANGE, ticks};
use crate::coverage::{CoverageKind, CoverageTable};

/// Runs are planned for 500 interactions; the x axis always covers that.
const X_AXIS_MIN_EXTENT: f64 = 500.0;
/// X tick spacing.
const X_TICK_STEP: f64 = 50.0;
/// Y tick spacing, also the headroom above the highest value.
const Y_TICK_STEP: f64 = 5.0;

/// One plotted line.
#[derive(Clone, Debug)]
pub struct Line {
    /// Legend text.
    pub label: String,
    /// Stroke colour.
    pub color: RGBColor,
    /// Stroke width in pixels.
    pub width: u32,
    /// `(interaction, coverage)` points.
    pub points: Vec<(f64, f64)>,
}

/// Filled area between two curves sharing x positions.
#[derive(Clone, Debug)]
pub struct Band {
    /// Legend text.
    pub label: String,
    /// Fill colour.
    pub color: RGBColor,
    /// Lower curve.
    pub lower: Vec<(f64, f64)>,
    /// Upper curve.
    pub upper: Vec<(f64, f64)>,
}

/// Coverage chart: lines plus an optional band, legend lower right.
#[derive(Clone, Debug)]
pub struct LineChart {
    /// Caption; comparison charts have none.
    pub title: Option<String>,
    /// Lines drawn over the band.
    pub lines: Vec<Line>,
    /// Optional shaded band.
    pub band: Option<Band>,
}

impl LineChart {
    /// What: Chart of a single run: interface and method coverage.
    ///
    /// Inputs:
    /// - `title`: Caption.
    /// - `table`: Validated coverage log.
    ///
    /// Output:
    /// - Two lines, "Interface" (control) and "Method".
    #[must_use]
    pub fn coverage(title: impl Into<String>, table: &CoverageTable) -> Self {
        Self {
            title: Some(title.into()),
            lines: vec![
                Line {
                    label: "Interface".to_string(),
                    color: TAB_BLUE,
                    width: 1,
                    points: table.series(CoverageKind::Control),
                },
                Line {
                    label: "Method".to_string(),
                    color: TAB_ORANGE,
                    width: 1,
                    points: table.series(CoverageKind::Method),
                },
            ],
            band: None,
        }
    }

    /// What: Traversal against the monkey average, with the monkey min/max band.
    ///
    /// Inputs:
    /// - `kind`: Coverage column to compare.
    /// - `monkey_label`: Legend text of the monkey line, e.g. `Monkey Click`.
    /// - `traversal`, `average`, `minimum`, `maximum`: Validated logs.
    ///
    /// Output:
    /// - Monkey line (green), `ET` line (orange), `Max/Min` band (silver) on the
    ///   monkey average's interaction positions.
    #[must_use]
    pub fn comparison(
        kind: CoverageKind,
        monkey_label: impl Into<String>,
        traversal: &CoverageTable,
        average: &CoverageTable,
        minimum: &CoverageTable,
        maximum: &CoverageTable,
    ) -> Self {
        let band_curve = |bound: &CoverageTable| -> Vec<(f64, f64)> {
            average
                .rows
                .iter()
                .zip(&bound.rows)
                .map(|(a, b)| (a.interaction, b.value(kind)))
                .collect()
        };
        Self {
            title: None,
            lines: vec![
                Line {
                    label: monkey_label.into(),
                    color: DARK_GREEN,
                    width: 3,
                    points: average.series(kind),
                },
                Line {
                    label: "ET".to_string(),
                    color: ORANGE,
                    width: 3,
                    points: traversal.series(kind),
                },
            ],
            band: Some(Band {
                label: "Max/Min".to_string(),
                color: SILVER,
                lower: band_curve(minimum),
                upper: band_curve(maximum),
            }),
        }
    }

    /// All points of lines and band.
    fn all_points(&self) -> impl Iterator<Item = &(f64, f64)> {
        let band_points = self
            .band
            .iter()
            .flat_map(|b| b.lower.iter().chain(b.upper.iter()));
        self.lines
            .iter()
            .flat_map(|l| l.points.iter())
            .chain(band_points)
    }

    /// Highest coverage value plotted, zero when empty.
    #[must_use]
    pub fn y_max(&self) -> f64 {
        self.all_points()
            .map(|p| p.1)
            .filter(|y| y.is_finite())
            .fold(0.0, f64::max)
    }

    /// Right end of the x axis.
    #[must_use]
    pub fn x_max(&self) -> f64 {
        self.all_points()
            .map(|p| p.0)
            .filter(|x| x.is_finite())
            .fold(X_AXIS_MIN_EXTENT, f64::max)
    }

    /// Top of the y axis, one tick step above the highest value.
    fn y_end(&self) -> f64 {
        self.y_max() + Y_TICK_STEP
    }

    /// Number of x and y axis labels: one per 50 interactions (end inclusive)
    /// and one per 5 percent.
    fn label_counts(&self) -> (usize, usize) {
        (
            ticks(X_TICK_STEP, self.x_max() + 1.0).len(),
            ticks(Y_TICK_STEP, self.y_end()).len(),
        )
    }
}

impl Chart for LineChart {
    fn size(&self) -> (u32, u32) {
        (640, 480)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> PlotResult
    where
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE)?;
        let x_end = self.x_max();
        let y_end = self.y_end();

        let mut builder = ChartBuilder::on(root);
        builder
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50);
        if let Some(title) = &self.title {
            builder.caption(title, ("sans-serif", 18));
        }
        let (x_labels, y_labels) = self.label_counts();
        let mut chart = builder.build_cartesian_2d(0.0..x_end, 0.0..y_end)?;

        chart
            .configure_mesh()
            .x_labels(x_labels)
            .y_labels(y_labels)
            .x_desc("Number of Interactions")
            .y_desc("Percentage Coverage")
            .x_label_formatter(&|v| format!("{v:.0}"))
            .y_label_formatter(&|v| format!("{v:.0}"))
            .draw()?;

        if let Some(band) = &self.band {
            let color = band.color;
            let outline: Vec<(f64, f64)> = band
                .lower
                .iter()
                .copied()
                .chain(band.upper.iter().rev().copied())
                .collect();
            chart
                .draw_series(std::iter::once(Polygon::new(outline, color.filled())))?
                .label(band.label.as_str())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled())
                });
        }

        for line in &self.lines {
            let style = line.color.stroke_width(line.width);
            chart
                .draw_series(LineSeries::new(line.points.iter().copied(), style))?
                .label(line.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::CoverageRow;

    /// Table with rows `(interaction, control, method)`.
    fn table(rows: &[(f64, f64, f64)]) -> CoverageTable {
        CoverageTable {
            rows: rows
                .iter()
                .map(|&(interaction, control, method)| CoverageRow {
                    interaction,
                    control,
                    method,
                })
                .collect(),
        }
    }

    #[test]
    /// What: Single-run charts plot control as Interface and method as Method.
    ///
    /// Inputs:
    /// - Two-row coverage table.
    ///
    /// Output:
    /// - Two labelled lines, y maximum over both, x axis at least 500.
    fn line_coverage_chart_series() {
        let chart = LineChart::coverage(
            "Dynamic Traversal Test",
            &table(&[(0.0, 1.0, 2.0), (10.0, 40.0, 35.0)]),
        );
        assert_eq!(chart.lines[0].label, "Interface");
        assert_eq!(chart.lines[0].points, vec![(0.0, 1.0), (10.0, 40.0)]);
        assert_eq!(chart.lines[1].points, vec![(0.0, 2.0), (10.0, 35.0)]);
        assert!((chart.y_max() - 40.0).abs() < f64::EPSILON);
        assert!((chart.x_max() - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    /// What: Axis label counts follow the 50-interaction and 5-percent steps.
    ///
    /// Inputs:
    /// - Chart peaking at 40% within 500 interactions, and one reaching 650.
    ///
    /// Output:
    /// - `0..=500` gives 11 x labels, `0..45` gives 9 y labels; 650 gives 14.
    fn line_label_counts_follow_steps() {
        let short = LineChart::coverage("Run", &table(&[(0.0, 1.0, 2.0), (10.0, 40.0, 35.0)]));
        assert_eq!(short.label_counts(), (11, 9));
        let long = LineChart::coverage("Run", &table(&[(0.0, 0.0, 0.0), (650.0, 12.0, 3.0)]));
        assert_eq!(long.label_counts(), (14, 4));
    }

    #[test]
    /// What: The comparison band uses the monkey average's x positions.
    ///
    /// Inputs:
    /// - Average, minimum and maximum logs plus a longer traversal log.
    ///
    /// Output:
    /// - Band curves pair average interactions with min/max values; y max includes
    ///   the maximum log; x axis extends past 500 for the long traversal.
    fn line_comparison_band_alignment() {
        let avg = table(&[(0.0, 5.0, 1.0), (100.0, 20.0, 2.0)]);
        let min = table(&[(0.0, 2.0, 0.5), (100.0, 15.0, 1.0)]);
        let max = table(&[(0.0, 8.0, 1.5), (100.0, 60.0, 3.0)]);
        let et = table(&[(0.0, 0.0, 0.0), (650.0, 30.0, 4.0)]);
        let chart =
            LineChart::comparison(CoverageKind::Control, "Monkey Click", &et, &avg, &min, &max);
        let band = chart.band.as_ref().expect("band present");
        assert_eq!(band.lower, vec![(0.0, 2.0), (100.0, 15.0)]);
        assert_eq!(band.upper, vec![(0.0, 8.0), (100.0, 60.0)]);
        assert_eq!(chart.lines[0].label, "Monkey Click");
        assert_eq!(chart.lines[1].label, "ET");
        assert!((chart.y_max() - 60.0).abs() < f64::EPSILON);
        assert!((chart.x_max() - 650.0).abs() < f64::EPSILON);
    }

    #[test]
    /// What: Charts render to both backends.
    ///
    /// Inputs:
    /// - Coverage chart saved under a temp directory.
    ///
    /// Output:
    /// - Non-empty PNG and an SVG document.
    fn line_chart_saves_png_and_svg() {
        let dir = tempfile::tempdir().expect("tempdir");
        let chart = LineChart::coverage("Run", &table(&[(0.0, 1.0, 1.0), (50.0, 10.0, 12.0)]));
        let files = crate::plot::save(&chart, &dir.path().join("results_plot")).expect("render");
        assert!(std::fs::metadata(&files.png).expect("png").len() > 0);
        let svg = std::fs::read_to_string(&files.svg).expect("svg");
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Number of Interactions"));
        assert!(svg.contains("Interface"));
    }
}
