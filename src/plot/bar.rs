//! Grouped bar chart of per-app maximum coverage.

use plotters::coord::Shift;
use plotters::prelude::*;

use super::{Chart, PlotResult, ticks};

/// Horizontal distance between app clusters, in axis units.
const SLOT: i32 = 100;
/// Width of one bar in axis units, so a bar is 0.3 of a slot.
pub const BAR_WIDTH: i32 = 30;
/// Y axis tick spacing.
const Y_TICK_STEP: f64 = 10.0;
/// Coverage is a percentage, so the axis runs to 100 unless data exceeds it.
const Y_AXIS_MIN_EXTENT: f64 = 100.0;

/// One bar per app for a single tool.
#[derive(Clone, Debug)]
pub struct BarGroup {
    /// Legend text.
    pub label: String,
    /// Fill colour.
    pub color: RGBColor,
    /// One value per app, aligned with [`BarChart::labels`].
    pub values: Vec<f64>,
}

/// Apps on the x axis, one bar per group for each app.
#[derive(Clone, Debug)]
pub struct BarChart {
    /// App labels, printed vertically under each cluster.
    pub labels: Vec<String>,
    /// Bar groups in drawing order.
    pub groups: Vec<BarGroup>,
}

/// Axis units for `n` slots or bars, saturating on absurd counts.
fn units(n: usize, per: i32) -> i32 {
    i32::try_from(n).map_or(i32::MAX, |n| n.saturating_mul(per))
}

impl BarChart {
    /// Left edge of the bar for `app` in group `group`.
    fn bar_left(app: usize, group: usize) -> i32 {
        units(app, SLOT)
            .saturating_add(units(group, BAR_WIDTH))
            .saturating_sub(BAR_WIDTH / 2)
    }

    /// X position of the tick under a cluster.
    fn tick_position(&self, app: usize) -> i32 {
        let span = units(self.groups.len().saturating_sub(1), BAR_WIDTH);
        units(app, SLOT).saturating_add(span / 2)
    }

    /// App label for an axis key point; blank off the cluster ticks.
    fn label_at(&self, x: i32) -> String {
        self.labels
            .iter()
            .enumerate()
            .find(|(i, _)| self.tick_position(*i) == x)
            .map(|(_, label)| label.clone())
            .unwrap_or_default()
    }

    /// X axis range: half a slot either side of the clusters.
    fn x_range(&self) -> std::ops::Range<i32> {
        let start = -SLOT / 2;
        let end = units(self.labels.len().max(1), SLOT)
            .saturating_add(start)
            .saturating_add(units(self.groups.len(), BAR_WIDTH));
        start..end
    }

    /// Highest bar, zero when empty.
    fn y_max(&self) -> f64 {
        self.groups
            .iter()
            .flat_map(|g| g.values.iter().copied())
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }
}

impl Chart for BarChart {
    fn size(&self) -> (u32, u32) {
        (640, 640)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> PlotResult
    where
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE)?;
        let y_end = self.y_max().max(Y_AXIS_MIN_EXTENT) + 1.0;
        let x_keys: Vec<i32> = (0..self.labels.len())
            .map(|i| self.tick_position(i))
            .collect();

        let mut chart = ChartBuilder::on(root)
            .margin(10)
            .x_label_area_size(160)
            .y_label_area_size(50)
            .build_cartesian_2d(self.x_range().with_key_points(x_keys), 0.0..y_end)?;

        let label_of = |x: &i32| self.label_at(*x);
        chart
            .configure_mesh()
            .disable_x_mesh()
            .y_desc("Percentage Coverage")
            .y_labels(ticks(Y_TICK_STEP, y_end).len())
            .x_label_formatter(&label_of)
            .y_label_formatter(&|v| format!("{v:.0}"))
            .x_label_style(("sans-serif", 12).into_font().transform(FontTransform::Rotate90))
            .draw()?;

        for (g, group) in self.groups.iter().enumerate() {
            let color = group.color;
            let bars = group.values.iter().enumerate().map(|(i, &v)| {
                let left = Self::bar_left(i, g);
                Rectangle::new([(left, 0.0), (left + BAR_WIDTH, v)], color.filled())
            });
            chart
                .draw_series(bars)?
                .label(group.label.as_str())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled())
                });
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        Ok(())
    }
}
