/// Render layer: backend-independent chart descriptions.
///
/// ```text
///   ErrorReport ──► ChartSet::build ──┬─► BoxPlotChart ──┬─► png   (plotters)
///                                     └─► ScatterChart ──┴─► ui    (egui_plot)
/// ```
///
/// Each chart owns everything needed to draw it; no backend keeps a
/// "current figure".
pub mod png;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use palette::Srgb;

use crate::color::{partition_color, SCATTER_ALPHA};
use crate::data::model::{ErrorReport, Partition};

/// Horizontal span of one box, in meters.
pub const BOX_WIDTH: f64 = 3.0;
/// Whisker reach, in multiples of the inter-quartile range.
pub const WHISKER_IQR: f64 = 1.5;
/// Headroom above the largest error when no ceiling is given.
pub const Y_HEADROOM: f64 = 1.05;

pub const MEAN_LEGEND: &str = "Mean RMSE";
pub const X_LABEL: &str = "Distance parameter (m)";

// ---------------------------------------------------------------------------
// Shared frame
// ---------------------------------------------------------------------------

/// Text anchored in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Horizontal reference line at the global mean error.
#[derive(Debug, Clone, PartialEq)]
pub struct MeanLine {
    pub value: f64,
    /// Line spans `[0, x_end]`.
    pub x_end: f64,
    pub annotation: Option<Annotation>,
}

/// Title, axes and reference line shared by both charts.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub color: Srgb<u8>,
    pub mean: MeanLine,
}

impl ChartFrame {
    fn new(report: &ErrorReport, partition: Partition, y_max: Option<f64>) -> Self {
        let first = report.groups.first().map(|g| g.distance).unwrap_or(0.0);
        let x_min = (first - BOX_WIDTH).min(0.0);
        let x_max = report.max_distance + BOX_WIDTH;

        ChartFrame {
            title: format!("{} loss vs distance parameter", partition.display_name()),
            x_label: X_LABEL.to_string(),
            y_label: format!(
                "RMSE - Prediction error for {} dataset",
                partition.display_name()
            ),
            x_range: (x_min, x_max),
            y_range: (0.0, y_ceiling(report.max_error, y_max)),
            color: partition_color(partition),
            mean: MeanLine {
                value: report.global_mean_error,
                x_end: report.max_distance,
                annotation: None,
            },
        }
    }

    /// Whether `y` lies inside the visible y range.
    pub fn shows_y(&self, y: f64) -> bool {
        y >= self.y_range.0 && y <= self.y_range.1
    }

    pub fn clamp_y(&self, y: f64) -> f64 {
        y.clamp(self.y_range.0, self.y_range.1)
    }

    /// Where `note` is drawn: its own position, pulled into the visible range.
    pub fn anchor(&self, note: &Annotation) -> (f64, f64) {
        (
            note.x.clamp(self.x_range.0, self.x_range.1),
            self.clamp_y(note.y),
        )
    }
}

/// Upper y bound: the explicit ceiling, else 5% above the largest error.
/// Falls back to 1.0 when that is not a positive finite number.
pub fn y_ceiling(max_error: f64, y_max: Option<f64>) -> f64 {
    let ceiling = y_max.unwrap_or(max_error * Y_HEADROOM);
    if ceiling.is_finite() && ceiling > 0.0 {
        ceiling
    } else {
        1.0
    }
}

// ---------------------------------------------------------------------------
// Box plot
// ---------------------------------------------------------------------------

/// Box-and-whisker summary of one group.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub distance: f64,
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    /// Quartiles use linear interpolation between closest ranks. Whiskers
    /// end at the furthest sample within `1.5 × IQR` of the box; anything
    /// beyond is an outlier. `values` must be non-empty.
    pub fn from_values(distance: f64, values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR * iqr;
        let high_fence = q3 + WHISKER_IQR * iqr;

        let inside = sorted.iter().copied().filter(|v| *v >= low_fence && *v <= high_fence);
        let lower_whisker = inside.clone().fold(q1, f64::min);
        let upper_whisker = inside.fold(q3, f64::max);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < low_fence || *v > high_fence)
            .collect();

        BoxSummary {
            distance,
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
            outliers,
        }
    }
}

/// Quantile of sorted data, linear interpolation.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// One box per distance plus the annotated mean line.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxPlotChart {
    pub frame: ChartFrame,
    pub boxes: Vec<BoxSummary>,
    pub box_width: f64,
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

/// Every (distance, error) pair as a translucent marker.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub frame: ChartFrame,
    pub points: Vec<(f64, f64)>,
    pub alpha: f32,
}

// ---------------------------------------------------------------------------
// ChartSet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSet {
    pub boxplot: BoxPlotChart,
    pub scatter: ScatterChart,
}

impl ChartSet {
    pub fn build(report: &ErrorReport, partition: Partition, y_max: Option<f64>) -> Self {
        let frame = ChartFrame::new(report, partition, y_max);

        let mut box_frame = frame.clone();
        box_frame.mean.annotation = Some(Annotation {
            x: report.max_distance * 0.8,
            y: report.global_mean_error * 1.1,
            text: format!("Mean error: {:.2}", report.global_mean_error),
        });

        let boxes = report
            .groups
            .iter()
            .map(|g| BoxSummary::from_values(g.distance, &g.sample_errors))
            .collect();

        ChartSet {
            boxplot: BoxPlotChart {
                frame: box_frame,
                boxes,
                box_width: BOX_WIDTH,
            },
            scatter: ScatterChart {
                frame,
                points: report.points().collect(),
                alpha: SCATTER_ALPHA,
            },
        }
    }
}

/// `<prefix>_boxplot.png` and `<prefix>_scatter.png`.
pub fn artifact_paths(prefix: &Path) -> (PathBuf, PathBuf) {
    let with_suffix = |suffix: &str| {
        let mut name: OsString = prefix.as_os_str().to_owned();
        name.push(suffix);
        PathBuf::from(name)
    };
    (with_suffix("_boxplot.png"), with_suffix("_scatter.png"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::aggregate;
    use crate::data::model::MeasurementRecord;

    fn report() -> ErrorReport {
        let records: Vec<_> = [(10.0, 1.0), (10.0, 4.0), (20.0, 16.0)]
            .into_iter()
            .map(|(distance, error)| MeasurementRecord { distance, error })
            .collect();
        aggregate(&records).unwrap()
    }

    #[test]
    fn quartiles_interpolate_linearly() {
        let b = BoxSummary::from_values(5.0, &[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(b.q1, 1.75);
        assert_eq!(b.median, 2.5);
        assert_eq!(b.q3, 3.25);
        assert_eq!(b.lower_whisker, 1.0);
        assert_eq!(b.upper_whisker, 4.0);
        assert!(b.outliers.is_empty());
    }

    #[test]
    fn far_values_become_outliers() {
        let b = BoxSummary::from_values(5.0, &[1.0, 2.0, 2.0, 3.0, 100.0]);
        // q1 = 2, q3 = 3, upper fence = 4.5
        assert_eq!(b.upper_whisker, 3.0);
        assert_eq!(b.outliers, vec![100.0]);
    }

    #[test]
    fn single_value_box_collapses() {
        let b = BoxSummary::from_values(5.0, &[0.7]);
        assert_eq!(
            (b.lower_whisker, b.q1, b.median, b.q3, b.upper_whisker),
            (0.7, 0.7, 0.7, 0.7, 0.7)
        );
    }

    #[test]
    fn y_axis_policy() {
        assert_eq!(y_ceiling(2.0, Some(10.0)), 10.0);
        assert!((y_ceiling(2.0, None) - 2.1).abs() < 1e-12);
        assert_eq!(y_ceiling(0.0, None), 1.0);
    }

    #[test]
    fn chart_set_has_one_box_per_group_and_all_points() {
        let report = report();
        let charts = ChartSet::build(&report, Partition::Valid, None);

        let distances: Vec<f64> = charts.boxplot.boxes.iter().map(|b| b.distance).collect();
        assert_eq!(distances, vec![10.0, 20.0]);
        assert_eq!(charts.boxplot.box_width, BOX_WIDTH);
        assert_eq!(charts.scatter.points, vec![(10.0, 1.0), (10.0, 2.0), (20.0, 4.0)]);

        let frame = &charts.scatter.frame;
        assert_eq!(frame.y_range.0, 0.0);
        assert!((frame.y_range.1 - 4.2).abs() < 1e-12);
        assert_eq!(frame.mean.value, 7.0 / 3.0);
        assert_eq!(frame.mean.x_end, 20.0);
        assert!(frame.y_label.contains("Validation"));
    }

    #[test]
    fn only_the_box_plot_is_annotated() {
        let charts = ChartSet::build(&report(), Partition::Train, Some(3.0));
        let note = charts.boxplot.frame.mean.annotation.as_ref().unwrap();
        assert_eq!(note.text, "Mean error: 2.33");
        assert!((note.x - 16.0).abs() < 1e-12);
        assert!(charts.scatter.frame.mean.annotation.is_none());
        assert_eq!(charts.boxplot.frame.y_range, (0.0, 3.0));
        assert!(charts.boxplot.frame.title.starts_with("Training"));
    }

    #[test]
    fn annotation_above_the_ceiling_is_pulled_down() {
        // mean 7/3, annotation at 2.57 with the ceiling at 1.0
        let charts = ChartSet::build(&report(), Partition::Valid, Some(1.0));
        let frame = &charts.boxplot.frame;
        let note = frame.mean.annotation.as_ref().unwrap();
        assert!(!frame.shows_y(note.y));

        let (x, y) = frame.anchor(note);
        assert!((x - 16.0).abs() < 1e-12);
        assert_eq!(y, 1.0);
    }

    #[test]
    fn annotation_in_range_keeps_its_position() {
        let charts = ChartSet::build(&report(), Partition::Valid, None);
        let frame = &charts.boxplot.frame;
        let note = frame.mean.annotation.as_ref().unwrap();
        assert_eq!(frame.anchor(note), (note.x, note.y));
    }

    #[test]
    fn artifact_paths_append_suffixes() {
        let (boxplot, scatter) = artifact_paths(Path::new("out/run1"));
        assert_eq!(boxplot, PathBuf::from("out/run1_boxplot.png"));
        assert_eq!(scatter, PathBuf::from("out/run1_scatter.png"));
    }
}
