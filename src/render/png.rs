use std::error::Error;
use std::path::{Path, PathBuf};

use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use super::{artifact_paths, BoxPlotChart, ChartFrame, ChartSet, ScatterChart, MEAN_LEGEND};
use crate::color::{mean_line_color, to_rgb_color};
use crate::error::ReportError;

const PLOT_WIDTH: u32 = 1200;
const PLOT_HEIGHT: u32 = 700;
const FONT_SIZE_TITLE: u32 = 28;
const FONT_SIZE_LABEL: u32 = 20;

type Chart<'a, 'b> = ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Write both charts next to `prefix` and return the written paths.
pub fn save_chart_set(charts: &ChartSet, prefix: &Path) -> Result<Vec<PathBuf>, ReportError> {
    let (boxplot_path, scatter_path) = artifact_paths(prefix);
    save_boxplot(&charts.boxplot, &boxplot_path)?;
    save_scatter(&charts.scatter, &scatter_path)?;
    Ok(vec![boxplot_path, scatter_path])
}

pub fn save_boxplot(chart: &BoxPlotChart, path: &Path) -> Result<(), ReportError> {
    check_target_dir(path)?;
    draw_boxplot(chart, path).map_err(|e| render_error(path, e))?;
    log::info!("Box plot saved: {}", path.display());
    Ok(())
}

pub fn save_scatter(chart: &ScatterChart, path: &Path) -> Result<(), ReportError> {
    check_target_dir(path)?;
    draw_scatter(chart, path).map_err(|e| render_error(path, e))?;
    log::info!("Scatter plot saved: {}", path.display());
    Ok(())
}

/// `Render` error when the directory meant to hold `path` is missing.
fn check_target_dir(path: &Path) -> Result<(), ReportError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => Err(ReportError::Render {
            path: path.to_path_buf(),
            message: format!("output directory {} does not exist", dir.display()),
        }),
        _ => Ok(()),
    }
}

fn render_error(path: &Path, e: Box<dyn Error>) -> ReportError {
    ReportError::Render {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

fn draw_boxplot(chart: &BoxPlotChart, path: &Path) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;
    let frame = &chart.frame;
    let mut ctx = frame_chart(&root, frame)?;

    let edge = to_rgb_color(frame.color);
    let half = chart.box_width / 2.0;
    for b in &chart.boxes {
        let y = |v: f64| frame.clamp_y(v);
        let (x0, x1) = (b.distance - half, b.distance + half);
        let cap = half / 2.0;

        ctx.draw_series(std::iter::once(Rectangle::new(
            [(x0, y(b.q1)), (x1, y(b.q3))],
            edge.stroke_width(2),
        )))?;
        ctx.draw_series(
            [
                vec![(x0, y(b.median)), (x1, y(b.median))],
                vec![(b.distance, y(b.q1)), (b.distance, y(b.lower_whisker))],
                vec![(b.distance, y(b.q3)), (b.distance, y(b.upper_whisker))],
                vec![(b.distance - cap, y(b.lower_whisker)), (b.distance + cap, y(b.lower_whisker))],
                vec![(b.distance - cap, y(b.upper_whisker)), (b.distance + cap, y(b.upper_whisker))],
            ]
            .into_iter()
            .map(|pts| PathElement::new(pts, edge.stroke_width(2))),
        )?;
        ctx.draw_series(
            b.outliers
                .iter()
                .filter(|v| frame.shows_y(**v))
                .map(|&v| Circle::new((b.distance, v), 4, edge.stroke_width(1))),
        )?;
    }

    draw_mean_line(&mut ctx, frame)?;
    root.present()?;
    Ok(())
}

fn draw_scatter(chart: &ScatterChart, path: &Path) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;
    let frame = &chart.frame;
    let mut ctx = frame_chart(&root, frame)?;

    let marker = to_rgb_color(frame.color).mix(chart.alpha as f64).filled();
    ctx.draw_series(
        chart
            .points
            .iter()
            .filter(|(_, e)| frame.shows_y(*e))
            .map(|&(d, e)| Circle::new((d, e), 5, marker)),
    )?;

    draw_mean_line(&mut ctx, frame)?;
    root.present()?;
    Ok(())
}

fn frame_chart<'a, 'b>(
    root: &'a DrawingArea<BitMapBackend<'b>, Shift>,
    frame: &ChartFrame,
) -> Result<Chart<'a, 'b>, Box<dyn Error>> {
    let mut ctx = ChartBuilder::on(root)
        .margin(20)
        .caption(&frame.title, ("sans-serif", FONT_SIZE_TITLE))
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(
            frame.x_range.0..frame.x_range.1,
            frame.y_range.0..frame.y_range.1,
        )?;

    ctx.configure_mesh()
        .x_desc(frame.x_label.as_str())
        .y_desc(frame.y_label.as_str())
        .axis_desc_style(("sans-serif", FONT_SIZE_LABEL))
        .draw()?;
    Ok(ctx)
}

fn draw_mean_line<'a, 'b: 'a>(
    ctx: &mut Chart<'a, 'b>,
    frame: &ChartFrame,
) -> Result<(), Box<dyn Error>> {
    let red = to_rgb_color(mean_line_color());
    let y = frame.clamp_y(frame.mean.value);

    ctx.draw_series(DashedLineSeries::new(
        vec![(0.0, y), (frame.mean.x_end, y)],
        10,
        6,
        red.stroke_width(1),
    ))?
    .label(MEAN_LEGEND)
    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], red.stroke_width(2)));

    if let Some(note) = &frame.mean.annotation {
        let style = ("sans-serif", FONT_SIZE_LABEL).into_font().color(&red);
        ctx.draw_series(std::iter::once(Text::new(
            note.text.clone(),
            frame.anchor(note),
            style,
        )))?;
    }

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}
