use eframe::egui::{Align2, Color32, RichText, Stroke, Ui};
use egui_plot::{
    BoxElem, BoxPlot, BoxSpread, Legend, Line, LineStyle, Plot, PlotBounds, PlotPoint, PlotPoints,
    PlotUi, Points, Text,
};

use crate::color::{mean_line_color, to_color32, to_color32_alpha};
use crate::render::{BoxPlotChart, ChartFrame, ScatterChart, MEAN_LEGEND};

// ---------------------------------------------------------------------------
// Chart views (central panel)
// ---------------------------------------------------------------------------

/// Box plot: one box per distance, outliers as hollow markers.
pub fn boxplot_view(ui: &mut Ui, chart: &BoxPlotChart) {
    let frame = &chart.frame;
    let edge = to_color32(frame.color);

    show_framed(ui, "boxplot", frame, |plot_ui| {
        let boxes: Vec<BoxElem> = chart
            .boxes
            .iter()
            .map(|b| {
                BoxElem::new(
                    b.distance,
                    BoxSpread::new(b.lower_whisker, b.q1, b.median, b.q3, b.upper_whisker),
                )
                .name(format!("{} m", b.distance))
                .box_width(chart.box_width)
                .whisker_width(chart.box_width / 2.0)
                .stroke(Stroke::new(1.5, edge))
                .fill(Color32::TRANSPARENT)
            })
            .collect();
        plot_ui.box_plot(BoxPlot::new(boxes).color(edge).name("RMSE"));

        let outliers: Vec<[f64; 2]> = chart
            .boxes
            .iter()
            .flat_map(|b| b.outliers.iter().map(move |&v| [b.distance, v]))
            .collect();
        if !outliers.is_empty() {
            plot_ui.points(
                Points::new(PlotPoints::from(outliers))
                    .radius(3.0)
                    .filled(false)
                    .color(edge),
            );
        }

        mean_line(plot_ui, frame);
    });
}

/// Scatter plot of every (distance, error) pair.
pub fn scatter_view(ui: &mut Ui, chart: &ScatterChart) {
    let frame = &chart.frame;
    let marker = to_color32_alpha(frame.color, chart.alpha);

    show_framed(ui, "scatter", frame, |plot_ui| {
        let points: Vec<[f64; 2]> = chart.points.iter().map(|&(d, e)| [d, e]).collect();
        plot_ui.points(
            Points::new(PlotPoints::from(points))
                .radius(4.0)
                .color(marker)
                .name("RMSE"),
        );
        mean_line(plot_ui, frame);
    });
}

/// Plot with the frame's labels; the view opens and resets to the frame's ranges.
fn show_framed(ui: &mut Ui, id: &str, frame: &ChartFrame, add_contents: impl FnOnce(&mut PlotUi)) {
    let bounds = view_bounds(frame);
    let ([x_min, y_min], [x_max, y_max]) = (bounds.min(), bounds.max());

    Plot::new(id)
        .legend(Legend::default())
        .x_axis_label(frame.x_label.clone())
        .y_axis_label(frame.y_label.clone())
        .default_x_bounds(x_min, x_max)
        .default_y_bounds(y_min, y_max)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, add_contents);
}

fn view_bounds(frame: &ChartFrame) -> PlotBounds {
    PlotBounds::from_min_max(
        [frame.x_range.0, frame.y_range.0],
        [frame.x_range.1, frame.y_range.1],
    )
}

fn mean_line(plot_ui: &mut PlotUi, frame: &ChartFrame) {
    let red = to_color32(mean_line_color());
    let y = frame.mean.value;

    plot_ui.line(
        Line::new(PlotPoints::from(vec![[0.0, y], [frame.mean.x_end, y]]))
            .color(red)
            .style(LineStyle::dashed_loose())
            .width(1.0)
            .name(MEAN_LEGEND),
    );

    if let Some(note) = &frame.mean.annotation {
        let (x, y) = frame.anchor(note);
        plot_ui.text(
            Text::new(
                PlotPoint::new(x, y),
                RichText::new(&note.text).size(16.0),
            )
            .color(red)
            .anchor(Align2::LEFT_BOTTOM),
        );
    }
}
