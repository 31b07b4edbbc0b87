use anyhow::{anyhow, Result};
use eframe::egui;

use crate::pipeline::Analysis;
use crate::state::{ChartTab, ViewerState};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LossViewerApp {
    pub state: ViewerState,
}

impl LossViewerApp {
    pub fn new(analysis: Analysis, y_max: Option<f64>) -> Self {
        Self {
            state: ViewerState::new(analysis, y_max),
        }
    }
}

impl eframe::App for LossViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar + chart tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: per-distance statistics ----
        egui::SidePanel::left("stats_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.tab {
            ChartTab::BoxPlot => plot::boxplot_view(ui, &self.state.charts.boxplot),
            ChartTab::Scatter => plot::scatter_view(ui, &self.state.charts.scatter),
        });
    }
}

/// Open the interactive window; returns when it is closed.
pub fn run_viewer(analysis: Analysis, y_max: Option<f64>) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let title = format!("Loss vs distance – {}", analysis.partition.display_name());
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(LossViewerApp::new(analysis, y_max)))),
    )
    .map_err(|e| anyhow!("viewer failed: {e}"))
}
