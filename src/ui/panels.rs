use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::{prefix_from_pick, ChartTab, ViewerState};

// ---------------------------------------------------------------------------
// Left side panel – per-distance statistics
// ---------------------------------------------------------------------------

/// Render the statistics panel.
pub fn side_panel(ui: &mut Ui, state: &ViewerState) {
    let analysis = &state.analysis;
    let report = &analysis.report;

    ui.heading(format!("{} dataset", analysis.partition.display_name()));
    ui.separator();

    ui.label(format!(
        "{} files in {} distance groups",
        report.record_count(),
        report.groups.len()
    ));
    ui.label(format!("Global mean error: {:.4}", report.global_mean_error));
    if analysis.skipped_files > 0 {
        ui.label(
            RichText::new(format!(
                "{} file(s) skipped: no distance in name",
                analysis.skipped_files
            ))
            .color(Color32::YELLOW),
        );
    }
    ui.separator();

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Distance (m)", "n", "Mean", "Std"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for group in &report.groups {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(format!("{}", group.distance));
                    });
                    row.col(|ui| {
                        ui.label(group.len().to_string());
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.4}", group.mean_error));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.4}", group.std_error));
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu, chart tabs and status line.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Save PNGs…").clicked() {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.selectable_value(&mut state.tab, ChartTab::BoxPlot, "Box plot");
        ui.selectable_value(&mut state.tab, ChartTab::Scatter, "Scatter");

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn save_file_dialog(state: &mut ViewerState) {
    let file = rfd::FileDialog::new()
        .set_title("Save charts (suffixes _boxplot / _scatter are added)")
        .set_file_name(state.analysis.partition.key())
        .add_filter("PNG", &["png"])
        .save_file();

    if let Some(path) = file {
        state.save_pngs(&prefix_from_pick(&path));
    }
}
