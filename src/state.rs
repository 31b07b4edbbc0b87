use std::path::{Path, PathBuf};

use crate::pipeline::Analysis;
use crate::render::{png, ChartSet};

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartTab {
    #[default]
    BoxPlot,
    Scatter,
}

/// The full viewer state, independent of rendering.
pub struct ViewerState {
    pub analysis: Analysis,

    /// Charts built once from the analysis.
    pub charts: ChartSet,

    /// Which chart the central panel shows.
    pub tab: ChartTab,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl ViewerState {
    pub fn new(analysis: Analysis, y_max: Option<f64>) -> Self {
        let charts = analysis.charts(y_max);
        Self {
            analysis,
            charts,
            tab: ChartTab::default(),
            status_message: None,
        }
    }

    /// Write both charts as PNG next to `prefix`, reporting in the status line.
    pub fn save_pngs(&mut self, prefix: &Path) {
        match png::save_chart_set(&self.charts, prefix) {
            Ok(paths) => {
                self.status_message = Some(format!("Saved {}", join_paths(&paths)));
            }
            Err(e) => {
                log::error!("Failed to save charts: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

/// Turn a chosen file path into an output prefix by dropping its extension.
pub fn prefix_from_pick(picked: &Path) -> PathBuf {
    picked.with_extension("")
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{AggregatedGroup, ErrorReport, Partition};

    fn analysis() -> Analysis {
        Analysis {
            partition: Partition::Valid,
            report: ErrorReport {
                groups: vec![AggregatedGroup {
                    distance: 10.0,
                    mean_error: 1.0,
                    std_error: 0.0,
                    sample_errors: vec![1.0],
                }],
                global_mean_error: 1.0,
                max_distance: 10.0,
                max_error: 1.0,
            },
            skipped_files: 0,
        }
    }

    #[test]
    fn new_state_builds_charts_with_ceiling() {
        let state = ViewerState::new(analysis(), Some(5.0));
        assert_eq!(state.tab, ChartTab::BoxPlot);
        assert_eq!(state.charts.scatter.frame.y_range, (0.0, 5.0));
        assert!(state.status_message.is_none());
    }

    #[test]
    fn failed_save_sets_error_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = ViewerState::new(analysis(), None);
        state.save_pngs(&dir.path().join("missing").join("run"));
        let msg = state.status_message.unwrap();
        assert!(msg.starts_with("Error: failed to write chart"), "{msg}");
    }

    #[test]
    fn picked_file_extension_is_dropped() {
        assert_eq!(prefix_from_pick(Path::new("out/run.png")), PathBuf::from("out/run"));
        assert_eq!(prefix_from_pick(Path::new("out/run")), PathBuf::from("out/run"));
    }
}
