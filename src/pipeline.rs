use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::data::aggregate::aggregate;
use crate::data::extract::extract_records;
use crate::data::model::{ErrorReport, Partition};
use crate::data::selector::select_files;
use crate::error::ReportError;
use crate::render::{png, ChartSet};
use crate::summary::{write_summary, RunSummary};

// ---------------------------------------------------------------------------
// Run configuration
// ---------------------------------------------------------------------------

/// Everything one invocation needs, independent of how it was parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Base folder holding the `train/` and `valid/` sub-directories.
    pub folder: PathBuf,
    pub partition: Partition,
    /// Fixed y-axis ceiling; defaults to 5% above the largest error.
    pub y_max: Option<f64>,
    /// Path prefix for PNG output. `None` opens the interactive viewer.
    pub output_plot: Option<PathBuf>,
    pub summary_json: Option<PathBuf>,
}

impl RunConfig {
    pub fn new(folder: impl Into<PathBuf>, partition: Partition) -> Self {
        RunConfig {
            folder: folder.into(),
            partition,
            y_max: None,
            output_plot: None,
            summary_json: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// Aggregated result of one partition, ready to be rendered.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub partition: Partition,
    pub report: ErrorReport,
    pub skipped_files: usize,
}

impl Analysis {
    pub fn charts(&self, y_max: Option<f64>) -> ChartSet {
        ChartSet::build(&self.report, self.partition, y_max)
    }
}

/// Selector → extractor → aggregator.
///
/// Fails with [`ReportError::EmptyDataset`] when no file yields a record.
pub fn analyze(config: &RunConfig) -> Result<Analysis> {
    let files = select_files(&config.folder, config.partition)
        .with_context(|| format!("selecting result files under {}", config.folder.display()))?;
    log::info!(
        "Found {} candidate {} files under {}",
        files.len(),
        config.partition,
        config.folder.display()
    );

    let extraction = extract_records(&files)?;
    if extraction.records.is_empty() {
        return Err(ReportError::EmptyDataset {
            partition: config.partition,
            folder: config.folder.clone(),
        }
        .into());
    }
    if extraction.skipped > 0 {
        log::warn!(
            "{} file(s) skipped: no `_L<digits>m` distance token in the name",
            extraction.skipped
        );
    }

    let report = aggregate(&extraction.records)?;
    log::info!(
        "{} distance groups, global mean error {:.4}",
        report.groups.len(),
        report.global_mean_error
    );

    Ok(Analysis {
        partition: config.partition,
        report,
        skipped_files: extraction.skipped,
    })
}

/// Write the summary JSON and both PNGs, if requested.
///
/// Returns the chart paths written, empty when `output_plot` is unset.
pub fn write_outputs(config: &RunConfig, analysis: &Analysis) -> Result<Vec<PathBuf>> {
    if let Some(path) = &config.summary_json {
        let summary = RunSummary::new(&analysis.report, analysis.partition, analysis.skipped_files);
        write_summary(path, &summary)?;
    }

    match &config.output_plot {
        Some(prefix) => {
            let charts = analysis.charts(config.y_max);
            Ok(png::save_chart_set(&charts, prefix)?)
        }
        None => Ok(Vec::new()),
    }
}
