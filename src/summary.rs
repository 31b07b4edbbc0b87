use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::model::{AggregatedGroup, ErrorReport, Partition};

/// JSON view of one run, written with `--summary_json`.
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub partition: Partition,
    pub record_count: usize,
    pub skipped_files: usize,
    pub global_mean_error: f64,
    pub max_distance: f64,
    pub groups: Vec<GroupSummary<'a>>,
}

/// One distance group as written to JSON.
#[derive(Debug, Serialize)]
pub struct GroupSummary<'a> {
    pub distance: f64,
    pub count: usize,
    pub mean_error: f64,
    pub std_error: f64,
    pub sample_errors: &'a [f64],
}

impl<'a> From<&'a AggregatedGroup> for GroupSummary<'a> {
    fn from(group: &'a AggregatedGroup) -> Self {
        GroupSummary {
            distance: group.distance,
            count: group.len(),
            mean_error: group.mean_error,
            std_error: group.std_error,
            sample_errors: &group.sample_errors,
        }
    }
}

impl<'a> RunSummary<'a> {
    pub fn new(report: &'a ErrorReport, partition: Partition, skipped_files: usize) -> Self {
        RunSummary {
            partition,
            record_count: report.record_count(),
            skipped_files,
            global_mean_error: report.global_mean_error,
            max_distance: report.max_distance,
            groups: report.groups.iter().map(GroupSummary::from).collect(),
        }
    }
}

pub fn write_summary(path: &Path, summary: &RunSummary<'_>) -> Result<()> {
    let text = serde_json::to_string_pretty(summary).context("serialising summary")?;
    std::fs::write(path, text)
        .with_context(|| format!("writing summary to {}", path.display()))?;
    log::info!("Summary saved: {}", path.display());
    Ok(())
}
