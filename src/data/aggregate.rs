use super::model::{AggregatedGroup, ErrorReport, MeasurementRecord};
use crate::error::ReportError;

/// Group per-file errors by distance and summarise them.
///
/// Steps, in order:
/// 1. stable sort by distance (ties keep discovery order),
/// 2. square root of every error value,
/// 3. mean and population std per distinct distance,
/// 4. global mean over every value.
///
/// Step 2 square-roots values that are already RMSE, so every reported error
/// is on a `sqrt(RMSE)` scale.
pub fn aggregate(records: &[MeasurementRecord]) -> Result<ErrorReport, ReportError> {
    if records.is_empty() {
        return Err(ReportError::NoRecords);
    }

    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    for record in &mut sorted {
        record.error = record.error.sqrt();
    }

    let groups: Vec<AggregatedGroup> = sorted
        .chunk_by(|a, b| a.distance == b.distance)
        .map(|chunk| {
            let sample_errors: Vec<f64> = chunk.iter().map(|r| r.error).collect();
            AggregatedGroup {
                distance: chunk[0].distance,
                mean_error: mean(&sample_errors),
                std_error: population_std(&sample_errors),
                sample_errors,
            }
        })
        .collect();

    let all_errors: Vec<f64> = sorted.iter().map(|r| r.error).collect();
    let max_error = all_errors.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let max_distance = sorted
        .last()
        .map(|r| r.distance)
        .unwrap_or_default();

    Ok(ErrorReport {
        groups,
        global_mean_error: mean(&all_errors),
        max_distance,
        max_error,
    })
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Standard deviation with divisor `n`.
pub fn population_std(values: &[f64]) -> f64 {
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}
