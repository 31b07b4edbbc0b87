use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Partition – which subset of results is processed
// ---------------------------------------------------------------------------

/// Dataset partition. Selects the sub-directory and the file name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    Train,
    #[default]
    Valid,
}

impl Partition {
    /// Directory name and file prefix (`train` / `valid`).
    pub fn key(self) -> &'static str {
        match self {
            Partition::Train => "train",
            Partition::Valid => "valid",
        }
    }

    /// Human readable name used in chart labels.
    pub fn display_name(self) -> &'static str {
        match self {
            Partition::Train => "Training",
            Partition::Valid => "Validation",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// MeasurementRecord – one result file reduced to (distance, error)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeasurementRecord {
    /// Distance parameter in meters, parsed from the file name.
    pub distance: f64,
    /// RMSE between target and predicted columns.
    pub error: f64,
}

/// Output of the extraction stage.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// One record per file whose name carried a distance token, in
    /// discovery order.
    pub records: Vec<MeasurementRecord>,
    /// Files dropped because no distance could be parsed from their name.
    pub skipped: usize,
}

// ---------------------------------------------------------------------------
// Aggregated output
// ---------------------------------------------------------------------------

/// All records sharing one distance value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedGroup {
    pub distance: f64,
    pub mean_error: f64,
    /// Population standard deviation.
    pub std_error: f64,
    /// Errors of the group, in sorted-record order.
    pub sample_errors: Vec<f64>,
}

impl AggregatedGroup {
    pub fn len(&self) -> usize {
        self.sample_errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sample_errors.is_empty()
    }
}

/// The aggregator's result. Never built from an empty record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    /// Groups ordered by ascending distance.
    pub groups: Vec<AggregatedGroup>,
    /// Mean over every individual error, not over group means.
    pub global_mean_error: f64,
    pub max_distance: f64,
    pub max_error: f64,
}

impl ErrorReport {
    /// Every (distance, error) pair, ordered by distance.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.groups
            .iter()
            .flat_map(|g| g.sample_errors.iter().map(move |&e| (g.distance, e)))
    }

    /// Total number of records behind the report.
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(AggregatedGroup::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_keys_and_labels() {
        assert_eq!(Partition::default(), Partition::Valid);
        assert_eq!(Partition::Train.key(), "train");
        assert_eq!(Partition::Valid.to_string(), "valid");
        assert_eq!(Partition::Train.display_name(), "Training");
    }

    #[test]
    fn report_points_follow_group_order() {
        let report = ErrorReport {
            groups: vec![
                AggregatedGroup {
                    distance: 10.0,
                    mean_error: 1.5,
                    std_error: 0.5,
                    sample_errors: vec![1.0, 2.0],
                },
                AggregatedGroup {
                    distance: 20.0,
                    mean_error: 3.0,
                    std_error: 0.0,
                    sample_errors: vec![3.0],
                },
            ],
            global_mean_error: 2.0,
            max_distance: 20.0,
            max_error: 3.0,
        };
        let points: Vec<_> = report.points().collect();
        assert_eq!(points, vec![(10.0, 1.0), (10.0, 2.0), (20.0, 3.0)]);
        assert_eq!(report.record_count(), 3);
    }
}
