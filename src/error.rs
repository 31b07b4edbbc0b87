use std::path::PathBuf;

use thiserror::Error;

use crate::data::model::Partition;

/// Fatal pipeline conditions. Per-file distance skips are not errors and
/// never show up here.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(
        "no valid result files for the {partition} partition under {}: \
         no file matched or none carried a `_L<digits>m` distance token",
        folder.display()
    )]
    EmptyDataset { partition: Partition, folder: PathBuf },

    #[error("cannot aggregate an empty set of measurement records")]
    NoRecords,

    #[error("malformed result table {}: {reason}", path.display())]
    MalformedTable { path: PathBuf, reason: String },

    #[error("failed to write chart {}: {message}", path.display())]
    Render { path: PathBuf, message: String },

    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl ReportError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ReportError::MalformedTable {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
