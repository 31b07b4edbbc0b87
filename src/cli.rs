use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::data::model::Partition;
use crate::pipeline::RunConfig;

/// Process prediction-loss result files and plot RMSE against the distance
/// parameter encoded in their names.
#[derive(Parser, Debug)]
#[command(name = "loss-distance", version, about)]
pub struct Args {
    /// Folder containing the `train/` and `valid/` result directories
    pub folder_path: PathBuf,

    /// Dataset partition to process
    #[arg(long = "dataset_key", value_enum, default_value_t = DatasetKey::Valid)]
    pub dataset_key: DatasetKey,

    /// Upper limit for the y-axis
    #[arg(long = "y_max", value_parser = parse_y_max)]
    pub y_max: Option<f64>,

    /// Path prefix for the PNG files; shows an interactive window when omitted
    #[arg(long = "output_plot")]
    pub output_plot: Option<PathBuf>,

    /// Also write the aggregated statistics as JSON
    #[arg(long = "summary_json")]
    pub summary_json: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DatasetKey {
    Train,
    Valid,
}

impl From<DatasetKey> for Partition {
    fn from(key: DatasetKey) -> Self {
        match key {
            DatasetKey::Train => Partition::Train,
            DatasetKey::Valid => Partition::Valid,
        }
    }
}

fn parse_y_max(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("y_max must be a positive finite number, got {s}"))
    }
}

impl Args {
    pub fn into_config(self) -> RunConfig {
        RunConfig {
            folder: self.folder_path,
            partition: self.dataset_key.into(),
            y_max: self.y_max,
            output_plot: self.output_plot,
            summary_json: self.summary_json,
        }
    }
}
