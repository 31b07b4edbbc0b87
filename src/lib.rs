//! Aggregate per-file prediction RMSE by the distance parameter encoded in
//! result file names, and chart it as a box plot and a scatter plot.

pub mod app;
pub mod cli;
pub mod color;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod state;
pub mod summary;
pub mod ui;

pub use error::ReportError;
pub use pipeline::{analyze, write_outputs, Analysis, RunConfig};
