/// Data layer: file selection, loading, per-file error and aggregation.
///
/// Architecture:
/// ```text
///  <base>/<partition>/<partition>_*_L<n>m*.{csv,parquet}
///        │
///        ▼
///   ┌──────────┐
///   │ selector │  glob → Vec<PathBuf>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ extract  │  distance from name, loader + transform → RMSE
///   └──────────┘
///        │  Extraction { records, skipped }
///        ▼
///   ┌───────────┐
///   │ aggregate │  sort, sqrt, group by distance → ErrorReport
///   └───────────┘
/// ```

pub mod aggregate;
pub mod extract;
pub mod loader;
pub mod model;
pub mod selector;
pub mod transform;
