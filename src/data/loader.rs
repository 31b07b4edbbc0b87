use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::ReportError;

// ---------------------------------------------------------------------------
// ResultTable – the two consumed columns of a result file
// ---------------------------------------------------------------------------

/// Column 0 (target) and column 1 (predicted) of a result file.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    /// Header of column 0; drives the value transform.
    pub first_header: String,
    pub target: Vec<f64>,
    pub predicted: Vec<f64>,
}

impl ResultTable {
    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Whether [`load_result_table`] understands this file's extension.
pub fn is_supported(path: &Path) -> bool {
    matches!(extension(path).as_str(), "csv" | "parquet" | "pq")
}

/// Load the first two columns of a result file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, numeric columns 0 and 1
/// * `.parquet` – first two schema fields, any numeric type
///
/// The file handle is dropped before returning, on success or failure.
pub fn load_result_table(path: &Path) -> Result<ResultTable> {
    let table = match extension(path).as_str() {
        "csv" => load_csv(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => {
            return Err(ReportError::malformed(path, format!("unsupported extension .{other}")).into())
        }
    };

    if table.is_empty() {
        return Err(ReportError::malformed(path, "no data rows").into());
    }
    Ok(table)
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<ResultTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?;
    if headers.len() < 2 {
        return Err(ReportError::malformed(
            path,
            format!("expected at least 2 columns, found {}", headers.len()),
        )
        .into());
    }
    let first_header = headers.get(0).unwrap_or_default().to_string();

    let mut target = Vec::new();
    let mut predicted = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        target.push(parse_cell(path, record.get(0), row_no, 0)?);
        predicted.push(parse_cell(path, record.get(1), row_no, 1)?);
    }

    Ok(ResultTable {
        first_header,
        target,
        predicted,
    })
}

fn parse_cell(path: &Path, cell: Option<&str>, row: usize, col: usize) -> Result<f64> {
    let raw = cell.unwrap_or("").trim();
    raw.parse::<f64>().map_err(|_| {
        ReportError::malformed(path, format!("row {row}, column {col}: '{raw}' is not a number"))
            .into()
    })
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Read the first two schema fields across every record batch.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).  Integer and float columns are cast to
/// `f64`; nulls are rejected.
fn load_parquet(path: &Path) -> Result<ResultTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let schema = builder.schema().clone();
    if schema.fields().len() < 2 {
        return Err(ReportError::malformed(
            path,
            format!("expected at least 2 columns, found {}", schema.fields().len()),
        )
        .into());
    }
    let first_header = schema.field(0).name().clone();

    let reader = builder.build().context("building parquet reader")?;

    let mut target = Vec::new();
    let mut predicted = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        append_f64_column(path, batch.column(0), 0, &mut target)?;
        append_f64_column(path, batch.column(1), 1, &mut predicted)?;
    }

    Ok(ResultTable {
        first_header,
        target,
        predicted,
    })
}

fn append_f64_column(
    path: &Path,
    col: &arrow::array::ArrayRef,
    col_idx: usize,
    out: &mut Vec<f64>,
) -> Result<()> {
    let cast_col = cast(col, &DataType::Float64).map_err(|e| {
        ReportError::malformed(
            path,
            format!("column {col_idx} ({:?}) is not numeric: {e}", col.data_type()),
        )
    })?;
    let values = cast_col.as_primitive::<Float64Type>();
    if values.null_count() > 0 {
        return Err(ReportError::malformed(
            path,
            format!("column {col_idx} contains null or non-numeric values"),
        )
        .into());
    }
    out.extend(values.values().iter().copied());
    Ok(())
}
