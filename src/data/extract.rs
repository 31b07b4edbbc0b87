use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::loader::load_result_table;
use super::model::{Extraction, MeasurementRecord};
use super::transform::{rmse, ValueTransform};

// ---------------------------------------------------------------------------
// Distance token
// ---------------------------------------------------------------------------

/// Parse the distance from a file name containing `_L<digits>m`.
///
/// Takes the text after the first `_L` up to the next `m` (or the end of the
/// name when there is none), keeps only ASCII digits and parses them.
/// Returns `None` when no digit survives or `_L` is absent.
pub fn parse_distance(file_name: &str) -> Option<f64> {
    let (_, after) = file_name.split_once("_L")?;
    let token = after.split('m').next().unwrap_or("");
    let digits: String = token.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Reduce one result file to its RMSE, after the header-selected transform.
pub fn file_error(path: &Path) -> Result<f64> {
    let mut table = load_result_table(path)?;
    let transform = ValueTransform::from_header(&table.first_header);
    transform.apply_all(&mut table.target);
    transform.apply_all(&mut table.predicted);

    let error = rmse(&table.target, &table.predicted);
    if !error.is_finite() {
        log::warn!(
            "{}: non-finite error {error} after {transform:?} transform",
            path.display()
        );
    }
    Ok(error)
}

/// Build one [`MeasurementRecord`] per file whose name carries a distance.
///
/// Files without a distance token are skipped and counted, never read.
/// A malformed table aborts the whole extraction with the file's path.
pub fn extract_records(paths: &[PathBuf]) -> Result<Extraction> {
    let mut extraction = Extraction::default();

    for path in paths {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        let Some(distance) = parse_distance(&file_name) else {
            log::debug!("Skipping {}: no distance token in name", path.display());
            extraction.skipped += 1;
            continue;
        };

        let error = file_error(path)
            .with_context(|| format!("processing result file {}", path.display()))?;
        extraction.records.push(MeasurementRecord { distance, error });
    }

    log::info!(
        "Extracted {} records from {} files ({} skipped)",
        extraction.records.len(),
        paths.len(),
        extraction.skipped
    );
    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_round_trips_through_file_name() {
        for n in [0u64, 1, 7, 10, 250, 1000, 123456] {
            let name = format!("valid_L{n}m_suffix.csv");
            assert_eq!(parse_distance(&name), Some(n as f64), "{name}");
        }
    }

    #[test]
    fn distance_strips_non_digits_in_token() {
        assert_eq!(parse_distance("train_L1_5m.csv"), Some(15.0));
        assert_eq!(parse_distance("train_Lx20m.csv"), Some(20.0));
    }

    #[test]
    fn distance_uses_first_l_token_and_next_m() {
        assert_eq!(parse_distance("valid_L30m_L40m.csv"), Some(30.0));
        // the `m` of "mix" ends the token
        assert_eq!(parse_distance("valid_L12mix.csv"), Some(12.0));
    }

    #[test]
    fn distance_without_m_runs_to_end_of_name() {
        assert_eq!(parse_distance("valid_L25.csv"), Some(25.0));
    }

    #[test]
    fn names_without_digits_are_rejected() {
        assert_eq!(parse_distance("valid_Lm_run.csv"), None);
        assert_eq!(parse_distance("valid_Labcm.csv"), None);
        assert_eq!(parse_distance("valid_run.csv"), None);
    }

    #[test]
    fn skipped_files_are_counted_and_not_read() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("valid_L10m_a.csv");
        std::fs::write(&good, "t,p\n1,2\n3,4\n").unwrap();
        // never opened: a broken table behind an unparseable name is fine
        let skipped = dir.path().join("valid_Lm_b.csv");
        std::fs::write(&skipped, "garbage").unwrap();

        let extraction = extract_records(&[good, skipped]).unwrap();
        assert_eq!(extraction.skipped, 1);
        assert_eq!(
            extraction.records,
            vec![MeasurementRecord {
                distance: 10.0,
                error: 1.0
            }]
        );
    }

    #[test]
    fn malformed_table_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("valid_L10m_bad.csv");
        std::fs::write(&bad, "t,p\n1,oops\n").unwrap();

        let err = extract_records(&[bad]).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("valid_L10m_bad.csv"), "{msg}");
        assert!(msg.contains("'oops' is not a number"), "{msg}");
    }

    #[test]
    fn log_header_undoes_log10_before_rmse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("valid_L10m.csv");
        // 10^1 = 10 vs 10^2 = 100 -> diff 90 on one row, 0 on the other
        std::fs::write(&path, "Log_target,log_pred\n1,2\n0,0\n").unwrap();
        let error = file_error(&path).unwrap();
        let expected = (90f64.powi(2) / 2.0).sqrt();
        assert!((error - expected).abs() < 1e-9, "{error} vs {expected}");
    }

    #[test]
    fn exp_header_maps_values_to_ten_ln() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("valid_L10m.csv");
        let e = std::f64::consts::E;
        std::fs::write(&path, format!("exp_target,exp_pred\n1,{e}\n")).unwrap();
        let error = file_error(&path).unwrap();
        assert!((error - 10.0).abs() < 1e-9, "{error}");
    }
}
