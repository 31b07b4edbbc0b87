// ---------------------------------------------------------------------------
// Value transform selected from the first column header
// ---------------------------------------------------------------------------

/// Transform applied to both target and predicted values before the error
/// is computed. Chosen once per file from the header of column 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueTransform {
    /// Raw values.
    #[default]
    None,
    /// Values are stored as log10; undo with `10^v`.
    Log10Inverse,
    /// Values are stored linearly; map with `10 * ln(v)`.
    ExpToLog,
}

impl ValueTransform {
    /// Case-insensitive substring match: `log` wins over `exp`.
    pub fn from_header(header: &str) -> Self {
        let lower = header.to_lowercase();
        if lower.contains("log") {
            ValueTransform::Log10Inverse
        } else if lower.contains("exp") {
            ValueTransform::ExpToLog
        } else {
            ValueTransform::None
        }
    }

    pub fn apply(self, value: f64) -> f64 {
        match self {
            ValueTransform::None => value,
            ValueTransform::Log10Inverse => 10f64.powf(value),
            ValueTransform::ExpToLog => 10.0 * value.ln(),
        }
    }

    pub fn apply_all(self, values: &mut [f64]) {
        if self == ValueTransform::None {
            return;
        }
        for v in values.iter_mut() {
            *v = self.apply(*v);
        }
    }
}

/// Root-mean-square difference of two equally long columns.
///
/// Empty input yields NaN; the loader refuses tables without rows.
pub fn rmse(target: &[f64], predicted: &[f64]) -> f64 {
    debug_assert_eq!(target.len(), predicted.len());
    let sum_sq: f64 = target
        .iter()
        .zip(predicted)
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    (sum_sq / target.len() as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_selects_transform() {
        assert_eq!(ValueTransform::from_header("target"), ValueTransform::None);
        assert_eq!(
            ValueTransform::from_header("Log_Intensity"),
            ValueTransform::Log10Inverse
        );
        assert_eq!(
            ValueTransform::from_header("target_EXP"),
            ValueTransform::ExpToLog
        );
        // `log` is checked first
        assert_eq!(
            ValueTransform::from_header("exp_log"),
            ValueTransform::Log10Inverse
        );
    }

    #[test]
    fn transforms_compute_expected_values() {
        assert_eq!(ValueTransform::None.apply(2.5), 2.5);
        assert!((ValueTransform::Log10Inverse.apply(2.0) - 100.0).abs() < 1e-9);
        let e = std::f64::consts::E;
        assert!((ValueTransform::ExpToLog.apply(e) - 10.0).abs() < 1e-9);
        assert!(ValueTransform::ExpToLog.apply(0.0).is_infinite());
    }

    #[test]
    fn apply_all_rewrites_in_place() {
        let mut values = vec![0.0, 1.0, 2.0];
        ValueTransform::Log10Inverse.apply_all(&mut values);
        for (got, want) in values.iter().zip([1.0, 10.0, 100.0]) {
            assert!((got - want).abs() < 1e-9, "{got} != {want}");
        }
    }

    #[test]
    fn rmse_of_identical_columns_is_zero() {
        let a = [1.0, 2.0, 3.0];
        assert_eq!(rmse(&a, &a), 0.0);
    }

    #[test]
    fn rmse_of_constant_offset() {
        assert_eq!(rmse(&[1.0, 2.0, 3.0], &[2.0, 3.0, 4.0]), 1.0);
        assert_eq!(rmse(&[0.0, 0.0], &[3.0, -3.0]), 3.0);
    }
}
