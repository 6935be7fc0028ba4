//! Zero-mean, unit-variance scaling fitted on the current batch.

use postwatch_core::errors::DetectionError;
use tracing::debug;

use super::matrix_width;
use super::types::FeatureMatrix;

/// Per-column standardization statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    pub means: Vec<f64>,
    /// Population standard deviations; constant columns get 1.0.
    pub scales: Vec<f64>,
}

impl StandardScaler {
    /// Fit means and scales on `matrix`. NaN cells count as 0.
    pub fn fit(matrix: &[Vec<f64>]) -> Result<Self, DetectionError> {
        let width = matrix_width(matrix)?;
        let n = matrix.len() as f64;
        let mut means = vec![0.0; width];
        let mut scales = vec![1.0; width];
        if matrix.is_empty() {
            return Ok(Self { means, scales });
        }

        for (col, mean) in means.iter_mut().enumerate() {
            // Divide before summing so extreme finite cells cannot overflow.
            *mean = matrix.iter().map(|row| fill_nan(row[col]) / n).sum::<f64>();
        }
        for (col, scale) in scales.iter_mut().enumerate() {
            let mean = means[col];
            let variance = matrix
                .iter()
                .map(|row| (fill_nan(row[col]) - mean).powi(2))
                .sum::<f64>()
                / n;
            let std = variance.sqrt();
            *scale = if std.is_finite() && std > 10.0 * f64::EPSILON * mean.abs().max(1.0) {
                std
            } else {
                1.0
            };
        }

        debug!(?means, ?scales, "fitted standard scaler");
        Ok(Self { means, scales })
    }

    /// Apply `(x - mean) / scale` column-wise. NaN cells count as 0.
    pub fn transform(&self, matrix: &[Vec<f64>]) -> Result<FeatureMatrix, DetectionError> {
        let width = matrix_width(matrix)?;
        if !matrix.is_empty() && width != self.means.len() {
            return Err(DetectionError::RaggedMatrix {
                row: 0,
                found: width,
                expected: self.means.len(),
            });
        }
        Ok(matrix
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(col, &v)| (fill_nan(v) - self.means[col]) / self.scales[col])
                    .collect()
            })
            .collect())
    }

    pub fn fit_transform(matrix: &[Vec<f64>]) -> Result<FeatureMatrix, DetectionError> {
        Self::fit(matrix)?.transform(matrix)
    }
}

fn fill_nan(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standardizes_to_zero_mean_unit_variance() {
        let matrix = vec![vec![1.0, 10.0], vec![2.0, 20.0], vec![3.0, 30.0]];
        let scaled = StandardScaler::fit_transform(&matrix).unwrap();
        for col in 0..2 {
            let mean: f64 = scaled.iter().map(|r| r[col]).sum::<f64>() / 3.0;
            let var: f64 = scaled.iter().map(|r| (r[col] - mean).powi(2)).sum::<f64>() / 3.0;
            assert!(mean.abs() < 1e-12);
            assert!((var - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn constant_column_maps_to_zero() {
        let matrix = vec![vec![5.0], vec![5.0], vec![5.0]];
        let scaler = StandardScaler::fit(&matrix).unwrap();
        assert_eq!(scaler.scales, vec![1.0]);
        let scaled = scaler.transform(&matrix).unwrap();
        assert!(scaled.iter().all(|r| r[0] == 0.0));
    }

    #[test]
    fn nan_cells_are_treated_as_zero() {
        let matrix = vec![vec![f64::NAN], vec![2.0]];
        let scaler = StandardScaler::fit(&matrix).unwrap();
        assert_eq!(scaler.means, vec![1.0]);
        let scaled = scaler.transform(&matrix).unwrap();
        assert!((scaled[0][0] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn ragged_matrix_is_rejected() {
        let matrix = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(
            StandardScaler::fit(&matrix),
            Err(DetectionError::RaggedMatrix { row: 1, .. })
        ));
    }

    #[test]
    fn empty_matrix_fits() {
        let scaler = StandardScaler::fit(&[]).unwrap();
        assert!(scaler.means.is_empty());
        assert!(scaler.transform(&[]).unwrap().is_empty());
    }

    #[test]
    fn extreme_values_keep_a_finite_mean() {
        let matrix = vec![vec![1e308], vec![1e308], vec![-1e308], vec![0.0]];
        let scaler = StandardScaler::fit(&matrix).unwrap();
        assert!(scaler.means[0].is_finite());
        assert_eq!(scaler.scales, vec![1.0]);
    }
}
