//! Standard scaling of feature vectors

use crate::{FeatureVector, NUM_FEATURES};

/// Zero-mean, unit-variance scaler fitted per feature dimension
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    means: [f64; NUM_FEATURES],
    scales: [f64; NUM_FEATURES],
}

impl StandardScaler {
    /// Fits means and population standard deviations. A dimension with no
    /// spread keeps a scale of 1.0 so it is only centered.
    pub fn fit(rows: &[FeatureVector]) -> Self {
        let mut means = [0.0; NUM_FEATURES];
        let mut scales = [1.0; NUM_FEATURES];
        if rows.is_empty() {
            return Self { means, scales };
        }

        let n = rows.len() as f64;
        for dim in 0..NUM_FEATURES {
            let mean = rows.iter().map(|row| row.0[dim]).sum::<f64>() / n;
            let variance = rows
                .iter()
                .map(|row| (row.0[dim] - mean).powi(2))
                .sum::<f64>()
                / n;
            let std = variance.sqrt();

            means[dim] = mean;
            scales[dim] = if std < 10.0 * f64::EPSILON { 1.0 } else { std };
        }

        Self { means, scales }
    }

    pub fn transform(&self, features: &FeatureVector) -> [f64; NUM_FEATURES] {
        let mut scaled = [0.0; NUM_FEATURES];
        for (dim, value) in scaled.iter_mut().enumerate() {
            *value = (features.0[dim] - self.means[dim]) / self.scales[dim];
        }
        scaled
    }

    pub fn means(&self) -> &[f64; NUM_FEATURES] {
        &self.means
    }

    pub fn scales(&self) -> &[f64; NUM_FEATURES] {
        &self.scales
    }
}

/// Population variance of a set of values
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: [f64; NUM_FEATURES]) -> FeatureVector {
        FeatureVector(values)
    }

    #[test]
    fn test_fit_transform_centers_and_scales() {
        let rows = vec![
            row([1.0, 0.0, 5.0, 2.0, 1.0, 100.0]),
            row([3.0, 2.0, 5.0, 4.0, 3.0, 300.0]),
        ];
        let scaler = StandardScaler::fit(&rows);

        assert_eq!(scaler.means(), &[2.0, 1.0, 5.0, 3.0, 2.0, 200.0]);
        assert_eq!(scaler.scales(), &[1.0, 1.0, 1.0, 1.0, 1.0, 100.0]);

        let scaled = scaler.transform(&rows[0]);
        assert_eq!(scaled, [-1.0, -1.0, 0.0, -1.0, -1.0, -1.0]);
    }

    #[test]
    fn test_constant_dimension_keeps_unit_scale() {
        let rows = vec![row([4.0; NUM_FEATURES]), row([4.0; NUM_FEATURES])];
        let scaler = StandardScaler::fit(&rows);

        assert_eq!(scaler.scales(), &[1.0; NUM_FEATURES]);
        assert_eq!(scaler.transform(&row([5.0; NUM_FEATURES])), [1.0; NUM_FEATURES]);
    }

    #[test]
    fn test_variance() {
        assert_eq!(variance(&[]), 0.0);
        assert_eq!(variance(&[2.0, 2.0, 2.0]), 0.0);
        assert_eq!(variance(&[1.0, 3.0]), 1.0);
    }
}
