//! Gradient boosting over regression stumps.
//!
//! Each round fits a depth-1 tree (one threshold split on one feature, mean
//! residual in each leaf) to the current residuals and adds it to the
//! ensemble scaled by the learning rate. Thresholds are midpoints between
//! consecutive distinct feature values.

use crate::estimator::{Estimator, EstimatorError, check_fit_inputs};
use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Boosting configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoostConfig {
    /// Number of boosting rounds.
    pub rounds: usize,
    /// Shrinkage applied to each stump's contribution.
    pub learning_rate: f64,
}

impl Default for BoostConfig {
    fn default() -> Self {
        Self {
            rounds: 100,
            learning_rate: 0.1,
        }
    }
}

/// One depth-1 regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Stump {
    feature: usize,
    threshold: f64,
    left: f64,
    right: f64,
}

impl Stump {
    fn eval(&self, row: ArrayView1<'_, f64>) -> f64 {
        if row[self.feature] <= self.threshold {
            self.left
        } else {
            self.right
        }
    }
}

/// Gradient-boosted stump regressor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostedStumpRegressor {
    config: BoostConfig,
    base: Option<f64>,
    n_features: usize,
    stumps: Vec<Stump>,
}

impl BoostedStumpRegressor {
    /// Create an unfitted regressor with the given configuration.
    pub const fn new(config: BoostConfig) -> Self {
        Self {
            config,
            base: None,
            n_features: 0,
            stumps: Vec::new(),
        }
    }

    /// Number of stumps actually fitted (boosting stops early once the
    /// residuals vanish or no split is possible).
    pub fn n_stumps(&self) -> usize {
        self.stumps.len()
    }

    /// Sum of squared training residuals for the current ensemble.
    fn training_sse(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<f64, EstimatorError> {
        let predictions = self.predict(x)?;
        Ok(y.iter()
            .zip(predictions.iter())
            .map(|(a, p)| (a - p).powi(2))
            .sum())
    }
}

impl Default for BoostedStumpRegressor {
    fn default() -> Self {
        Self::new(BoostConfig::default())
    }
}

impl Estimator for BoostedStumpRegressor {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<(), EstimatorError> {
        check_fit_inputs(x, y)?;

        let n = x.nrows();
        let base = y.mean().unwrap_or(0.0);
        let mut predictions = Array1::from_elem(n, base);

        self.base = Some(base);
        self.n_features = x.ncols();
        self.stumps.clear();

        for _ in 0..self.config.rounds {
            let residuals = y - &predictions;
            if residuals.iter().all(|r| r.abs() < 1e-12) {
                break;
            }

            let Some(stump) = best_stump(x, &residuals) else {
                break;
            };

            for i in 0..n {
                predictions[i] += self.config.learning_rate * stump.eval(x.row(i));
            }
            self.stumps.push(stump);
        }

        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, EstimatorError> {
        let base = self.base.ok_or(EstimatorError::NotFitted)?;
        if x.ncols() != self.n_features {
            return Err(EstimatorError::DimensionMismatch {
                expected: self.n_features,
                actual: x.ncols(),
            });
        }

        let mut predictions = Array1::from_elem(x.nrows(), base);
        for stump in &self.stumps {
            for (i, row) in x.rows().into_iter().enumerate() {
                predictions[i] += self.config.learning_rate * stump.eval(row);
            }
        }
        Ok(predictions)
    }
}

/// Find the stump minimizing residual SSE across all features and midpoint
/// thresholds. Returns `None` when no feature admits a split (all values
/// identical).
fn best_stump(x: &Array2<f64>, residuals: &Array1<f64>) -> Option<Stump> {
    let n = x.nrows();
    let mut best: Option<(f64, Stump)> = None;

    for feature in 0..x.ncols() {
        let mut values: Vec<f64> = x.column(feature).to_vec();
        values.sort_by(f64::total_cmp);
        values.dedup();

        for pair in values.windows(2) {
            let threshold = (pair[0] + pair[1]) / 2.0;

            let mut left_sum = 0.0;
            let mut left_count = 0usize;
            let mut right_sum = 0.0;
            let mut right_count = 0usize;
            for i in 0..n {
                if x[[i, feature]] <= threshold {
                    left_sum += residuals[i];
                    left_count += 1;
                } else {
                    right_sum += residuals[i];
                    right_count += 1;
                }
            }
            if left_count == 0 || right_count == 0 {
                continue;
            }

            let left = left_sum / left_count as f64;
            let right = right_sum / right_count as f64;

            let mut sse = 0.0;
            for i in 0..n {
                let fitted = if x[[i, feature]] <= threshold {
                    left
                } else {
                    right
                };
                sse += (residuals[i] - fitted).powi(2);
            }

            let better = best.as_ref().is_none_or(|(best_sse, _)| sse < *best_sse);
            if better {
                best = Some((
                    sse,
                    Stump {
                        feature,
                        threshold,
                        left,
                        right,
                    },
                ));
            }
        }
    }

    best.map(|(_, stump)| stump)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_boosting_reduces_training_error() {
        let x = array![[1.0], [2.0], [3.0], [4.0], [5.0], [6.0]];
        let y = array![1.0, 1.5, 2.0, 8.0, 8.5, 9.0];

        let mut model = BoostedStumpRegressor::default();
        model.fit(&x, &y).unwrap();

        // Baseline: predicting the mean everywhere.
        let mean = y.mean().unwrap();
        let baseline_sse: f64 = y.iter().map(|v| (v - mean).powi(2)).sum();
        let fitted_sse = model.training_sse(&x, &y).unwrap();

        assert!(model.n_stumps() > 0);
        assert!(fitted_sse < baseline_sse / 10.0);
    }

    #[test]
    fn test_constant_target_needs_no_stumps() {
        let x = array![[1.0], [2.0], [3.0]];
        let y = array![5.0, 5.0, 5.0];

        let mut model = BoostedStumpRegressor::default();
        model.fit(&x, &y).unwrap();

        assert_eq!(model.n_stumps(), 0);
        let predictions = model.predict(&x).unwrap();
        for p in predictions.iter() {
            assert!((p - 5.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_constant_features_fit_to_mean() {
        let x = array![[1.0], [1.0], [1.0]];
        let y = array![1.0, 2.0, 3.0];

        let mut model = BoostedStumpRegressor::default();
        model.fit(&x, &y).unwrap();

        // No split possible: every prediction is the target mean.
        assert_eq!(model.n_stumps(), 0);
        let predictions = model.predict(&x).unwrap();
        for p in predictions.iter() {
            assert!((p - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_predict_before_fit() {
        let model = BoostedStumpRegressor::default();
        let err = model.predict(&array![[1.0]]).unwrap_err();
        assert!(matches!(err, EstimatorError::NotFitted));
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut model = BoostedStumpRegressor::default();
        model
            .fit(&array![[1.0], [2.0]], &array![1.0, 2.0])
            .unwrap();

        let err = model.predict(&array![[1.0, 2.0]]).unwrap_err();
        assert!(matches!(err, EstimatorError::DimensionMismatch { .. }));
    }
}
