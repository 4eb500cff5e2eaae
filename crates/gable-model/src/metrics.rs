//! Evaluation metrics.
//!
//! Mean squared error and R² over a holdout partition, reported after
//! training for observability only; nothing downstream consumes them.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean squared error. An empty input yields 0.0.
pub fn mean_squared_error(actual: &Array1<f64>, predicted: &Array1<f64>) -> f64 {
    if actual.is_empty() {
        return 0.0;
    }
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / actual.len() as f64
}

/// Coefficient of determination R².
///
/// When the actuals have zero total variance the ratio is undefined; this
/// returns 0.0 in that case rather than dividing by zero.
pub fn r_squared(actual: &Array1<f64>, predicted: &Array1<f64>) -> f64 {
    if actual.is_empty() {
        return 0.0;
    }
    let mean = actual.mean().unwrap_or(0.0);
    let total: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    if total == 0.0 {
        return 0.0;
    }
    let residual: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    1.0 - residual / total
}

/// Holdout evaluation summary for one training run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Mean squared error.
    pub mse: f64,
    /// Root mean squared error.
    pub rmse: f64,
    /// Coefficient of determination.
    pub r_squared: f64,
    /// Number of holdout observations.
    pub n_obs: usize,
}

impl EvaluationReport {
    /// Build a report from holdout actuals and predictions.
    pub fn from_predictions(actual: &Array1<f64>, predicted: &Array1<f64>) -> Self {
        let mse = mean_squared_error(actual, predicted);
        Self {
            mse,
            rmse: mse.sqrt(),
            r_squared: r_squared(actual, predicted),
            n_obs: actual.len(),
        }
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mse={:.4} rmse={:.4} r2={:.4} n={}",
            self.mse, self.rmse, self.r_squared, self.n_obs
        )
    }
}
