//! Estimator trait
//!
//! The boundary between the feature pipeline and the regression estimators.
//! Callers only ever invoke `fit(X, y)` and `predict(X)`; estimator
//! internals are never inspected.

use ndarray::{Array1, Array2};
use thiserror::Error;

/// Estimator errors.
#[derive(Debug, Error)]
pub enum EstimatorError {
    /// Predict was called before a successful fit.
    #[error("Estimator has not been fitted")]
    NotFitted,

    /// Feature width differs from what the estimator was fitted on.
    #[error("Feature width mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Width the estimator was fitted on.
        expected: usize,
        /// Width of the offending input.
        actual: usize,
    },

    /// The training set has no rows.
    #[error("Training set is empty")]
    EmptyTrainingSet,

    /// The normal equations are not positive definite; the design matrix is
    /// rank deficient beyond what ridge stabilization can absorb.
    #[error("Normal equations are not positive definite")]
    NotPositiveDefinite,
}

/// A regression estimator: fit on a feature matrix and target vector,
/// predict on a feature matrix of the same width.
pub trait Estimator {
    /// Fit the estimator. `x` is (n_rows, n_features); `y` has n_rows
    /// entries aligned with the rows of `x`.
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<(), EstimatorError>;

    /// Predict one value per row of `x`.
    ///
    /// Fails with [`EstimatorError::NotFitted`] before any fit and with
    /// [`EstimatorError::DimensionMismatch`] if the feature width differs
    /// from fit time.
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, EstimatorError>;
}

/// Validate fit inputs shared by all estimators.
pub(crate) fn check_fit_inputs(x: &Array2<f64>, y: &Array1<f64>) -> Result<(), EstimatorError> {
    if x.nrows() == 0 {
        return Err(EstimatorError::EmptyTrainingSet);
    }
    if x.nrows() != y.len() {
        return Err(EstimatorError::DimensionMismatch {
            expected: x.nrows(),
            actual: y.len(),
        });
    }
    Ok(())
}
