//! Ridge-stabilized linear regression.
//!
//! Solves the normal equations (X'X + λI)β = X'y by Cholesky factorization,
//! with an explicit unregularized intercept. The small default λ exists only
//! to keep the factorization positive definite when indicator columns are
//! collinear; it is not meant as a tuned regularizer.

use crate::estimator::{Estimator, EstimatorError, check_fit_inputs};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Linear regressor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearConfig {
    /// Ridge term λ added to the feature diagonal (never the intercept).
    pub ridge: f64,
}

impl Default for LinearConfig {
    fn default() -> Self {
        Self { ridge: 1e-6 }
    }
}

/// Linear regressor with intercept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    config: LinearConfig,
    /// Fitted weights: one per feature, intercept last.
    coefficients: Option<Vec<f64>>,
}

impl LinearRegressor {
    /// Create an unfitted regressor with the given configuration.
    pub const fn new(config: LinearConfig) -> Self {
        Self {
            config,
            coefficients: None,
        }
    }

    /// Fitted feature weights (without intercept), if fitted.
    pub fn weights(&self) -> Option<&[f64]> {
        self.coefficients.as_deref().map(|c| &c[..c.len() - 1])
    }

    /// Fitted intercept, if fitted.
    pub fn intercept(&self) -> Option<f64> {
        self.coefficients.as_deref().and_then(|c| c.last().copied())
    }
}

impl Default for LinearRegressor {
    fn default() -> Self {
        Self::new(LinearConfig::default())
    }
}

impl Estimator for LinearRegressor {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<(), EstimatorError> {
        check_fit_inputs(x, y)?;

        let (n, d) = x.dim();
        let mut design = Array2::<f64>::ones((n, d + 1));
        design.slice_mut(ndarray::s![.., ..d]).assign(x);

        let mut gram = design.t().dot(&design);
        for j in 0..d {
            gram[[j, j]] += self.config.ridge;
        }
        let rhs = design.t().dot(y);

        let solution = cholesky_solve(&gram, &rhs)?;
        self.coefficients = Some(solution.to_vec());
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, EstimatorError> {
        let coefficients = self.coefficients.as_ref().ok_or(EstimatorError::NotFitted)?;
        let d = coefficients.len() - 1;
        if x.ncols() != d {
            return Err(EstimatorError::DimensionMismatch {
                expected: d,
                actual: x.ncols(),
            });
        }

        let intercept = coefficients[d];
        let weights = Array1::from_iter(coefficients[..d].iter().copied());
        Ok(x.dot(&weights) + intercept)
    }
}

/// Solve `a * w = b` for symmetric positive definite `a`.
fn cholesky_solve(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>, EstimatorError> {
    let n = a.nrows();
    let mut l = Array2::<f64>::zeros((n, n));

    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[[i, j]];
            for k in 0..j {
                sum -= l[[i, k]] * l[[j, k]];
            }
            if i == j {
                if sum <= 0.0 {
                    return Err(EstimatorError::NotPositiveDefinite);
                }
                l[[i, j]] = sum.sqrt();
            } else {
                l[[i, j]] = sum / l[[j, j]];
            }
        }
    }

    // Forward substitution: L z = b
    let mut z = Array1::<f64>::zeros(n);
    for i in 0..n {
        let mut sum = b[i];
        for k in 0..i {
            sum -= l[[i, k]] * z[k];
        }
        z[i] = sum / l[[i, i]];
    }

    // Back substitution: L' w = z
    let mut w = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut sum = z[i];
        for k in (i + 1)..n {
            sum -= l[[k, i]] * w[k];
        }
        w[i] = sum / l[[i, i]];
    }

    Ok(w)
}
