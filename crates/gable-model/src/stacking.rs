//! Stacking ensemble.
//!
//! Fits each base estimator on the training data, then fits a linear
//! meta-learner on the base estimators' in-sample predictions. Prediction
//! runs every base and blends their outputs through the meta coefficients.

use crate::estimator::{Estimator, EstimatorError, check_fit_inputs};
use crate::linear::LinearRegressor;
use crate::regressor::Regressor;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Stacking regressor: base estimators blended by a linear meta-learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackingRegressor {
    bases: Vec<Regressor>,
    meta: LinearRegressor,
}

impl StackingRegressor {
    /// Create a stacking ensemble over the given base estimators.
    pub fn new(bases: Vec<Regressor>) -> Self {
        Self {
            bases,
            meta: LinearRegressor::default(),
        }
    }

    /// Number of base estimators.
    pub fn n_bases(&self) -> usize {
        self.bases.len()
    }

    /// One column of predictions per base estimator.
    fn meta_features(&self, x: &Array2<f64>) -> Result<Array2<f64>, EstimatorError> {
        let mut features = Array2::<f64>::zeros((x.nrows(), self.bases.len()));
        for (j, base) in self.bases.iter().enumerate() {
            let predictions = base.predict(x)?;
            features.column_mut(j).assign(&predictions);
        }
        Ok(features)
    }
}

impl Default for StackingRegressor {
    /// Linear and boosted-stump bases under a linear meta-learner.
    fn default() -> Self {
        Self::new(vec![
            Regressor::Linear(LinearRegressor::default()),
            Regressor::BoostedStumps(crate::boost::BoostedStumpRegressor::default()),
        ])
    }
}

impl Estimator for StackingRegressor {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<(), EstimatorError> {
        check_fit_inputs(x, y)?;

        for base in &mut self.bases {
            base.fit(x, y)?;
        }
        let meta_x = self.meta_features(x)?;
        self.meta.fit(&meta_x, y)
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, EstimatorError> {
        let meta_x = self.meta_features(x)?;
        self.meta.predict(&meta_x)
    }
}
