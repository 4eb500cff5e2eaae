//! Unified regressor representation.
//!
//! One serializable enum over all estimator implementations, so a fitted
//! estimator can round-trip through the artifact bundle without trait
//! objects.

use crate::boost::BoostedStumpRegressor;
use crate::estimator::{Estimator, EstimatorError};
use crate::linear::LinearRegressor;
use crate::stacking::StackingRegressor;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Any supported regressor, fitted or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Regressor {
    /// Ridge-stabilized linear regression.
    Linear(LinearRegressor),
    /// Gradient-boosted stumps.
    BoostedStumps(BoostedStumpRegressor),
    /// Stacking ensemble.
    Stacking(StackingRegressor),
}

impl Regressor {
    /// Short human-readable name of the estimator kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Linear(_) => "linear",
            Self::BoostedStumps(_) => "boosted-stumps",
            Self::Stacking(_) => "stacking",
        }
    }
}

impl fmt::Display for Regressor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

impl Estimator for Regressor {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<(), EstimatorError> {
        match self {
            Self::Linear(model) => model.fit(x, y),
            Self::BoostedStumps(model) => model.fit(x, y),
            Self::Stacking(model) => model.fit(x, y),
        }
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, EstimatorError> {
        match self {
            Self::Linear(model) => model.predict(x),
            Self::BoostedStumps(model) => model.predict(x),
            Self::Stacking(model) => model.predict(x),
        }
    }
}
