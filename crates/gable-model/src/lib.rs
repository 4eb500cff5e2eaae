#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/gablehq/gable/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod boost;
pub mod estimator;
pub mod linear;
pub mod metrics;
pub mod regressor;
pub mod stacking;

// Re-export main types
pub use boost::{BoostConfig, BoostedStumpRegressor};
pub use estimator::{Estimator, EstimatorError};
pub use linear::{LinearConfig, LinearRegressor};
pub use metrics::{EvaluationReport, mean_squared_error, r_squared};
pub use regressor::Regressor;
pub use stacking::StackingRegressor;
