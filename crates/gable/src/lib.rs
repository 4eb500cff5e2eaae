#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/gablehq/gable/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod train;

// Re-export main types from sub-crates
pub use gable_features as features;
pub use gable_model as model;
pub use gable_store as store;

// Re-export common types
pub use gable_features::{
    AttrValue, FeaturePipeline, FittedPipeline, PipelineConfig, PipelineError, Record,
    TransformWarning,
};
pub use gable_model::{Estimator, EvaluationReport, Regressor};
pub use gable_store::{ArtifactBundle, ModelServer, Prediction};
pub use train::{ModelKind, TrainConfig, TrainError, TrainingOutcome, predict_price, train};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
