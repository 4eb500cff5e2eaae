//! Training and prediction entry points.
//!
//! `train` runs the whole training-time path: feature pipeline fit, estimator
//! fit on the training partition, holdout evaluation, and bundle assembly.
//! `predict_price` is the inference-time path against a finished bundle.

use gable_features::{FeaturePipeline, FitError, PipelineConfig, Record, TransformWarning};
use gable_model::{
    BoostedStumpRegressor, Estimator, EstimatorError, EvaluationReport, LinearRegressor,
    Regressor, StackingRegressor,
};
use gable_store::{ArtifactBundle, PredictError, Prediction};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that abort a training run.
#[derive(Debug, Error)]
pub enum TrainError {
    /// Feature pipeline fit failed.
    #[error("Fit error: {0}")]
    Fit(#[from] FitError),

    /// Estimator failure, passed through unchanged.
    #[error("Estimator error: {0}")]
    Estimator(#[from] EstimatorError),
}

/// Which estimator to train.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelKind {
    /// Ridge-stabilized linear regression.
    Linear,
    /// Gradient-boosted stumps.
    BoostedStumps,
    /// Stacking ensemble of the above under a linear meta-learner.
    #[default]
    Stacking,
}

impl ModelKind {
    /// Build an unfitted regressor of this kind.
    pub fn build(self) -> Regressor {
        match self {
            Self::Linear => Regressor::Linear(LinearRegressor::default()),
            Self::BoostedStumps => Regressor::BoostedStumps(BoostedStumpRegressor::default()),
            Self::Stacking => Regressor::Stacking(StackingRegressor::default()),
        }
    }
}

/// Full training configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Feature pipeline configuration.
    pub pipeline: PipelineConfig,
    /// Estimator to train.
    pub model: ModelKind,
}

/// Result of one training run.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    /// The assembled artifact bundle, ready to persist or publish.
    pub bundle: ArtifactBundle,
    /// Holdout evaluation, for observability only.
    pub report: EvaluationReport,
    /// Non-fatal conditions observed while fitting.
    pub warnings: Vec<TransformWarning>,
}

/// Train a model on a batch of historical records.
pub fn train(df: &DataFrame, config: &TrainConfig) -> Result<TrainingOutcome, TrainError> {
    let (pipeline, design) =
        FeaturePipeline::new(config.pipeline.clone()).fit_transform(df)?;

    let mut regressor = config.model.build();
    regressor.fit(&design.split.x_train, &design.split.y_train)?;

    let predictions = regressor.predict(&design.split.x_holdout)?;
    let report = EvaluationReport::from_predictions(&design.split.y_holdout, &predictions);

    tracing::info!(model = regressor.kind(), %report, "training complete");

    Ok(TrainingOutcome {
        bundle: ArtifactBundle::new(pipeline, regressor),
        report,
        warnings: design.warnings,
    })
}

/// Predict the price of a single record against a trained bundle.
pub fn predict_price(bundle: &ArtifactBundle, record: &Record) -> Result<Prediction, PredictError> {
    bundle.predict(record)
}
