//! Error types for artifact persistence and serving.

use gable_features::PipelineError;
use gable_model::EstimatorError;
use thiserror::Error;

/// Errors that can occur while saving or loading an artifact bundle.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The persisted bundle was written by an incompatible format version.
    #[error("Unsupported bundle format version {found} (supported: {supported})")]
    UnsupportedVersion {
        /// Version found in the file.
        found: u32,
        /// Version this build supports.
        supported: u32,
    },
}

/// Errors that abort a single prediction request.
#[derive(Debug, Error)]
pub enum PredictError {
    /// Feature pipeline rejected the record.
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Estimator failure, passed through unchanged.
    #[error("Estimator error: {0}")]
    Estimator(#[from] EstimatorError),
}
