//! Error and warning types for the feature pipeline.
//!
//! Fit-time failures and per-request transform failures are separate enums:
//! a bad training batch aborts the whole fit, while a bad inference record
//! only aborts that single prediction. Recoverable degenerate cases (unseen
//! category, zero-variance column) are surfaced as warnings, not errors.

use polars::prelude::PolarsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that abort a training-time fit.
#[derive(Debug, Error)]
pub enum FitError {
    /// A configured column is absent from the training batch.
    #[error("Training data is missing required column '{0}'")]
    MissingColumn(String),

    /// No usable rows remain after dropping nulls.
    #[error("Training set is empty after dropping incomplete rows")]
    EmptyTrainingSet,

    /// Polars DataFrame error.
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Errors that abort a single inference-time transform.
///
/// These are fatal to the calling request only, never to the process.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Inference was attempted before any schema was captured by a fit.
    #[error("No feature schema captured: train a model before predicting")]
    SchemaNotCaptured,

    /// The record lacks an attribute the fitted pipeline requires.
    #[error("Record is missing required field '{0}'")]
    MissingField(String),

    /// A numeric attribute carried a non-numeric value.
    #[error("Field '{field}' must be numeric, got '{value}'")]
    NonNumericField {
        /// Attribute name.
        field: String,
        /// The offending value.
        value: String,
    },
}

/// Non-fatal conditions observed during fit or transform.
///
/// Warnings accompany a successful result; callers that want observability
/// can log or surface them, callers that do not can ignore them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransformWarning {
    /// An inference record carried a categorical value never seen at fit
    /// time. All indicators for that attribute are zero, which makes the
    /// record indistinguishable from the reference category. Deliberate
    /// degenerate-case policy, not an error.
    UnseenCategory {
        /// Categorical attribute name.
        attribute: String,
        /// The unseen value.
        value: String,
    },

    /// A numeric column had zero variance at fit time; unit scale was
    /// substituted so standardization maps every value to 0.
    DegenerateColumn {
        /// Numeric column name.
        column: String,
    },
}

impl fmt::Display for TransformWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnseenCategory { attribute, value } => write!(
                f,
                "unseen category '{value}' for attribute '{attribute}' (all indicators zero)"
            ),
            Self::DegenerateColumn { column } => write!(
                f,
                "numeric column '{column}' has zero variance (unit scale substituted)"
            ),
        }
    }
}
