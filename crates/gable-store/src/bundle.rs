//! Artifact bundle.
//!
//! The persisted, immutable product of one training run: fitted feature
//! pipeline plus fitted regressor, versioned and timestamped. Saving writes
//! a temp file and renames it over the target, so a reader never observes a
//! partially written bundle. Retraining produces a new bundle; existing
//! bundles are superseded, never mutated.

use crate::error::{PredictError, StoreError};
use chrono::{DateTime, Utc};
use gable_features::{FittedPipeline, Record, TransformWarning};
use gable_model::{Estimator, Regressor};
use ndarray::Axis;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Bundle format version written by this build.
pub const FORMAT_VERSION: u32 = 1;

/// One prediction: the estimated price plus any transform warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted price.
    pub price: f64,
    /// Non-fatal conditions observed while transforming the record.
    pub warnings: Vec<TransformWarning>,
}

/// The immutable artifact set of one training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactBundle {
    /// Bundle format version.
    pub format_version: u32,
    /// When the training run finished.
    pub created_at: DateTime<Utc>,
    /// Fitted feature pipeline: encoder, numeric transformer, registry.
    pub pipeline: FittedPipeline,
    /// Fitted regressor.
    pub regressor: Regressor,
}

impl ArtifactBundle {
    /// Assemble a bundle from freshly fitted artifacts.
    pub fn new(pipeline: FittedPipeline, regressor: Regressor) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            created_at: Utc::now(),
            pipeline,
            regressor,
        }
    }

    /// Persist the bundle as JSON, atomically.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(self)?;

        let tmp = tmp_path(path);
        fs::write(&tmp, &json)?;
        fs::rename(&tmp, path)?;

        tracing::info!(path = %path.display(), "saved artifact bundle");
        Ok(())
    }

    /// Load a persisted bundle, rejecting incompatible format versions.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let bytes = fs::read(path)?;
        let bundle: Self = serde_json::from_slice(&bytes)?;
        if bundle.format_version != FORMAT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: bundle.format_version,
                supported: FORMAT_VERSION,
            });
        }
        Ok(bundle)
    }

    /// Predict the price for one record: transform through the fitted
    /// pipeline, realign, and run the regressor on the single-row matrix.
    pub fn predict(&self, record: &Record) -> Result<Prediction, PredictError> {
        let (vector, warnings) = self.pipeline.transform(record)?;
        let x = vector.insert_axis(Axis(0));
        let predictions = self.regressor.predict(&x)?;
        Ok(Prediction {
            price: predictions[0],
            warnings,
        })
    }
}

/// Sibling temp path for the atomic write.
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
