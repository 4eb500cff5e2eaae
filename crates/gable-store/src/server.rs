//! Model server.
//!
//! In-process publication point for artifact bundles: single writer, many
//! readers, replace-not-mutate. `publish` swaps the current bundle `Arc`
//! under a short write lock; `predict` snapshots the `Arc` before
//! transforming, so an in-flight prediction keeps its bundle alive even if
//! a retrain publishes a replacement mid-request.

use crate::bundle::{ArtifactBundle, Prediction};
use crate::error::PredictError;
use gable_features::{PipelineError, Record};
use parking_lot::RwLock;
use std::sync::Arc;

/// Atomically swappable holder of the currently served bundle.
#[derive(Debug, Default)]
pub struct ModelServer {
    current: RwLock<Option<Arc<ArtifactBundle>>>,
}

impl ModelServer {
    /// Create a server with nothing published.
    pub const fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    /// Publish a bundle, replacing any previous one. Returns the shared
    /// handle now being served.
    pub fn publish(&self, bundle: ArtifactBundle) -> Arc<ArtifactBundle> {
        let bundle = Arc::new(bundle);
        *self.current.write() = Some(Arc::clone(&bundle));
        tracing::info!(
            created_at = %bundle.created_at,
            columns = bundle.pipeline.registry().len(),
            "published artifact bundle"
        );
        bundle
    }

    /// Snapshot the currently served bundle, if any.
    pub fn snapshot(&self) -> Option<Arc<ArtifactBundle>> {
        self.current.read().clone()
    }

    /// Predict against the currently served bundle.
    ///
    /// Fails with [`PipelineError::SchemaNotCaptured`] when nothing has been
    /// published yet; that is fatal to this request only.
    pub fn predict(&self, record: &Record) -> Result<Prediction, PredictError> {
        let bundle = self
            .snapshot()
            .ok_or(PredictError::Pipeline(PipelineError::SchemaNotCaptured))?;
        bundle.predict(record)
    }
}
