//! Schema Registry
//!
//! The canonical ordered list of feature column names, captured exactly once
//! at the end of a successful fit. Every inference-time feature map is
//! realigned against it: missing columns are zero-filled, unrecognized
//! columns are dropped. This is the single correctness-critical operation of
//! the system; a prediction is only valid if it was realigned with the same
//! registry that was captured by the fit run that trained the estimator.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Immutable ordered feature column schema.
///
/// Constructing a registry *is* the capture: there is no uninitialized
/// registry to misuse, and the column list never changes afterwards.
/// Retraining builds a new registry rather than mutating this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRegistry {
    columns: Vec<String>,
}

impl SchemaRegistry {
    /// Capture the schema from the full ordered feature column list
    /// (target excluded).
    pub fn capture(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Reshape an arbitrary feature map into the captured column order.
    ///
    /// Missing columns are filled with 0.0; entries whose names are not in
    /// the registry are discarded. The output length always equals
    /// [`len`](Self::len), regardless of the input map.
    pub fn realign(&self, features: &HashMap<String, f64>) -> Array1<f64> {
        Array1::from_iter(
            self.columns
                .iter()
                .map(|column| features.get(column).copied().unwrap_or(0.0)),
        )
    }

    /// Column names in captured order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of feature columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the registry has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
