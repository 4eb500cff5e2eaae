//! Feature Pipeline
//!
//! Orchestrates the categorical encoder, numeric transformer, and schema
//! registry into the two operations that share one pipeline definition:
//! `fit_transform` for a training batch and `transform` for a single
//! inference record. The fitted artifacts are immutable; retraining builds
//! a fresh [`FittedPipeline`] instead of mutating an existing one, so an
//! in-flight prediction never observes a half-updated artifact set.

use crate::encode::CategoricalEncoder;
use crate::error::{FitError, PipelineError, TransformWarning};
use crate::record::Record;
use crate::scale::NumericTransformer;
use crate::schema::SchemaRegistry;
use ndarray::{Array1, Array2, Axis};
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Pipeline configuration: which attributes to encode, which to scale, and
/// how to partition the training batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Categorical attribute names, in schema order.
    pub categorical_attrs: Vec<String>,
    /// Numeric attribute names, in schema order.
    pub numeric_attrs: Vec<String>,
    /// Target column name (training batches only).
    pub target: String,
    /// Polynomial expansion degree for numeric attributes.
    pub degree: u32,
    /// Fraction of rows held out for evaluation.
    pub holdout_fraction: f64,
    /// Seed for the holdout shuffle; fixing it makes the split reproducible.
    pub seed: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            categorical_attrs: vec!["name".to_string(), "landOptions".to_string()],
            numeric_attrs: vec!["area".to_string()],
            target: "price".to_string(),
            degree: 2,
            holdout_fraction: 0.2,
            seed: 42,
        }
    }
}

impl PipelineConfig {
    /// All columns a training batch must carry, target included.
    pub fn required_columns(&self) -> Vec<&str> {
        self.categorical_attrs
            .iter()
            .chain(self.numeric_attrs.iter())
            .map(String::as_str)
            .chain(std::iter::once(self.target.as_str()))
            .collect()
    }
}

/// Seeded train/holdout partition of the design matrix.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    /// Training feature rows.
    pub x_train: Array2<f64>,
    /// Training targets.
    pub y_train: Array1<f64>,
    /// Holdout feature rows.
    pub x_holdout: Array2<f64>,
    /// Holdout targets.
    pub y_holdout: Array1<f64>,
}

/// Output of a training-time fit: the full design matrix in input row
/// order, the target vector, the seeded partition, and fit-time warnings.
#[derive(Debug, Clone)]
pub struct DesignMatrix {
    /// All feature rows, columns in schema registry order.
    pub features: Array2<f64>,
    /// Target values, aligned with `features` rows.
    pub target: Array1<f64>,
    /// Train/holdout partition.
    pub split: TrainTestSplit,
    /// Non-fatal conditions observed while fitting.
    pub warnings: Vec<TransformWarning>,
}

/// Unfitted pipeline: configuration only.
#[derive(Debug, Clone)]
pub struct FeaturePipeline {
    config: PipelineConfig,
}

impl FeaturePipeline {
    /// Create a pipeline from an explicit configuration.
    pub const fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Pipeline configuration.
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Fit on a training batch and transform it.
    ///
    /// Drops rows with nulls in required columns, fits the encoder and the
    /// numeric transformer, captures the schema registry (indicator columns
    /// first, polynomial terms after), and partitions the matrix with a
    /// seeded shuffle. Consumes the pipeline: the result is the immutable
    /// [`FittedPipeline`], the only state a later `transform` may use.
    pub fn fit_transform(self, df: &DataFrame) -> Result<(FittedPipeline, DesignMatrix), FitError> {
        let config = self.config;

        for column in config.required_columns() {
            if df.column(column).is_err() {
                return Err(FitError::MissingColumn(column.to_string()));
            }
        }

        let mut lf = df.clone().lazy();
        for column in config.required_columns() {
            lf = lf.filter(col(column).is_not_null());
        }
        let clean = lf.collect()?;

        if clean.height() == 0 {
            return Err(FitError::EmptyTrainingSet);
        }

        let (indicators, encoder) = CategoricalEncoder::fit(&clean, &config.categorical_attrs)?;
        let (terms, numeric, warnings) =
            NumericTransformer::fit(&clean, &config.numeric_attrs, config.degree)?;

        let mut columns = encoder.indicator_columns();
        columns.extend(numeric.term_columns());
        let registry = SchemaRegistry::capture(columns);

        let features = to_matrix(&registry, &indicators, &terms)?;
        let target_column = clean.column(&config.target)?.cast(&DataType::Float64)?;
        let target: Array1<f64> = Array1::from_iter(target_column.f64()?.into_no_null_iter());

        let split = seeded_split(&features, &target, config.holdout_fraction, config.seed);

        tracing::debug!(
            rows = features.nrows(),
            columns = registry.len(),
            train = split.x_train.nrows(),
            holdout = split.x_holdout.nrows(),
            "fitted feature pipeline"
        );

        let fitted = FittedPipeline {
            config,
            encoder,
            numeric,
            registry,
        };
        let design = DesignMatrix {
            features,
            target,
            split,
            warnings,
        };
        Ok((fitted, design))
    }
}

/// Assemble the design matrix from the indicator and polynomial frames,
/// column order dictated by the registry.
fn to_matrix(
    registry: &SchemaRegistry,
    indicators: &DataFrame,
    terms: &DataFrame,
) -> Result<Array2<f64>, FitError> {
    let rows = indicators.height().max(terms.height());
    let mut matrix = Array2::zeros((rows, registry.len()));

    for (j, name) in registry.columns().iter().enumerate() {
        let column = indicators
            .column(name)
            .or_else(|_| terms.column(name))?
            .f64()?;
        for (i, value) in column.into_no_null_iter().enumerate() {
            matrix[[i, j]] = value;
        }
    }

    Ok(matrix)
}

/// Partition rows into train and holdout sets with a seeded shuffle.
///
/// The holdout takes `ceil(n * fraction)` rows, but always leaves at least
/// one training row. The same seed always yields the same partition.
fn seeded_split(
    features: &Array2<f64>,
    target: &Array1<f64>,
    fraction: f64,
    seed: u64,
) -> TrainTestSplit {
    let n = features.nrows();
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let mut n_holdout = (n as f64 * fraction).ceil() as usize;
    if n_holdout >= n {
        n_holdout = n.saturating_sub(1);
    }
    let (holdout_idx, train_idx) = indices.split_at(n_holdout);

    TrainTestSplit {
        x_train: features.select(Axis(0), train_idx),
        y_train: target.select(Axis(0), train_idx),
        x_holdout: features.select(Axis(0), holdout_idx),
        y_holdout: target.select(Axis(0), holdout_idx),
    }
}

/// Fitted pipeline: the immutable artifact set of one training run.
///
/// Holds the fitted encoder, the numeric transformer, and the captured
/// schema registry. Transform is a pure function of the record and these
/// artifacts, so sharing a fitted pipeline across threads is safe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedPipeline {
    config: PipelineConfig,
    encoder: CategoricalEncoder,
    numeric: NumericTransformer,
    registry: SchemaRegistry,
}

impl FittedPipeline {
    /// Transform one inference record into a feature vector aligned to the
    /// fit-time schema.
    ///
    /// Applies the fitted encoder and numeric transformer (never a fresh
    /// fit), then realigns against the captured registry. The vector length
    /// always equals the registry length.
    pub fn transform(
        &self,
        record: &Record,
    ) -> Result<(Array1<f64>, Vec<TransformWarning>), PipelineError> {
        let (categorical, warnings) = self.encoder.encode_record(record)?;
        let numeric = self.numeric.transform_record(record)?;

        let features: HashMap<String, f64> =
            categorical.into_iter().chain(numeric).collect();
        Ok((self.registry.realign(&features), warnings))
    }

    /// Pipeline configuration the fit used.
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Fitted categorical encoder.
    pub const fn encoder(&self) -> &CategoricalEncoder {
        &self.encoder
    }

    /// Fitted numeric transformer.
    pub const fn numeric(&self) -> &NumericTransformer {
        &self.numeric
    }

    /// Captured schema registry.
    pub const fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }
}
