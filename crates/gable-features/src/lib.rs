#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/gablehq/gable/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod encode;
pub mod error;
pub mod pipeline;
pub mod record;
pub mod scale;
pub mod schema;

// Re-export main types
pub use encode::CategoricalEncoder;
pub use error::{FitError, PipelineError, TransformWarning};
pub use pipeline::{
    DesignMatrix, FeaturePipeline, FittedPipeline, PipelineConfig, TrainTestSplit,
};
pub use record::{AttrValue, Record};
pub use scale::NumericTransformer;
pub use schema::SchemaRegistry;
