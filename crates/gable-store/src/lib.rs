#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/gablehq/gable/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod bundle;
pub mod error;
pub mod server;

// Re-export main types
pub use bundle::{ArtifactBundle, FORMAT_VERSION, Prediction};
pub use error::{PredictError, StoreError};
pub use server::ModelServer;
