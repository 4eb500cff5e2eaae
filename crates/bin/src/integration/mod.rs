//! Integration helpers for the Gable CLI.
//!
//! Glue between the command-line surface and the library crates: dataset
//! ingestion and validation.

pub(crate) mod dataset;
