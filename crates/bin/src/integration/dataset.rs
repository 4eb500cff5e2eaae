//! Dataset ingestion.
//!
//! Loads the training batch from a CSV file and validates that every column
//! the pipeline configuration requires is present before any fitting starts.

use gable::PipelineConfig;
use polars::prelude::*;
use std::path::Path;

/// Error type for dataset loading.
#[derive(Debug, thiserror::Error)]
pub(crate) enum DatasetError {
    /// CSV could not be read or parsed.
    #[error("Failed to read '{path}': {source}")]
    Read {
        /// Offending file path.
        path: String,
        /// Underlying Polars error.
        source: PolarsError,
    },

    /// A column the pipeline configuration requires is absent.
    #[error("Training data at '{path}' is missing required column '{column}'")]
    MissingColumn {
        /// Offending file path.
        path: String,
        /// Name of the absent column.
        column: String,
    },
}

/// Load a training CSV and check it carries every required column.
pub(crate) fn load_training_frame(
    path: &Path,
    config: &PipelineConfig,
) -> Result<DataFrame, DatasetError> {
    let read_err = |source: PolarsError| DatasetError::Read {
        path: path.display().to_string(),
        source,
    };

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(read_err)?
        .finish()
        .map_err(read_err)?;

    for column in config.required_columns() {
        if df.column(column).is_err() {
            return Err(DatasetError::MissingColumn {
                path: path.display().to_string(),
                column: column.to_string(),
            });
        }
    }

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("houses.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_valid_csv() {
        let (_dir, path) = write_csv(
            "name,area,landOptions,price\n\
             Bungalow,1000,Urban,100000\n\
             Cottage,2000,Suburban,200000\n",
        );

        let df = load_training_frame(&path, &PipelineConfig::default()).unwrap();
        assert_eq!(df.height(), 2);
        assert!(df.column("price").is_ok());
    }

    #[test]
    fn test_missing_column_is_typed_error() {
        let (_dir, path) = write_csv(
            "name,area,landOptions\n\
             Bungalow,1000,Urban\n",
        );

        let err = load_training_frame(&path, &PipelineConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::MissingColumn { column, .. } if column == "price"
        ));
    }

    #[test]
    fn test_absent_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_training_frame(&dir.path().join("nope.csv"), &PipelineConfig::default())
            .unwrap_err();
        assert!(matches!(err, DatasetError::Read { .. }));
    }
}
