//! Integration tests for the feature schema alignment pipeline.

use approx::assert_relative_eq;
use gable_features::{
    FeaturePipeline, PipelineConfig, Record, TransformWarning,
};
use polars::prelude::*;

/// The two-record scenario: one Bungalow in Urban land, one Cottage in
/// Suburban land.
fn two_record_frame() -> DataFrame {
    DataFrame::new(vec![
        Column::new("name".into(), ["Bungalow", "Cottage"].as_slice()),
        Column::new("area".into(), [1000.0, 2000.0].as_slice()),
        Column::new("landOptions".into(), ["Urban", "Suburban"].as_slice()),
        Column::new("price".into(), [100_000.0, 200_000.0].as_slice()),
    ])
    .unwrap()
}

#[test]
fn transform_reproduces_first_training_row() {
    let (fitted, design) = FeaturePipeline::new(PipelineConfig::default())
        .fit_transform(&two_record_frame())
        .unwrap();

    let record = Record::new()
        .with("name", "Bungalow")
        .with("area", 1000.0)
        .with("landOptions", "Urban");
    let (vector, warnings) = fitted.transform(&record).unwrap();

    assert!(warnings.is_empty());
    assert_eq!(vector.len(), design.features.ncols());
    for (j, &expected) in design.features.row(0).iter().enumerate() {
        assert_relative_eq!(vector[j], expected, epsilon = 1e-9);
    }
}

#[test]
fn transform_is_idempotent() {
    let (fitted, _) = FeaturePipeline::new(PipelineConfig::default())
        .fit_transform(&two_record_frame())
        .unwrap();

    let record = Record::new()
        .with("name", "Cottage")
        .with("area", 2000.0)
        .with("landOptions", "Suburban");

    let (first, _) = fitted.transform(&record).unwrap();
    let (second, _) = fitted.transform(&record).unwrap();
    assert_eq!(first, second);
}

#[test]
fn unseen_category_yields_zero_indicators() {
    let (fitted, _) = FeaturePipeline::new(PipelineConfig::default())
        .fit_transform(&two_record_frame())
        .unwrap();

    let record = Record::new()
        .with("name", "Castle")
        .with("area", 1000.0)
        .with("landOptions", "Urban");
    let (vector, warnings) = fitted.transform(&record).unwrap();

    assert_eq!(
        warnings,
        vec![TransformWarning::UnseenCategory {
            attribute: "name".to_string(),
            value: "Castle".to_string(),
        }]
    );

    // Every name_* indicator is zero: the record is indistinguishable from
    // the reference category.
    for (j, column) in fitted.registry().columns().iter().enumerate() {
        if column.starts_with("name_") {
            assert_eq!(vector[j], 0.0, "indicator {column} should be zero");
        }
    }
}

#[test]
fn zero_variance_column_fits_and_scales_to_zero() {
    let df = DataFrame::new(vec![
        Column::new("name".into(), ["Bungalow", "Cottage", "Villa"].as_slice()),
        Column::new("area".into(), [1500.0, 1500.0, 1500.0].as_slice()),
        Column::new(
            "landOptions".into(),
            ["Urban", "Suburban", "Rural"].as_slice(),
        ),
        Column::new(
            "price".into(),
            [100_000.0, 200_000.0, 300_000.0].as_slice(),
        ),
    ])
    .unwrap();

    let (fitted, design) = FeaturePipeline::new(PipelineConfig::default())
        .fit_transform(&df)
        .unwrap();

    assert_eq!(
        design.warnings,
        vec![TransformWarning::DegenerateColumn {
            column: "area".to_string(),
        }]
    );

    let area_idx = fitted
        .registry()
        .columns()
        .iter()
        .position(|c| c == "area")
        .unwrap();
    for i in 0..design.features.nrows() {
        assert_eq!(design.features[[i, area_idx]], 0.0);
    }
}

#[test]
fn fitted_pipeline_survives_serde_round_trip() {
    let (fitted, _) = FeaturePipeline::new(PipelineConfig::default())
        .fit_transform(&two_record_frame())
        .unwrap();

    let json = serde_json::to_string(&fitted).unwrap();
    let reloaded: gable_features::FittedPipeline = serde_json::from_str(&json).unwrap();
    assert_eq!(reloaded, fitted);

    let record = Record::new()
        .with("name", "Bungalow")
        .with("area", 1000.0)
        .with("landOptions", "Urban");
    let (original, _) = fitted.transform(&record).unwrap();
    let (roundtrip, _) = reloaded.transform(&record).unwrap();
    assert_eq!(original, roundtrip);
}

#[test]
fn registry_length_invariant_holds_for_any_record() {
    let (fitted, _) = FeaturePipeline::new(PipelineConfig::default())
        .fit_transform(&two_record_frame())
        .unwrap();
    let width = fitted.registry().len();

    let records = [
        Record::new()
            .with("name", "Bungalow")
            .with("area", 1000.0)
            .with("landOptions", "Urban"),
        Record::new()
            .with("name", "Castle")
            .with("area", 0.0)
            .with("landOptions", "Orbital")
            .with("extra", "ignored")
            .with("another", 7.0),
    ];

    for record in &records {
        let (vector, _) = fitted.transform(record).unwrap();
        assert_eq!(vector.len(), width);
    }
}
