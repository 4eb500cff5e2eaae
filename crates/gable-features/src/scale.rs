//! Numeric standardization and polynomial expansion.
//!
//! Each configured numeric column is standardized to zero mean and unit
//! variance (population statistics, ddof = 0) and then expanded into a
//! fixed polynomial basis `[v, v^2, ..., v^degree]` with no bias term.
//! The scaler parameters and the term order are captured once at fit time;
//! the only way to obtain a transformer is `fit` (or deserializing a
//! persisted one), so there is no refit-on-one-sample path at inference.

use crate::error::{FitError, PipelineError, TransformWarning};
use crate::record::{AttrValue, Record};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Field name for a polynomial term of a standardized column.
fn term_name(column: &str, power: u32) -> String {
    match power {
        1 => column.to_string(),
        2 => format!("{column}_squared"),
        3 => format!("{column}_cubed"),
        n => format!("{column}_pow{n}"),
    }
}

/// Scaler parameters for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnScaler {
    /// Source column name.
    pub column: String,
    /// Fit-time mean.
    pub mean: f64,
    /// Fit-time standard deviation, or 1.0 for a zero-variance column.
    pub scale: f64,
}

impl ColumnScaler {
    fn standardize(&self, value: f64) -> f64 {
        (value - self.mean) / self.scale
    }
}

/// One polynomial term: a power of one standardized source column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct PolyTerm {
    source: String,
    power: u32,
    field: String,
}

/// Fitted numeric transformer: per-column scalers plus an ordered list of
/// polynomial terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericTransformer {
    scalers: Vec<ColumnScaler>,
    terms: Vec<PolyTerm>,
    degree: u32,
}

impl NumericTransformer {
    /// Fit scalers on a training batch and expand it.
    ///
    /// Returns the transformed DataFrame (one column per polynomial term, in
    /// term order), the fitted transformer, and any fit-time warnings. A
    /// zero-variance column does not fail: unit scale is substituted, so all
    /// of its standardized values are 0, and the condition is surfaced as
    /// [`TransformWarning::DegenerateColumn`].
    pub fn fit(
        df: &DataFrame,
        attributes: &[String],
        degree: u32,
    ) -> Result<(DataFrame, Self, Vec<TransformWarning>), FitError> {
        let mut scalers = Vec::with_capacity(attributes.len());
        let mut warnings = Vec::new();

        for attribute in attributes {
            let column = df
                .column(attribute)
                .map_err(|_| FitError::MissingColumn(attribute.clone()))?;
            let values = column.cast(&DataType::Float64)?;
            let values = values.f64()?;

            if values.is_empty() {
                return Err(FitError::EmptyTrainingSet);
            }

            let mean = values.mean().unwrap_or(0.0);
            let std = values.std(0).unwrap_or(0.0);
            let scale = if std > 0.0 {
                std
            } else {
                tracing::warn!(
                    column = attribute.as_str(),
                    "zero variance at fit time, substituting unit scale"
                );
                warnings.push(TransformWarning::DegenerateColumn {
                    column: attribute.clone(),
                });
                1.0
            };

            scalers.push(ColumnScaler {
                column: attribute.clone(),
                mean,
                scale,
            });
        }

        let terms = attributes
            .iter()
            .flat_map(|attribute| {
                (1..=degree).map(|power| PolyTerm {
                    source: attribute.clone(),
                    power,
                    field: term_name(attribute, power),
                })
            })
            .collect();

        let transformer = Self {
            scalers,
            terms,
            degree,
        };
        let transformed = transformer.term_frame(df)?;
        Ok((transformed, transformer, warnings))
    }

    /// Expand a training batch into polynomial term columns.
    fn term_frame(&self, df: &DataFrame) -> Result<DataFrame, PolarsError> {
        let mut columns = Vec::with_capacity(self.terms.len());

        for term in &self.terms {
            let scaler = self.scaler_for(&term.source);
            let raw = df.column(&term.source)?.cast(&DataType::Float64)?;
            let raw = raw.f64()?;
            let data: Vec<f64> = raw
                .into_no_null_iter()
                .map(|v| scaler.standardize(v).powi(term.power as i32))
                .collect();
            columns.push(Column::new(term.field.as_str().into(), data));
        }

        DataFrame::new(columns)
    }

    fn scaler_for(&self, column: &str) -> &ColumnScaler {
        self.scalers
            .iter()
            .find(|s| s.column == column)
            .unwrap_or_else(|| unreachable!("term source always has a scaler"))
    }

    /// Transform one inference record into (field, value) entries using the
    /// fit-time scalers and term order.
    ///
    /// A record lacking a numeric attribute fails with
    /// [`PipelineError::MissingField`]; a textual value in a numeric
    /// attribute fails with [`PipelineError::NonNumericField`]. Both are
    /// fatal to the single request only.
    pub fn transform_record(&self, record: &Record) -> Result<Vec<(String, f64)>, PipelineError> {
        let mut standardized: HashMap<&str, f64> = HashMap::with_capacity(self.scalers.len());

        for scaler in &self.scalers {
            let value = match record.get(&scaler.column) {
                Some(AttrValue::Num(v)) => *v,
                Some(AttrValue::Text(s)) => {
                    return Err(PipelineError::NonNumericField {
                        field: scaler.column.clone(),
                        value: s.clone(),
                    });
                }
                None => return Err(PipelineError::MissingField(scaler.column.clone())),
            };
            standardized.insert(scaler.column.as_str(), scaler.standardize(value));
        }

        Ok(self
            .terms
            .iter()
            .map(|term| {
                let v = standardized[term.source.as_str()];
                (term.field.clone(), v.powi(term.power as i32))
            })
            .collect())
    }

    /// Ordered polynomial term field names, as they appear in the schema.
    pub fn term_columns(&self) -> Vec<String> {
        self.terms.iter().map(|t| t.field.clone()).collect()
    }

    /// Fitted per-column scalers.
    pub fn scalers(&self) -> &[ColumnScaler] {
        &self.scalers
    }

    /// Polynomial expansion degree.
    pub const fn degree(&self) -> u32 {
        self.degree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn area_frame(values: &[f64]) -> DataFrame {
        DataFrame::new(vec![Column::new("area".into(), values)]).unwrap()
    }

    fn area_attr() -> Vec<String> {
        vec!["area".to_string()]
    }

    #[test]
    fn test_fit_population_statistics() {
        let df = area_frame(&[1000.0, 2000.0]);
        let (_, transformer, warnings) = NumericTransformer::fit(&df, &area_attr(), 2).unwrap();

        assert!(warnings.is_empty());
        let scaler = &transformer.scalers()[0];
        assert_relative_eq!(scaler.mean, 1500.0);
        // Population std (ddof = 0): sqrt(((500)^2 + (500)^2) / 2) = 500
        assert_relative_eq!(scaler.scale, 500.0);
    }

    #[test]
    fn test_term_frame_values() {
        let df = area_frame(&[1000.0, 2000.0]);
        let (transformed, _, _) = NumericTransformer::fit(&df, &area_attr(), 2).unwrap();

        let area = transformed.column("area").unwrap().f64().unwrap();
        assert_relative_eq!(area.get(0).unwrap(), -1.0);
        assert_relative_eq!(area.get(1).unwrap(), 1.0);

        let squared = transformed.column("area_squared").unwrap().f64().unwrap();
        assert_relative_eq!(squared.get(0).unwrap(), 1.0);
        assert_relative_eq!(squared.get(1).unwrap(), 1.0);
    }

    #[test]
    fn test_zero_variance_unit_scale() {
        let df = area_frame(&[1500.0, 1500.0, 1500.0]);
        let (transformed, transformer, warnings) =
            NumericTransformer::fit(&df, &area_attr(), 2).unwrap();

        assert_eq!(
            warnings,
            vec![TransformWarning::DegenerateColumn {
                column: "area".to_string(),
            }]
        );
        assert_relative_eq!(transformer.scalers()[0].scale, 1.0);

        let area = transformed.column("area").unwrap().f64().unwrap();
        for i in 0..3 {
            assert_relative_eq!(area.get(i).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_term_order_and_naming() {
        let df = DataFrame::new(vec![
            Column::new("area".into(), [1.0, 2.0, 3.0].as_slice()),
            Column::new("frontage".into(), [10.0, 20.0, 30.0].as_slice()),
        ])
        .unwrap();
        let attrs = vec!["area".to_string(), "frontage".to_string()];
        let (_, transformer, _) = NumericTransformer::fit(&df, &attrs, 3).unwrap();

        assert_eq!(
            transformer.term_columns(),
            vec![
                "area",
                "area_squared",
                "area_cubed",
                "frontage",
                "frontage_squared",
                "frontage_cubed",
            ]
        );
    }

    #[test]
    fn test_transform_record_matches_fit() {
        let df = area_frame(&[1000.0, 2000.0]);
        let (_, transformer, _) = NumericTransformer::fit(&df, &area_attr(), 2).unwrap();

        let record = Record::new().with("area", 1000.0);
        let entries = transformer.transform_record(&record).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "area");
        assert_relative_eq!(entries[0].1, -1.0);
        assert_eq!(entries[1].0, "area_squared");
        assert_relative_eq!(entries[1].1, 1.0);
    }

    #[test]
    fn test_transform_record_missing_field() {
        let df = area_frame(&[1000.0, 2000.0]);
        let (_, transformer, _) = NumericTransformer::fit(&df, &area_attr(), 2).unwrap();

        let err = transformer
            .transform_record(&Record::new().with("name", "Bungalow"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::MissingField(f) if f == "area"));
    }

    #[test]
    fn test_transform_record_non_numeric_field() {
        let df = area_frame(&[1000.0, 2000.0]);
        let (_, transformer, _) = NumericTransformer::fit(&df, &area_attr(), 2).unwrap();

        let err = transformer
            .transform_record(&Record::new().with("area", "big"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::NonNumericField { field, .. } if field == "area"));
    }
}
