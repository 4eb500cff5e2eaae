//! Categorical one-hot encoding.
//!
//! Expands each configured categorical attribute into binary indicator
//! columns, one per observed value except the first (drop-first policy, to
//! avoid linear redundancy between indicators). The vocabulary is derived
//! from training data once, at fit time, and frozen into the encoder; the
//! indicator column set becomes part of the schema registry.

use crate::error::{FitError, PipelineError, TransformWarning};
use crate::record::Record;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Strip bracket characters that downstream column handling rejects.
fn sanitize_field_name(name: &str) -> String {
    name.replace(['[', ']'], "")
}

/// Indicator column name for an (attribute, value) pair.
fn indicator_name(attribute: &str, value: &str) -> String {
    sanitize_field_name(&format!("{attribute}_{value}"))
}

/// Vocabulary of one categorical attribute, frozen at fit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeVocabulary {
    attribute: String,
    /// Sorted distinct values observed at fit time. The first entry is the
    /// reference value and gets no indicator column.
    values: Vec<String>,
}

impl AttributeVocabulary {
    /// Attribute name this vocabulary covers.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// The reference (dropped) value.
    pub fn reference(&self) -> &str {
        &self.values[0]
    }

    /// All observed values, sorted, reference first.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Values that carry an indicator column (everything but the reference).
    pub fn encoded_values(&self) -> &[String] {
        &self.values[1..]
    }

    fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// Fitted one-hot encoder for a fixed list of categorical attributes.
///
/// Known blind spot: a value never seen at fit time produces all-zero
/// indicators, which is exactly the encoding of the reference value. An
/// unseen category therefore collapses to the reference category's
/// contribution; callers are told via [`TransformWarning::UnseenCategory`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalEncoder {
    vocabularies: Vec<AttributeVocabulary>,
}

impl CategoricalEncoder {
    /// Derive vocabularies from a training batch and encode it.
    ///
    /// Returns the indicator DataFrame (columns in vocabulary order) and
    /// the fitted encoder.
    pub fn fit(df: &DataFrame, attributes: &[String]) -> Result<(DataFrame, Self), FitError> {
        let mut vocabularies = Vec::with_capacity(attributes.len());

        for attribute in attributes {
            let column = df
                .column(attribute)
                .map_err(|_| FitError::MissingColumn(attribute.clone()))?;
            let labels = column.str()?;

            let distinct: BTreeSet<String> =
                labels.into_iter().flatten().map(str::to_string).collect();
            if distinct.is_empty() {
                return Err(FitError::EmptyTrainingSet);
            }

            vocabularies.push(AttributeVocabulary {
                attribute: attribute.clone(),
                values: distinct.into_iter().collect(),
            });
        }

        let encoder = Self { vocabularies };
        let indicators = encoder.indicator_frame(df)?;
        Ok((indicators, encoder))
    }

    /// Encode a training batch into indicator columns.
    fn indicator_frame(&self, df: &DataFrame) -> Result<DataFrame, PolarsError> {
        let mut lf = df.clone().lazy();

        for vocab in &self.vocabularies {
            for value in vocab.encoded_values() {
                let col_name = indicator_name(&vocab.attribute, value);
                lf = lf.with_column(
                    when(col(vocab.attribute.as_str()).eq(lit(value.as_str())))
                        .then(lit(1.0))
                        .otherwise(lit(0.0))
                        .alias(&col_name),
                );
            }
        }

        let selected: Vec<Expr> = self
            .indicator_columns()
            .iter()
            .map(|name| col(name.as_str()))
            .collect();

        lf.select(selected).collect()
    }

    /// Ordered indicator column names, as they appear in the schema.
    pub fn indicator_columns(&self) -> Vec<String> {
        self.vocabularies
            .iter()
            .flat_map(|vocab| {
                vocab
                    .encoded_values()
                    .iter()
                    .map(|value| indicator_name(&vocab.attribute, value))
            })
            .collect()
    }

    /// Encode a single inference record into (field, value) entries.
    ///
    /// A value not in the fit-time vocabulary contributes no indicator (all
    /// zeros) and surfaces an [`TransformWarning::UnseenCategory`]; it is
    /// never an error. A record lacking a configured categorical attribute
    /// fails with [`PipelineError::MissingField`].
    pub fn encode_record(
        &self,
        record: &Record,
    ) -> Result<(Vec<(String, f64)>, Vec<TransformWarning>), PipelineError> {
        let mut entries = Vec::new();
        let mut warnings = Vec::new();

        for vocab in &self.vocabularies {
            let value = record
                .get_text(&vocab.attribute)
                .ok_or_else(|| PipelineError::MissingField(vocab.attribute.clone()))?;

            if !vocab.contains(value) {
                tracing::warn!(
                    attribute = vocab.attribute.as_str(),
                    value,
                    "categorical value not seen at fit time; encoding as reference"
                );
                warnings.push(TransformWarning::UnseenCategory {
                    attribute: vocab.attribute.clone(),
                    value: value.to_string(),
                });
            }

            for encoded in vocab.encoded_values() {
                let indicator = if encoded == value { 1.0 } else { 0.0 };
                entries.push((indicator_name(&vocab.attribute, encoded), indicator));
            }
        }

        Ok((entries, warnings))
    }

    /// Vocabularies in configured attribute order.
    pub fn vocabularies(&self) -> &[AttributeVocabulary] {
        &self.vocabularies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new(
                "name".into(),
                ["Cottage", "Bungalow", "Cottage", "Villa"].as_slice(),
            ),
            Column::new(
                "landOptions".into(),
                ["Urban", "Suburban", "Rural", "Urban"].as_slice(),
            ),
        ])
        .unwrap()
    }

    fn attrs() -> Vec<String> {
        vec!["name".to_string(), "landOptions".to_string()]
    }

    #[test]
    fn test_vocabulary_sorted_drop_first() {
        let (_, encoder) = CategoricalEncoder::fit(&sample_frame(), &attrs()).unwrap();

        let name_vocab = &encoder.vocabularies()[0];
        assert_eq!(name_vocab.reference(), "Bungalow");
        assert_eq!(name_vocab.encoded_values(), ["Cottage", "Villa"]);

        assert_eq!(
            encoder.indicator_columns(),
            vec![
                "name_Cottage",
                "name_Villa",
                "landOptions_Suburban",
                "landOptions_Urban",
            ]
        );
    }

    #[test]
    fn test_indicator_frame_values() {
        let (indicators, _) = CategoricalEncoder::fit(&sample_frame(), &attrs()).unwrap();

        assert_eq!(indicators.height(), 4);
        let cottage = indicators.column("name_Cottage").unwrap().f64().unwrap();
        assert_eq!(cottage.get(0), Some(1.0));
        assert_eq!(cottage.get(1), Some(0.0));
        assert_eq!(cottage.get(2), Some(1.0));
        assert_eq!(cottage.get(3), Some(0.0));

        let urban = indicators
            .column("landOptions_Urban")
            .unwrap()
            .f64()
            .unwrap();
        assert_eq!(urban.get(0), Some(1.0));
        assert_eq!(urban.get(1), Some(0.0));
    }

    #[test]
    fn test_encode_record_known_value() {
        let (_, encoder) = CategoricalEncoder::fit(&sample_frame(), &attrs()).unwrap();
        let record = Record::new()
            .with("name", "Villa")
            .with("landOptions", "Urban");

        let (entries, warnings) = encoder.encode_record(&record).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(entries[0], ("name_Cottage".to_string(), 0.0));
        assert_eq!(entries[1], ("name_Villa".to_string(), 1.0));
        assert_eq!(entries[3], ("landOptions_Urban".to_string(), 1.0));
    }

    #[test]
    fn test_encode_record_reference_value_all_zeros() {
        let (_, encoder) = CategoricalEncoder::fit(&sample_frame(), &attrs()).unwrap();
        let record = Record::new()
            .with("name", "Bungalow")
            .with("landOptions", "Urban");

        let (entries, warnings) = encoder.encode_record(&record).unwrap();
        // Reference value is a seen category: zeros without a warning.
        assert!(warnings.is_empty());
        assert_eq!(entries[0].1, 0.0);
        assert_eq!(entries[1].1, 0.0);
    }

    #[test]
    fn test_encode_record_unseen_value_warns() {
        let (_, encoder) = CategoricalEncoder::fit(&sample_frame(), &attrs()).unwrap();
        let record = Record::new()
            .with("name", "Castle")
            .with("landOptions", "Urban");

        let (entries, warnings) = encoder.encode_record(&record).unwrap();
        assert_eq!(
            warnings,
            vec![TransformWarning::UnseenCategory {
                attribute: "name".to_string(),
                value: "Castle".to_string(),
            }]
        );
        assert_eq!(entries[0].1, 0.0);
        assert_eq!(entries[1].1, 0.0);
    }

    #[test]
    fn test_encode_record_missing_attribute() {
        let (_, encoder) = CategoricalEncoder::fit(&sample_frame(), &attrs()).unwrap();
        let record = Record::new().with("name", "Villa");

        let err = encoder.encode_record(&record).unwrap_err();
        assert!(matches!(err, PipelineError::MissingField(field) if field == "landOptions"));
    }

    #[test]
    fn test_fit_missing_column() {
        let df = DataFrame::new(vec![Column::new(
            "name".into(),
            ["Cottage", "Bungalow"].as_slice(),
        )])
        .unwrap();

        let err = CategoricalEncoder::fit(&df, &attrs()).unwrap_err();
        assert!(matches!(err, FitError::MissingColumn(c) if c == "landOptions"));
    }

    #[test]
    fn test_indicator_name_sanitized() {
        let df = DataFrame::new(vec![Column::new(
            "landOptions".into(),
            ["Rural", "Urban [zoned]"].as_slice(),
        )])
        .unwrap();
        let (_, encoder) =
            CategoricalEncoder::fit(&df, &["landOptions".to_string()]).unwrap();

        assert_eq!(
            encoder.indicator_columns(),
            vec!["landOptions_Urban zoned"]
        );
    }
}
