//! Raw Record
//!
//! A raw property record as seen at the pipeline boundary: a mapping from
//! attribute name to either a categorical label or a numeric value. Training
//! batches carry the target attribute; inference records do not.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single attribute value: categorical label or numeric measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Numeric value (e.g. area in square feet).
    Num(f64),
    /// Categorical label (e.g. property type, land option).
    Text(String),
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Num(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A raw record: attribute name to value.
///
/// Uses a `BTreeMap` so serialization and iteration order are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record(BTreeMap<String, AttrValue>);

impl Record {
    /// Create an empty record.
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Set an attribute, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Builder-style variant of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Get an attribute value by name.
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.0.get(name)
    }

    /// Get a categorical label by name, if present and textual.
    pub fn get_text(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(AttrValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get a numeric value by name, if present and numeric.
    pub fn get_num(&self, name: &str) -> Option<f64> {
        match self.0.get(name) {
            Some(AttrValue::Num(v)) => Some(*v),
            _ => None,
        }
    }

    /// Number of attributes in the record.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over (name, value) pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accessors() {
        let record = Record::new()
            .with("name", "Bungalow")
            .with("area", 1000.0);

        assert_eq!(record.get_text("name"), Some("Bungalow"));
        assert_eq!(record.get_num("area"), Some(1000.0));
        assert_eq!(record.get_text("area"), None);
        assert_eq!(record.get_num("name"), None);
        assert!(record.get("missing").is_none());
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_record_json_untagged() {
        let json = r#"{"name":"Bungalow","area":2000,"landOptions":"Suburban"}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.get_text("name"), Some("Bungalow"));
        assert_eq!(record.get_num("area"), Some(2000.0));
        assert_eq!(record.get_text("landOptions"), Some("Suburban"));
    }

    #[test]
    fn test_record_set_replaces() {
        let mut record = Record::new().with("area", 1000.0);
        record.set("area", 2000.0);
        assert_eq!(record.get_num("area"), Some(2000.0));
        assert_eq!(record.len(), 1);
    }
}
