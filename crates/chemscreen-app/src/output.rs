//! JSON input parsing and the timestamped output envelope.

use chemscreen_common::{ChemscreenError, Result};
use chemscreen_molecules::DescriptorRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Deserialize and validate one record. `index` is set for array elements
/// and prefixes any error with the element's position.
fn record_from_value(value: Value, index: Option<usize>) -> Result<DescriptorRecord> {
    let invalid = |msg: String| match index {
        Some(i) => ChemscreenError::InvalidDescriptor(format!("record {i}: {msg}")),
        None => ChemscreenError::InvalidDescriptor(msg),
    };
    let record: DescriptorRecord =
        serde_json::from_value(value).map_err(|e| invalid(e.to_string()))?;
    record.validate().map_err(|e| match e {
        ChemscreenError::InvalidDescriptor(msg) => invalid(msg),
        other => other,
    })?;
    Ok(record)
}

/// Parse either a single descriptor mapping or an array of them.
pub fn parse_records(json: &str) -> Result<Vec<DescriptorRecord>> {
    match serde_json::from_str::<Value>(json)? {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| record_from_value(item, Some(i)))
            .collect(),
        value @ Value::Object(_) => Ok(vec![record_from_value(value, None)?]),
        other => Err(ChemscreenError::InvalidDescriptor(format!(
            "expected a descriptor object or an array of them, got {other}"
        ))),
    }
}

/// Every command prints one of these to stdout.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub command: &'static str,
    pub generated_at: DateTime<Utc>,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(command: &'static str, data: T) -> Self {
        Self { command, generated_at: Utc::now(), data }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_object_and_array_accepted() {
        let one = parse_records(r#"{"name": "Aspirin", "mw": 180.16}"#).unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].name(), "Aspirin");

        let many = parse_records(r#"[{"mw": 100}, {"logp": 3.1, "unknown_key": 1}]"#).unwrap();
        assert_eq!(many.len(), 2);
        assert_eq!(many[1].logp(), 3.1);
        assert_eq!(many[1].mw(), 300.0);
    }

    #[test]
    fn test_malformed_input_rejected() {
        assert!(parse_records("not json").is_err());
        assert!(parse_records(r#"{"mw": "heavy"}"#).is_err());
        assert!(parse_records("42").is_err());
    }

    #[test]
    fn test_whole_float_count_accepted() {
        let records = parse_records(r#"{"hbd": 1.0}"#).unwrap();
        assert_eq!(records[0].hbd(), 1);
    }

    #[test]
    fn test_bad_count_error_names_key_and_record() {
        let err = parse_records(r#"{"hbd": 1.5}"#).unwrap_err().to_string();
        assert!(err.contains("hbd"), "{err}");

        let err = parse_records(r#"[{"mw": 180.0}, {"hba": -1}]"#).unwrap_err().to_string();
        assert!(err.contains("record 1"), "{err}");
        assert!(err.contains("hba"), "{err}");
    }

    #[test]
    fn test_envelope_shape() {
        let env = Envelope::new("library", vec![1, 2]);
        let v: serde_json::Value = serde_json::from_str(&env.to_json().unwrap()).unwrap();
        assert_eq!(v["command"], "library");
        assert_eq!(v["data"][1], 2);
        assert!(v["generated_at"].is_string());
    }
}
