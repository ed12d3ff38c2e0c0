//! Dataset loading from JSON files
//!
//! Records are read field by field rather than through a derived
//! `Deserialize`, so a malformed record is reported with its identifier
//! and the offending field.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::error::Category;
use serde_json::{Map, Value};

use super::{GroundTruth, Prediction, Predictions, QaPair};
use crate::analysis::Evidence;

/// Error type for dataset loading
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid structure: {0}")]
    Structure(String),

    #[error("{record}: missing field `{field}`")]
    MissingField { record: String, field: String },

    #[error("{record}: field `{field}` must be {expected}")]
    InvalidField {
        record: String,
        field: String,
        expected: &'static str,
    },

    #[error("Duplicate qa_id: {0}")]
    DuplicateId(String),
}

/// Load the ground-truth dataset from a JSON file
pub fn load_ground_truth_from_file(path: impl AsRef<Path>) -> Result<GroundTruth, LoadError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let ground_truth = load_ground_truth_from_str(&content)?;
    tracing::info!(
        "Loaded {} questions from {}",
        ground_truth.len(),
        path.as_ref().display()
    );
    Ok(ground_truth)
}

/// Load the ground-truth dataset from a JSON string.
///
/// Expects `{"qa_pairs": [...]}`.
pub fn load_ground_truth_from_str(content: &str) -> Result<GroundTruth, LoadError> {
    let root: Value = serde_json::from_str(content)?;

    let pairs = root
        .get("qa_pairs")
        .ok_or_else(|| LoadError::Structure("missing top-level `qa_pairs`".to_string()))?
        .as_array()
        .ok_or_else(|| LoadError::Structure("`qa_pairs` must be an array".to_string()))?;

    let mut seen = HashSet::new();
    let mut qa_pairs = Vec::with_capacity(pairs.len());

    for (idx, value) in pairs.iter().enumerate() {
        let qa = parse_qa_pair(value, idx)?;
        if !seen.insert(qa.qa_id.clone()) {
            return Err(LoadError::DuplicateId(qa.qa_id));
        }
        qa_pairs.push(qa);
    }

    Ok(GroundTruth { qa_pairs })
}

/// Load predictions from a JSON file
pub fn load_predictions_from_file(path: impl AsRef<Path>) -> Result<Predictions, LoadError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let predictions = load_predictions_from_str(&content)?;
    tracing::info!(
        "Loaded {} predictions from {}",
        predictions.len(),
        path.as_ref().display()
    );
    Ok(predictions)
}

/// Load predictions from a JSON string.
///
/// Expects an object keyed by `qa_id`. A key repeated within the object
/// is rejected.
pub fn load_predictions_from_str(content: &str) -> Result<Predictions, LoadError> {
    let PredictionEntries(entries) =
        serde_json::from_str(content).map_err(|e| match e.classify() {
            Category::Data => LoadError::Structure(e.to_string()),
            _ => LoadError::Parse(e),
        })?;

    let mut predictions = Predictions::with_capacity(entries.len());
    for (qa_id, value) in entries {
        let prediction = parse_prediction(&qa_id, &value)?;
        if predictions.contains_key(&qa_id) {
            return Err(LoadError::DuplicateId(qa_id));
        }
        predictions.insert(qa_id, prediction);
    }
    Ok(predictions)
}

/// Top-level prediction entries in file order.
///
/// `serde_json::Map` keeps only the last value for a repeated key, so
/// the entries are collected from the map access directly.
struct PredictionEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for PredictionEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = PredictionEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("predictions as an object keyed by qa_id")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Value>()? {
                    entries.push(entry);
                }
                Ok(PredictionEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Parse a single question from a JSON value
fn parse_qa_pair(value: &Value, index: usize) -> Result<QaPair, LoadError> {
    let position = format!("qa_pairs[{}]", index);
    let obj = value.as_object().ok_or_else(|| LoadError::InvalidField {
        record: position.clone(),
        field: "qa_pairs".to_string(),
        expected: "an array of objects",
    })?;

    // Name the record by its id once we have one
    let qa_id = required_str(obj, &position, "qa_id")?;
    let record = qa_id.as_str();

    Ok(QaPair {
        question_type: required_str(obj, record, "question_type")?,
        question: optional_str(obj, record, "question")?,
        answer: required_str(obj, record, "answer")?,
        alternative_answers: optional_str_list(obj, record, "alternative_answers")?
            .unwrap_or_default(),
        reasoning_steps: optional_str_list(obj, record, "reasoning_steps")?.unwrap_or_default(),
        evidence: parse_evidence(obj, record)?,
        qa_id,
    })
}

/// Parse a single prediction from a JSON value
fn parse_prediction(qa_id: &str, value: &Value) -> Result<Prediction, LoadError> {
    let obj = value.as_object().ok_or_else(|| LoadError::InvalidField {
        record: qa_id.to_string(),
        field: "prediction".to_string(),
        expected: "an object",
    })?;

    Ok(Prediction {
        answer: required_str(obj, qa_id, "answer")?,
        reasoning_steps: optional_str_list(obj, qa_id, "reasoning_steps")?,
        predicted_sources: optional_str_list(obj, qa_id, "predicted_sources")?,
    })
}

/// Parse the evidence mapping (source type -> source ids)
fn parse_evidence(obj: &Map<String, Value>, record: &str) -> Result<Evidence, LoadError> {
    let evidence = match obj.get("evidence") {
        None | Some(Value::Null) => return Ok(Evidence::new()),
        Some(Value::Object(map)) => map,
        Some(_) => return Err(invalid(record, "evidence", "an object of string arrays")),
    };

    evidence
        .iter()
        .map(|(source_type, sources)| {
            let field = format!("evidence.{}", source_type);
            let ids = string_list(sources).ok_or_else(|| LoadError::InvalidField {
                record: record.to_string(),
                field,
                expected: "an array of strings",
            })?;
            Ok((source_type.clone(), ids))
        })
        .collect()
}

fn required_str(obj: &Map<String, Value>, record: &str, field: &str) -> Result<String, LoadError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(LoadError::MissingField {
            record: record.to_string(),
            field: field.to_string(),
        }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(invalid(record, field, "a string")),
    }
}

fn optional_str(
    obj: &Map<String, Value>,
    record: &str,
    field: &str,
) -> Result<Option<String>, LoadError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(invalid(record, field, "a string")),
    }
}

fn optional_str_list(
    obj: &Map<String, Value>,
    record: &str,
    field: &str,
) -> Result<Option<Vec<String>>, LoadError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => string_list(value)
            .map(Some)
            .ok_or_else(|| invalid(record, field, "an array of strings")),
    }
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(String::from))
        .collect()
}

fn invalid(record: &str, field: &str, expected: &'static str) -> LoadError {
    LoadError::InvalidField {
        record: record.to_string(),
        field: field.to_string(),
        expected,
    }
}
