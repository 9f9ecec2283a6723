//! Answers-file records.
//!
//! The persisted form of an answer collection is a JSON array with one
//! [`AnswerRecord`] per answered question. Decoding happens in two passes:
//! serde checks types and rejects unknown keys, then [`check_schema`] checks
//! the bounds serde cannot express (non-empty strings, at least two
//! selectables). Turning a schema-valid record into domain values is the
//! collection's job.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::collection::AnswerCollection;
use crate::error::AnswersError;

/// One answered question as it appears in an answers file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnswerRecord {
    pub prompt: String,
    pub selectables: Vec<SelectableRecord>,
    pub importance: u64,
}

/// One option of a question. `chosen` and `acceptable` are only written
/// when `true`; an explicit `false` is accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectableRecord {
    pub text: String,
    #[serde(
        default,
        deserialize_with = "present_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub chosen: Option<bool>,
    #[serde(
        default,
        deserialize_with = "present_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub acceptable: Option<bool>,
}

/// A flag may be absent, but when present it must be a boolean, not `null`.
fn present_bool<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    bool::deserialize(deserializer).map(Some)
}

impl SelectableRecord {
    /// A selectable with neither flag set.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            chosen: None,
            acceptable: None,
        }
    }

    pub fn chosen(mut self) -> Self {
        self.chosen = Some(true);
        self
    }

    pub fn acceptable(mut self) -> Self {
        self.acceptable = Some(true);
        self
    }

    /// Absent and `false` both mean "not chosen".
    pub fn is_chosen(&self) -> bool {
        self.chosen.unwrap_or(false)
    }

    /// Absent and `false` both mean "not acceptable".
    pub fn is_acceptable(&self) -> bool {
        self.acceptable.unwrap_or(false)
    }
}

/// Check the bounds of every record that the type system does not enforce.
///
/// Runs over the whole batch before any semantic rule is applied, so a
/// shape error anywhere wins over a domain error earlier in the array.
pub fn check_schema(records: &[AnswerRecord]) -> Result<(), AnswersError> {
    for (i, record) in records.iter().enumerate() {
        let fail = |message: String| AnswersError::SchemaViolation {
            record: Some(i),
            message,
        };

        if record.prompt.is_empty() {
            return Err(fail("prompt must be non-empty".into()));
        }
        if record.selectables.len() < 2 {
            return Err(fail(format!(
                "selectables needs at least 2 entries, got {}",
                record.selectables.len()
            )));
        }
        if let Some(j) = record.selectables.iter().position(|s| s.text.is_empty()) {
            return Err(fail(format!("selectables[{j}].text must be non-empty")));
        }
    }
    Ok(())
}

/// Decode already-parsed JSON into records, reporting type and unknown-field
/// failures as schema violations tagged with the record index.
pub fn records_from_value(value: Value) -> Result<Vec<AnswerRecord>, AnswersError> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(AnswersError::SchemaViolation {
                record: None,
                message: format!("expected an array of answer records, got {}", kind_of(&other)),
            })
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value(item).map_err(|e| AnswersError::SchemaViolation {
                record: Some(i),
                message: e.to_string(),
            })
        })
        .collect()
}

/// Parse answers text into records. Malformed JSON is a [`AnswersError::Parse`];
/// well-formed JSON of the wrong shape is a schema violation.
pub fn records_from_str(text: &str) -> Result<Vec<AnswerRecord>, AnswersError> {
    let value: Value = serde_json::from_str(text).map_err(AnswersError::Parse)?;
    records_from_value(value)
}

/// Read an answers file and build its collection.
pub fn load_answers(path: &Path) -> Result<AnswerCollection> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;

    let collection = AnswerCollection::load_from_text(&content)
        .with_context(|| format!("invalid answers file: {}", path.display()))?;

    tracing::debug!(
        "loaded {} answered question(s) from {}",
        collection.len(),
        path.display()
    );
    Ok(collection)
}

/// Write a collection to an answers file.
pub fn save_answers(collection: &AnswerCollection, path: &Path, pretty: bool) -> Result<()> {
    let json = collection
        .to_json_string(pretty)
        .context("failed to serialize answers")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write answers to {}", path.display()))?;
    Ok(())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
