//! Answer validation error types.
//!
//! `ModelError` covers the invariants of a single question or answer.
//! `AnswersError` is what the collection store raises: it lifts model
//! failures into the schema/semantic split and adds the record index so a
//! caller can point at the offending entry of an answers file.

use thiserror::Error;

/// A question or answer could not be constructed because an invariant failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The question prompt was the empty string.
    #[error("question prompt must be non-empty")]
    EmptyPrompt,

    /// A question needs at least two selectables to choose between.
    #[error("question needs at least 2 selectables, got {count}")]
    TooFewSelectables { count: usize },

    /// A selectable's text was the empty string.
    #[error("selectable #{index} has empty text")]
    EmptySelectable { index: usize },

    /// Two selectables of the same question share a text.
    #[error("duplicate selectable text: {text:?}")]
    DuplicateSelectable { text: String },

    /// The chosen index does not name a selectable.
    #[error("choice {choice} is out of range for {count} selectables")]
    ChoiceOutOfRange { choice: usize, count: usize },

    /// An acceptable index does not name a selectable.
    #[error("acceptable index {index} is out of range for {count} selectables")]
    AcceptableOutOfRange { index: usize, count: usize },
}

impl ModelError {
    /// Returns `true` for shape failures (empty strings, too few selectables)
    /// as opposed to domain-rule failures.
    pub fn is_schema(&self) -> bool {
        matches!(
            self,
            ModelError::EmptyPrompt
                | ModelError::TooFewSelectables { .. }
                | ModelError::EmptySelectable { .. }
        )
    }
}

/// Errors raised while building, loading, or inserting into an answer collection.
#[derive(Debug, Error)]
pub enum AnswersError {
    /// The input text is not well-formed JSON.
    #[error("malformed answers text: {0}")]
    Parse(#[source] serde_json::Error),

    /// The input has the wrong shape: wrong types, empty strings, too few
    /// selectables, unknown fields, negative or fractional importance.
    #[error("schema violation{}: {message}", at_record(.record))]
    SchemaViolation {
        record: Option<usize>,
        message: String,
    },

    /// The shape is valid but a domain rule is broken: zero or several
    /// chosen selectables, duplicate selectable text, out-of-range index.
    #[error("semantic violation{}: {message}", at_record(.record))]
    SemanticViolation {
        record: Option<usize>,
        message: String,
    },

    /// The question is already answered in this collection and overwrite was
    /// not requested.
    #[error("duplicate question{}: {prompt:?} is already answered", at_record(.record))]
    DuplicateQuestion {
        record: Option<usize>,
        prompt: String,
    },
}

impl AnswersError {
    /// Lift a model failure into the store taxonomy, tagged with its record.
    pub fn from_model(record: Option<usize>, err: ModelError) -> Self {
        let message = err.to_string();
        if err.is_schema() {
            AnswersError::SchemaViolation { record, message }
        } else {
            AnswersError::SemanticViolation { record, message }
        }
    }

    /// The zero-based record index this error refers to, if any.
    pub fn record(&self) -> Option<usize> {
        match self {
            AnswersError::Parse(_) => None,
            AnswersError::SchemaViolation { record, .. }
            | AnswersError::SemanticViolation { record, .. }
            | AnswersError::DuplicateQuestion { record, .. } => *record,
        }
    }

    /// Returns `true` if a caller could resolve this by asking to overwrite.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, AnswersError::DuplicateQuestion { .. })
    }
}

impl From<ModelError> for AnswersError {
    fn from(err: ModelError) -> Self {
        AnswersError::from_model(None, err)
    }
}

fn at_record(record: &Option<usize>) -> String {
    match record {
        Some(i) => format!(" in record {i}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_classify() {
        assert!(ModelError::EmptyPrompt.is_schema());
        assert!(ModelError::TooFewSelectables { count: 1 }.is_schema());
        assert!(ModelError::EmptySelectable { index: 0 }.is_schema());
        assert!(!ModelError::DuplicateSelectable { text: "a".into() }.is_schema());
        assert!(!ModelError::ChoiceOutOfRange { choice: 3, count: 3 }.is_schema());
    }

    #[test]
    fn lifted_errors_keep_record_index() {
        let err = AnswersError::from_model(Some(2), ModelError::EmptyPrompt);
        assert!(matches!(err, AnswersError::SchemaViolation { .. }));
        assert_eq!(err.record(), Some(2));
        assert_eq!(
            err.to_string(),
            "schema violation in record 2: question prompt must be non-empty"
        );

        let err: AnswersError = ModelError::DuplicateSelectable { text: "yes".into() }.into();
        assert!(matches!(err, AnswersError::SemanticViolation { .. }));
        assert_eq!(err.record(), None);
        assert_eq!(
            err.to_string(),
            "semantic violation: duplicate selectable text: \"yes\""
        );
    }

    #[test]
    fn duplicate_question_message() {
        let err = AnswersError::DuplicateQuestion {
            record: None,
            prompt: "Tea?".into(),
        };
        assert!(err.is_duplicate());
        assert_eq!(err.to_string(), "duplicate question: \"Tea?\" is already answered");
    }
}
