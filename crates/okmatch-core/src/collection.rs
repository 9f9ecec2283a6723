//! One person's answered questions.
//!
//! Entries keep insertion order (that is the order they are written back
//! out in) and are keyed by question value through a side index, so
//! duplicate checks and cross-collection lookups are O(1).

use std::collections::HashMap;

use serde_json::Value;

use crate::error::AnswersError;
use crate::model::{AnsweredQuestion, MultiChoiceQuestion};
use crate::records::{self, AnswerRecord, SelectableRecord};

/// An ordered collection holding at most one answer per distinct question.
#[derive(Debug, Clone, Default)]
pub struct AnswerCollection {
    entries: Vec<AnsweredQuestion>,
    index: HashMap<MultiChoiceQuestion, usize>,
}

impl AnswerCollection {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from raw records.
    ///
    /// Every record is schema-checked before any is materialized. A question
    /// that appears twice in the batch is a
    /// [`AnswersError::DuplicateQuestion`]; construction never overwrites.
    pub fn from_records(records: &[AnswerRecord]) -> Result<Self, AnswersError> {
        records::check_schema(records)?;

        let mut collection = Self::new();
        for (i, record) in records.iter().enumerate() {
            let answer = materialize(record, i)?;
            collection.insert_at(answer, false, Some(i))?;
        }

        tracing::debug!("constructed collection of {} answer(s)", collection.len());
        Ok(collection)
    }

    /// Build a collection from already-parsed JSON.
    pub fn from_json_value(value: Value) -> Result<Self, AnswersError> {
        let records = records::records_from_value(value)?;
        Self::from_records(&records)
    }

    /// Parse answers-file text and build its collection.
    pub fn load_from_text(text: &str) -> Result<Self, AnswersError> {
        let records = records::records_from_str(text)?;
        Self::from_records(&records)
    }

    /// Build a collection from answers authored in code, in order.
    pub fn from_answers<I>(answers: I) -> Result<Self, AnswersError>
    where
        I: IntoIterator<Item = AnsweredQuestion>,
    {
        let mut collection = Self::new();
        for answer in answers {
            collection.insert(answer, false)?;
        }
        Ok(collection)
    }

    /// Add one answer.
    ///
    /// If the question is already answered this fails with
    /// [`AnswersError::DuplicateQuestion`], unless `overwrite` is set, in
    /// which case the new answer takes the old one's position.
    pub fn insert(
        &mut self,
        answer: AnsweredQuestion,
        overwrite: bool,
    ) -> Result<(), AnswersError> {
        self.insert_at(answer, overwrite, None)
    }

    fn insert_at(
        &mut self,
        answer: AnsweredQuestion,
        overwrite: bool,
        record: Option<usize>,
    ) -> Result<(), AnswersError> {
        if let Some(&position) = self.index.get(answer.question()) {
            if !overwrite {
                return Err(AnswersError::DuplicateQuestion {
                    record,
                    prompt: answer.question().prompt().to_string(),
                });
            }
            tracing::debug!(
                "overwriting answer to {:?} at position {position}",
                answer.question().prompt()
            );
            self.entries[position] = answer;
            return Ok(());
        }

        self.index.insert(answer.question().clone(), self.entries.len());
        self.entries.push(answer);
        Ok(())
    }

    /// The inverse of [`from_records`](Self::from_records): one record per
    /// answer in collection order, with `chosen`/`acceptable` emitted only
    /// where `true`.
    pub fn to_records(&self) -> Vec<AnswerRecord> {
        self.entries.iter().map(to_record).collect()
    }

    /// [`to_records`](Self::to_records) rendered as JSON text.
    pub fn to_json_string(&self, pretty: bool) -> serde_json::Result<String> {
        let records = self.to_records();
        if pretty {
            serde_json::to_string_pretty(&records)
        } else {
            serde_json::to_string(&records)
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Answers in collection order.
    pub fn iter(&self) -> std::slice::Iter<'_, AnsweredQuestion> {
        self.entries.iter()
    }

    /// This collection's answer to `question`, if any.
    pub fn get(&self, question: &MultiChoiceQuestion) -> Option<&AnsweredQuestion> {
        self.index.get(question).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, question: &MultiChoiceQuestion) -> bool {
        self.index.contains_key(question)
    }

    /// The answered questions, in collection order.
    pub fn questions(&self) -> impl Iterator<Item = &MultiChoiceQuestion> {
        self.entries.iter().map(AnsweredQuestion::question)
    }

    /// Questions answered in `template` but not yet in `self`, in the
    /// template's order.
    pub fn unanswered_from<'a>(
        &self,
        template: &'a AnswerCollection,
    ) -> Vec<&'a MultiChoiceQuestion> {
        template.questions().filter(|q| !self.contains(q)).collect()
    }
}

impl<'a> IntoIterator for &'a AnswerCollection {
    type Item = &'a AnsweredQuestion;
    type IntoIter = std::slice::Iter<'a, AnsweredQuestion>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Turn a schema-valid record into an answer, applying the domain rules.
fn materialize(record: &AnswerRecord, i: usize) -> Result<AnsweredQuestion, AnswersError> {
    let semantic = |message: &str| AnswersError::SemanticViolation {
        record: Some(i),
        message: message.to_string(),
    };

    let mut choice = None;
    let mut acceptable = Vec::new();
    for (j, selectable) in record.selectables.iter().enumerate() {
        if selectable.is_chosen() {
            if choice.is_some() {
                return Err(semantic("more than one selectable chosen"));
            }
            choice = Some(j);
        }
        if selectable.is_acceptable() {
            acceptable.push(j);
        }
    }
    let choice = choice.ok_or_else(|| semantic("no selectable chosen"))?;

    let question = MultiChoiceQuestion::new(
        record.prompt.as_str(),
        record.selectables.iter().map(|s| s.text.as_str()),
    )
    .map_err(|e| AnswersError::from_model(Some(i), e))?;

    AnsweredQuestion::new(question, choice, acceptable, record.importance)
        .map_err(|e| AnswersError::from_model(Some(i), e))
}

fn to_record(answer: &AnsweredQuestion) -> AnswerRecord {
    let question = answer.question();
    let selectables = question
        .selectables()
        .iter()
        .enumerate()
        .map(|(j, text)| {
            let mut selectable = SelectableRecord::new(text.as_str());
            if j == answer.choice() {
                selectable = selectable.chosen();
            }
            if answer.accepts(j) {
                selectable = selectable.acceptable();
            }
            selectable
        })
        .collect();

    AnswerRecord {
        prompt: question.prompt().to_string(),
        selectables,
        importance: answer.importance(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn good() -> Value {
        json!([{
            "prompt": "?",
            "selectables": [
                { "text": "0", "chosen": false, "acceptable": true },
                { "text": "1", "chosen": true, "acceptable": true }
            ],
            "importance": 0
        }])
    }

    fn semantic_fails(value: Value) {
        let err = AnswerCollection::from_json_value(value).unwrap_err();
        assert!(
            matches!(err, AnswersError::SemanticViolation { .. }),
            "unexpected error {err:?}"
        );
    }

    #[test]
    fn construct_valid() {
        assert!(AnswerCollection::from_json_value(json!([])).unwrap().is_empty());

        let collection = AnswerCollection::from_json_value(good()).unwrap();
        assert_eq!(collection.len(), 1);
        let answer = collection.iter().next().unwrap();
        assert_eq!(answer.choice(), 1);
        assert_eq!(answer.acceptable().len(), 2);
        assert_eq!(answer.importance(), 0);
    }

    #[test]
    fn exactly_one_chosen() {
        let mut bad = good();
        bad[0]["selectables"][0]["chosen"] = json!(true);
        let err = AnswerCollection::from_json_value(bad).unwrap_err();
        assert!(err.to_string().contains("more than one selectable chosen"));

        let mut bad = good();
        bad[0]["selectables"][1]["chosen"] = json!(false);
        let err = AnswerCollection::from_json_value(bad).unwrap_err();
        assert!(err.to_string().contains("no selectable chosen"));
    }

    #[test]
    fn duplicate_selectable_text_is_semantic() {
        let mut bad = good();
        bad[0]["selectables"][1]["text"] = json!("0");
        semantic_fails(bad.clone());

        let err = AnswerCollection::from_json_value(bad).unwrap_err();
        assert!(err.to_string().contains("\"0\""));
    }

    #[test]
    fn chosen_checks_run_before_selectable_uniqueness() {
        let mut bad = good();
        bad[0]["selectables"][1]["text"] = json!("0");
        bad[0]["selectables"][1]["chosen"] = json!(false);
        let err = AnswerCollection::from_json_value(bad).unwrap_err();
        assert!(err.to_string().contains("no selectable chosen"));
    }

    #[test]
    fn schema_errors_win_over_earlier_semantic_errors() {
        let mut bad = good();
        bad[0]["selectables"][1]["chosen"] = json!(false);
        let mut second = good()[0].clone();
        second["prompt"] = json!("");
        bad.as_array_mut().unwrap().push(second);

        let err = AnswerCollection::from_json_value(bad).unwrap_err();
        assert!(matches!(
            err,
            AnswersError::SchemaViolation { record: Some(1), .. }
        ));
    }

    #[test]
    fn duplicate_question_in_batch() {
        let mut bad = good();
        let copy = bad[0].clone();
        bad.as_array_mut().unwrap().push(copy);

        let err = AnswerCollection::from_json_value(bad).unwrap_err();
        assert!(matches!(
            err,
            AnswersError::DuplicateQuestion { record: Some(1), .. }
        ));
    }

    #[test]
    fn same_prompt_with_other_selectables_is_another_question() {
        let mut value = good();
        let mut other = value[0].clone();
        other["selectables"]
            .as_array_mut()
            .unwrap()
            .push(json!({ "text": "2" }));
        value.as_array_mut().unwrap().push(other);

        let collection = AnswerCollection::from_json_value(value).unwrap();
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn round_trip() {
        let mut value = good();
        value[0]["selectables"][0]
            .as_object_mut()
            .unwrap()
            .remove("chosen");
        let mut second = value[0].clone();
        second["prompt"] = json!("??");
        value.as_array_mut().unwrap().push(second);

        let collection = AnswerCollection::from_json_value(value.clone()).unwrap();
        assert_eq!(serde_json::to_value(collection.to_records()).unwrap(), value);
    }

    #[test]
    fn explicit_false_is_dropped_on_output() {
        let collection = AnswerCollection::from_json_value(good()).unwrap();
        let out = serde_json::to_value(collection.to_records()).unwrap();
        assert_eq!(out[0]["selectables"][0], json!({ "text": "0", "acceptable": true }));
        assert_eq!(
            out[0]["selectables"][1],
            json!({ "text": "1", "chosen": true, "acceptable": true })
        );
    }

    #[test]
    fn load_from_text_round_trips() {
        let text = r#"[
            {
                "prompt": "Do you like trains?",
                "selectables": [
                    { "text": "yes", "chosen": true, "acceptable": true },
                    { "text": "no" }
                ],
                "importance": 10
            }
        ]"#;
        let collection = AnswerCollection::load_from_text(text).unwrap();
        let expected: Value = serde_json::from_str(text).unwrap();
        let rendered: Value =
            serde_json::from_str(&collection.to_json_string(false).unwrap()).unwrap();
        assert_eq!(rendered, expected);
    }

    #[test]
    fn load_from_text_distinguishes_parse_errors() {
        assert!(matches!(
            AnswerCollection::load_from_text("[").unwrap_err(),
            AnswersError::Parse(_)
        ));
        assert!(matches!(
            AnswerCollection::load_from_text("[0]").unwrap_err(),
            AnswersError::SchemaViolation { record: Some(0), .. }
        ));
    }

    #[test]
    fn overwrite_keeps_position() {
        let entry = |prompt: &str, importance: u64| {
            json!({
                "prompt": prompt,
                "selectables": [{ "text": "x", "chosen": true }, { "text": "y" }],
                "importance": importance
            })
        };
        let value = json!([entry("a", 1), entry("b", 2), entry("c", 3)]);
        let mut collection = AnswerCollection::from_json_value(value).unwrap();

        let original = collection.iter().nth(1).unwrap().clone();
        let replacement =
            AnsweredQuestion::new(original.question().clone(), 1, [0, 1], 9).unwrap();

        let err = collection.insert(replacement.clone(), false).unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(collection.iter().nth(1), Some(&original));

        collection.insert(replacement.clone(), true).unwrap();
        assert_eq!(collection.len(), 3);
        let prompts: Vec<&str> = collection.questions().map(|q| q.prompt()).collect();
        assert_eq!(prompts, vec!["a", "b", "c"]);
        assert_eq!(collection.iter().nth(1), Some(&replacement));
        assert_eq!(collection.get(replacement.question()), Some(&replacement));
    }

    #[test]
    fn overwrite_matches_freshly_built_collection() {
        let mut value = good();
        let mut second = value[0].clone();
        second["prompt"] = json!("??");
        value.as_array_mut().unwrap().push(second);
        let mut collection = AnswerCollection::from_json_value(value.clone()).unwrap();

        let old = collection.iter().nth(1).unwrap().clone();
        let alt = AnsweredQuestion::new(
            old.question().clone(),
            0,
            old.acceptable().iter().copied(),
            old.importance(),
        )
        .unwrap();
        collection.insert(alt, true).unwrap();

        let mut expected = value;
        expected[1]["selectables"][0]["chosen"] = json!(true);
        expected[1]["selectables"][1]["chosen"] = json!(false);
        let expected = AnswerCollection::from_json_value(expected).unwrap();
        assert_eq!(collection.to_records(), expected.to_records());
    }

    #[test]
    fn insert_new_question_appends() {
        let mut collection = AnswerCollection::from_json_value(good()).unwrap();
        let q = MultiChoiceQuestion::new("Tea?", ["yes", "no"]).unwrap();
        collection
            .insert(AnsweredQuestion::new(q.clone(), 0, [0], 5).unwrap(), false)
            .unwrap();
        assert_eq!(collection.len(), 2);
        assert!(collection.contains(&q));
        assert_eq!(collection.questions().last(), Some(&q));
    }

    #[test]
    fn from_answers_rejects_duplicates() {
        let q = MultiChoiceQuestion::new("Tea?", ["yes", "no"]).unwrap();
        let a = AnsweredQuestion::new(q.clone(), 0, [0], 5).unwrap();
        let b = AnsweredQuestion::new(q, 1, [1], 5).unwrap();
        let err = AnswerCollection::from_answers([a, b]).unwrap_err();
        assert!(matches!(
            err,
            AnswersError::DuplicateQuestion { record: None, .. }
        ));
    }

    #[test]
    fn unanswered_from_template() {
        let tea = MultiChoiceQuestion::new("Tea?", ["yes", "no"]).unwrap();
        let cats = MultiChoiceQuestion::new("Cats?", ["yes", "no"]).unwrap();
        let dogs = MultiChoiceQuestion::new("Dogs?", ["yes", "no"]).unwrap();

        let mine = AnswerCollection::from_answers([
            AnsweredQuestion::new(cats.clone(), 0, [0], 1).unwrap(),
        ])
        .unwrap();
        let theirs = AnswerCollection::from_answers([
            AnsweredQuestion::new(tea.clone(), 0, [0], 1).unwrap(),
            AnsweredQuestion::new(cats, 1, [1], 1).unwrap(),
            AnsweredQuestion::new(dogs.clone(), 1, [], 0).unwrap(),
        ])
        .unwrap();

        assert_eq!(mine.unanswered_from(&theirs), vec![&tea, &dogs]);
    }
}
