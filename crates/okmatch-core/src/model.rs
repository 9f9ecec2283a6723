//! Core data model types for okmatch.
//!
//! A [`MultiChoiceQuestion`] is an immutable value: two questions are the
//! same question when their prompt and selectables (in order) are equal, no
//! matter where they were constructed. An [`AnsweredQuestion`] is one
//! person's answer to such a question. Both types validate on construction
//! and expose no mutators, so a value that exists is a valid value.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use crate::error::ModelError;

/// A multiple-choice question: a prompt plus at least two distinct options.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MultiChoiceQuestion {
    prompt: String,
    selectables: Vec<String>,
}

impl MultiChoiceQuestion {
    /// Build a question, checking that the prompt and every selectable are
    /// non-empty, that there are at least two selectables, and that no two
    /// selectables share a text.
    pub fn new<P, I, S>(prompt: P, selectables: I) -> Result<Self, ModelError>
    where
        P: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prompt = prompt.into();
        if prompt.is_empty() {
            return Err(ModelError::EmptyPrompt);
        }

        let selectables: Vec<String> = selectables.into_iter().map(Into::into).collect();
        if selectables.len() < 2 {
            return Err(ModelError::TooFewSelectables {
                count: selectables.len(),
            });
        }

        let mut seen = HashSet::with_capacity(selectables.len());
        for (index, text) in selectables.iter().enumerate() {
            if text.is_empty() {
                return Err(ModelError::EmptySelectable { index });
            }
            if !seen.insert(text.as_str()) {
                return Err(ModelError::DuplicateSelectable { text: text.clone() });
            }
        }

        Ok(Self {
            prompt,
            selectables,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The option texts, in presentation order.
    pub fn selectables(&self) -> &[String] {
        &self.selectables
    }

    /// Number of options. Always at least 2.
    pub fn len(&self) -> usize {
        self.selectables.len()
    }

    /// Always `false`; a question has at least two selectables.
    pub fn is_empty(&self) -> bool {
        self.selectables.is_empty()
    }

    pub fn selectable(&self, index: usize) -> Option<&str> {
        self.selectables.get(index).map(String::as_str)
    }
}

impl fmt::Display for MultiChoiceQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.prompt, self.selectables.join(" | "))
    }
}

/// One person's answer to a [`MultiChoiceQuestion`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsweredQuestion {
    question: MultiChoiceQuestion,
    choice: usize,
    acceptable: BTreeSet<usize>,
    importance: u64,
}

impl AnsweredQuestion {
    /// Build an answer. `choice` and every member of `acceptable` must index
    /// into the question's selectables. `acceptable` may be empty and need
    /// not contain `choice`.
    pub fn new<I>(
        question: MultiChoiceQuestion,
        choice: usize,
        acceptable: I,
        importance: u64,
    ) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = usize>,
    {
        let count = question.len();
        if choice >= count {
            return Err(ModelError::ChoiceOutOfRange { choice, count });
        }

        let acceptable: BTreeSet<usize> = acceptable.into_iter().collect();
        if let Some(&index) = acceptable.iter().find(|&&i| i >= count) {
            return Err(ModelError::AcceptableOutOfRange { index, count });
        }

        Ok(Self {
            question,
            choice,
            acceptable,
            importance,
        })
    }

    pub fn question(&self) -> &MultiChoiceQuestion {
        &self.question
    }

    /// Index of the option this person picked for themselves.
    pub fn choice(&self) -> usize {
        self.choice
    }

    /// Indices of the options this person would accept from a counterpart.
    pub fn acceptable(&self) -> &BTreeSet<usize> {
        &self.acceptable
    }

    /// Weight of this question when scoring a counterpart.
    pub fn importance(&self) -> u64 {
        self.importance
    }

    /// Whether a counterpart who picked `choice` satisfies this answer.
    pub fn accepts(&self, choice: usize) -> bool {
        self.acceptable.contains(&choice)
    }

    /// Text of the chosen option.
    pub fn chosen_text(&self) -> &str {
        &self.question.selectables[self.choice]
    }
}
