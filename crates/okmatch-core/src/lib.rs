//! okmatch-core: Answer model, answers-file codec, and match scoring.
//!
//! This crate defines the validated question/answer data model, the
//! per-person answer collection with its lossless JSON representation, and
//! the bidirectional match score between two collections.

pub mod collection;
pub mod error;
pub mod model;
pub mod records;
pub mod scoring;

pub use collection::AnswerCollection;
pub use error::{AnswersError, ModelError};
pub use model::{AnsweredQuestion, MultiChoiceQuestion};
pub use records::{load_answers, save_answers, AnswerRecord, SelectableRecord};
pub use scoring::{compare, score, MatchBreakdown, SharedOutcome};
