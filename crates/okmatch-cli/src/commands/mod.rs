pub mod answer;
pub mod matching;
pub mod validate;
