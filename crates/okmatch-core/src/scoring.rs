//! Match percentage between two answer collections.
//!
//! For every question both people answered, each side earns its own
//! importance in points when the other side's choice is one it accepts.
//! Each side's points over its maximum gives a satisfaction fraction; the
//! two fractions are combined by geometric mean and discounted by an error
//! margin of `1 / shared_questions`, floored at zero.
//!
//! Swapping the two collections swaps the sides of the [`MatchBreakdown`]
//! and leaves the score unchanged.

use serde::Serialize;

use crate::collection::AnswerCollection;

/// How one shared question played out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedOutcome {
    /// The question's prompt.
    pub prompt: String,
    /// A's importance for this question.
    pub a_importance: u64,
    /// B's importance for this question.
    pub b_importance: u64,
    /// Whether B's choice is in A's acceptable set.
    pub a_accepts_b: bool,
    /// Whether A's choice is in B's acceptable set.
    pub b_accepts_a: bool,
}

/// The intermediate sums behind a match score.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchBreakdown {
    /// Number of questions answered by both sides.
    pub shared_questions: usize,
    /// Importance A earned from B's choices.
    pub a_points: u128,
    /// Importance A assigned across shared questions.
    pub a_max: u128,
    /// Importance B earned from A's choices.
    pub b_points: u128,
    /// Importance B assigned across shared questions.
    pub b_max: u128,
    /// Per-question detail, in A's collection order.
    pub shared: Vec<SharedOutcome>,
}

impl MatchBreakdown {
    /// How well B satisfies A, in `[0, 1]`. Zero when A weighted nothing.
    pub fn fraction_a(&self) -> f64 {
        fraction(self.a_points, self.a_max)
    }

    /// How well A satisfies B, in `[0, 1]`. Zero when B weighted nothing.
    pub fn fraction_b(&self) -> f64 {
        fraction(self.b_points, self.b_max)
    }

    /// Small-sample discount: `1 / shared_questions`, or `1` with none shared.
    pub fn error_margin(&self) -> f64 {
        if self.shared_questions > 0 {
            1.0 / self.shared_questions as f64
        } else {
            1.0
        }
    }

    /// The match score, always in `[0, 1]`.
    pub fn score(&self) -> f64 {
        let raw = (self.fraction_a() * self.fraction_b()).sqrt() - self.error_margin();
        raw.max(0.0)
    }

    /// The same breakdown seen from B's side.
    pub fn swapped(&self) -> Self {
        Self {
            shared_questions: self.shared_questions,
            a_points: self.b_points,
            a_max: self.b_max,
            b_points: self.a_points,
            b_max: self.a_max,
            shared: self
                .shared
                .iter()
                .map(|s| SharedOutcome {
                    prompt: s.prompt.clone(),
                    a_importance: s.b_importance,
                    b_importance: s.a_importance,
                    a_accepts_b: s.b_accepts_a,
                    b_accepts_a: s.a_accepts_b,
                })
                .collect(),
        }
    }
}

fn fraction(points: u128, max: u128) -> f64 {
    if max > 0 {
        points as f64 / max as f64
    } else {
        0.0
    }
}

/// Accumulate the score inputs for collections `a` and `b`.
pub fn compare(a: &AnswerCollection, b: &AnswerCollection) -> MatchBreakdown {
    let mut breakdown = MatchBreakdown::default();

    for answer_a in a {
        let Some(answer_b) = b.get(answer_a.question()) else {
            continue;
        };

        let a_accepts_b = answer_a.accepts(answer_b.choice());
        let b_accepts_a = answer_b.accepts(answer_a.choice());

        breakdown.shared_questions += 1;
        breakdown.a_max += u128::from(answer_a.importance());
        breakdown.b_max += u128::from(answer_b.importance());
        if a_accepts_b {
            breakdown.a_points += u128::from(answer_a.importance());
        }
        if b_accepts_a {
            breakdown.b_points += u128::from(answer_b.importance());
        }

        tracing::trace!(
            prompt = answer_a.question().prompt(),
            a_accepts_b,
            b_accepts_a,
            "shared question"
        );
        breakdown.shared.push(SharedOutcome {
            prompt: answer_a.question().prompt().to_string(),
            a_importance: answer_a.importance(),
            b_importance: answer_b.importance(),
            a_accepts_b,
            b_accepts_a,
        });
    }

    tracing::debug!(
        shared = breakdown.shared_questions,
        a_points = breakdown.a_points,
        a_max = breakdown.a_max,
        b_points = breakdown.b_points,
        b_max = breakdown.b_max,
        "computed match breakdown"
    );
    breakdown
}

/// The match score between `a` and `b`, in `[0, 1]`. Symmetric.
pub fn score(a: &AnswerCollection, b: &AnswerCollection) -> f64 {
    compare(a, b).score()
}
