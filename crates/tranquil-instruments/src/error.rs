use thiserror::Error;
use tranquil_core::models::{QuestionnaireKind, Severity};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("invalid answers for {kind}: {problem}")]
    InvalidAnswer {
        kind: QuestionnaireKind,
        problem: AnswerProblem,
    },

    #[error("invalid score {score} for {kind}: expected 0..={max}")]
    InvalidScore {
        kind: QuestionnaireKind,
        score: i64,
        max: u32,
    },
}

/// What exactly was wrong with a rejected answer set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerProblem {
    #[error("expected {expected} answers, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("answer {index} is {value}, expected 0..=3")]
    OutOfRange { index: usize, value: i64 },

    #[error("answer {index} is not a whole number: {value}")]
    NotAnInteger { index: usize, value: String },
}

/// A stored result that does not agree with its own answers.
#[derive(Debug, Error)]
pub enum ResultError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error("stored score {stored} does not match answers (sum {computed})")]
    ScoreMismatch { stored: u32, computed: u32 },

    #[error("stored severity {stored:?} does not match score {score} ({computed:?})")]
    SeverityMismatch {
        stored: Severity,
        computed: Severity,
        score: u32,
    },
}
