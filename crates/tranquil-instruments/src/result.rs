use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use tranquil_core::models::{AssessmentContext, QuestionnaireKind, Severity};

use crate::error::{ResultError, ScoringError};
use crate::questionnaire;
use crate::scoring::{calculate_score, severity_level};

/// A completed questionnaire.
///
/// Only constructed from a full, validated answer set, so `score` always
/// equals the sum of `answers` and `severity` always matches `score`.
/// Deserialization re-checks both.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct AssessmentResult {
    id: Uuid,
    kind: QuestionnaireKind,
    completed_at: jiff::Timestamp,
    answers: Vec<u8>,
    score: u32,
    severity: Severity,
    context: AssessmentContext,
}

impl AssessmentResult {
    pub fn new(
        kind: QuestionnaireKind,
        answers: Vec<u8>,
        context: AssessmentContext,
        completed_at: jiff::Timestamp,
    ) -> Result<Self, ScoringError> {
        let score = calculate_score(kind, &answers)?;
        let severity = severity_level(kind, i64::from(score))?;
        Ok(Self {
            id: Uuid::new_v4(),
            kind,
            completed_at,
            answers,
            score,
            severity,
            context,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> QuestionnaireKind {
        self.kind
    }

    pub fn completed_at(&self) -> jiff::Timestamp {
        self.completed_at
    }

    pub fn answers(&self) -> &[u8] {
        &self.answers
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn context(&self) -> AssessmentContext {
        self.context
    }

    /// True when the questionnaire's self-harm item was answered above zero.
    /// Independent of the total score.
    pub fn needs_crisis_follow_up(&self) -> bool {
        questionnaire(self.kind)
            .crisis_item()
            .and_then(|index| self.answers.get(index))
            .is_some_and(|&answer| answer > 0)
    }
}

/// Score and stamp a finished questionnaire.
pub fn score_assessment(
    kind: QuestionnaireKind,
    answers: Vec<u8>,
    context: AssessmentContext,
) -> Result<AssessmentResult, ScoringError> {
    AssessmentResult::new(kind, answers, context, jiff::Timestamp::now())
}

#[derive(Deserialize)]
struct StoredAssessmentResult {
    id: Uuid,
    kind: QuestionnaireKind,
    completed_at: jiff::Timestamp,
    answers: Vec<u8>,
    score: u32,
    severity: Severity,
    context: AssessmentContext,
}

impl TryFrom<StoredAssessmentResult> for AssessmentResult {
    type Error = ResultError;

    fn try_from(stored: StoredAssessmentResult) -> Result<Self, Self::Error> {
        let computed = calculate_score(stored.kind, &stored.answers)?;
        if computed != stored.score {
            return Err(ResultError::ScoreMismatch {
                stored: stored.score,
                computed,
            });
        }
        let severity = severity_level(stored.kind, i64::from(computed))?;
        if severity != stored.severity {
            return Err(ResultError::SeverityMismatch {
                stored: stored.severity,
                computed: severity,
                score: computed,
            });
        }
        Ok(Self {
            id: stored.id,
            kind: stored.kind,
            completed_at: stored.completed_at,
            answers: stored.answers,
            score: computed,
            severity,
            context: stored.context,
        })
    }
}

impl<'de> Deserialize<'de> for AssessmentResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let stored = StoredAssessmentResult::deserialize(deserializer)?;
        Self::try_from(stored).map_err(serde::de::Error::custom)
    }
}
