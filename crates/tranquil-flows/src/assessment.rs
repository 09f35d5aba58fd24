use serde_json::Value;
use tranquil_core::models::{AssessmentContext, QuestionnaireKind, ScreenData};
use tranquil_instruments::error::{AnswerProblem, ScoringError};
use tranquil_instruments::result::{AssessmentResult, score_assessment};
use tranquil_instruments::scoring::parse_answers;
use tranquil_instruments::questionnaire;
use tranquil_storage::AssessmentStore;
use tranquil_storage::error::StorageError;

use crate::catalogue::item_step;
use crate::error::AssessmentError;

/// Key holding the chosen value in each item step's screen data.
pub const ANSWER_FIELD: &str = "answer";

/// Score a finished questionnaire and persist the result.
///
/// Scoring errors block completion and nothing is stored.
pub async fn complete_assessment(
    store: &dyn AssessmentStore,
    kind: QuestionnaireKind,
    answers: Vec<u8>,
    context: AssessmentContext,
) -> Result<AssessmentResult, AssessmentError> {
    let result = score_assessment(kind, answers, context)?;
    store.save_assessment(&result).await?;

    tracing::info!(
        assessment.id = %result.id(),
        assessment.kind = %kind,
        assessment.score = result.score(),
        assessment.severity = ?result.severity(),
        crisis_follow_up = result.needs_crisis_follow_up(),
        "assessment completed"
    );
    Ok(result)
}

/// Collect answers recorded by an assessment flow (`Item1` … `ItemN`, each
/// holding `{"answer": n}`).
///
/// Unanswered items count as missing, so an incomplete flow fails the
/// length check.
pub fn answers_from_screen_data(
    kind: QuestionnaireKind,
    screen_data: &ScreenData,
) -> Result<Vec<u8>, ScoringError> {
    let expected = questionnaire(kind).question_count();
    let values: Vec<Value> = (1..=expected)
        .filter_map(|number| {
            screen_data
                .get(&item_step(number))
                .and_then(|data| data.get(ANSWER_FIELD))
                .cloned()
        })
        .collect();

    if values.len() != expected {
        return Err(ScoringError::InvalidAnswer {
            kind,
            problem: AnswerProblem::WrongLength {
                expected,
                actual: values.len(),
            },
        });
    }
    parse_answers(kind, &values)
}

/// Stored results of one questionnaire, oldest first.
#[derive(Debug, Clone)]
pub struct AssessmentHistory {
    kind: QuestionnaireKind,
    results: Vec<AssessmentResult>,
}

impl AssessmentHistory {
    pub async fn load(
        store: &dyn AssessmentStore,
        kind: QuestionnaireKind,
    ) -> Result<Self, StorageError> {
        let results = store.get_assessments_by_type(kind).await?;
        Ok(Self { kind, results })
    }

    pub fn kind(&self) -> QuestionnaireKind {
        self.kind
    }

    pub fn results(&self) -> &[AssessmentResult] {
        &self.results
    }

    pub fn latest(&self) -> Option<&AssessmentResult> {
        self.results.last()
    }

    /// Latest score minus the one before it. Negative means improvement.
    pub fn score_change(&self) -> Option<i64> {
        match self.results.as_slice() {
            [.., previous, latest] => Some(i64::from(latest.score()) - i64::from(previous.score())),
            _ => None,
        }
    }
}
