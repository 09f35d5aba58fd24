use std::sync::Arc;

use serde_json::json;
use tranquil_core::models::{AssessmentContext, QuestionnaireKind, ScreenData, Severity};
use tranquil_flows::assessment::{
    AssessmentHistory, answers_from_screen_data, complete_assessment,
};
use tranquil_flows::catalogue::{self, item_step};
use tranquil_flows::error::AssessmentError;
use tranquil_flows::{FlowSessionResumption, FlowState};
use tranquil_instruments::error::{AnswerProblem, ScoringError};
use tranquil_storage::AssessmentStore;
use tranquil_storage::file::FileStore;
use tranquil_storage::memory::MemoryStore;

#[tokio::test]
async fn completed_assessment_is_scored_and_stored() {
    let store = MemoryStore::new();

    let result = complete_assessment(
        &store,
        QuestionnaireKind::Gad7,
        vec![2, 2, 2, 2, 2, 2, 3],
        AssessmentContext::Standalone,
    )
    .await
    .unwrap();

    assert_eq!(result.score(), 15);
    assert_eq!(result.severity(), Severity::Severe);
    let latest = store
        .get_latest_assessment(QuestionnaireKind::Gad7)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest, result);
}

#[tokio::test]
async fn invalid_answers_block_completion_and_store_nothing() {
    let store = MemoryStore::new();

    let err = complete_assessment(
        &store,
        QuestionnaireKind::Phq9,
        vec![1; 8],
        AssessmentContext::Onboarding,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AssessmentError::Scoring(ScoringError::InvalidAnswer { .. })));
    assert!(store.get_assessments().await.unwrap().is_empty());
}

#[test]
fn answers_are_read_from_item_steps() {
    let data: ScreenData = (1..=7)
        .map(|n| (item_step(n), json!({ "answer": n % 4 })))
        .collect();

    let answers = answers_from_screen_data(QuestionnaireKind::Gad7, &data).unwrap();
    assert_eq!(answers, vec![1, 2, 3, 0, 1, 2, 3]);
}

#[test]
fn unanswered_items_fail_the_length_check() {
    let data: ScreenData = (1..=8)
        .map(|n| (item_step(n), json!({ "answer": 1 })))
        .collect();

    let err = answers_from_screen_data(QuestionnaireKind::Phq9, &data).unwrap_err();
    assert_eq!(
        err,
        ScoringError::InvalidAnswer {
            kind: QuestionnaireKind::Phq9,
            problem: AnswerProblem::WrongLength {
                expected: 9,
                actual: 8
            },
        }
    );
}

#[tokio::test]
async fn history_reports_latest_and_change() {
    let store = MemoryStore::new();
    for (day, answer) in [("01", 3u8), ("08", 2), ("15", 1)] {
        let result = tranquil_instruments::result::AssessmentResult::new(
            QuestionnaireKind::Gad7,
            vec![answer; 7],
            AssessmentContext::Standalone,
            format!("2026-03-{day}T09:00:00Z").parse().unwrap(),
        )
        .unwrap();
        store.save_assessment(&result).await.unwrap();
    }

    let history = AssessmentHistory::load(&store, QuestionnaireKind::Gad7)
        .await
        .unwrap();

    assert_eq!(history.results().len(), 3);
    assert_eq!(history.latest().unwrap().score(), 7);
    assert_eq!(history.score_change(), Some(-7));

    let empty = AssessmentHistory::load(&store, QuestionnaireKind::Phq9)
        .await
        .unwrap();
    assert!(empty.latest().is_none());
    assert_eq!(empty.score_change(), None);
}

/// Walk a GAD-7 flow end to end against the file store, interrupting it
/// halfway and resuming from a new controller.
#[tokio::test]
async fn interrupted_questionnaire_resumes_and_completes() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path()));
    let flow = catalogue::assessment(QuestionnaireKind::Gad7);

    let mut first = FlowSessionResumption::new(flow.clone(), store.clone());
    first.initialize().await.unwrap();
    for n in 1..=3 {
        let next = item_step(n + 1);
        let status = first
            .update_screen_data(&item_step(n), json!({ "answer": 2 }), &next)
            .await
            .unwrap();
        assert!(status.is_saved());
    }
    drop(first);

    let mut second = FlowSessionResumption::new(flow.clone(), store.clone());
    assert_eq!(second.initialize().await.unwrap(), FlowState::ResumeOffered);
    second.handle_resume().unwrap();
    assert_eq!(second.current_screen(), "Item4");

    for n in 4..=7 {
        let next = flow.next_step(&item_step(n)).unwrap().to_string();
        let _ = second
            .update_screen_data(&item_step(n), json!({ "answer": 1 }), &next)
            .await
            .unwrap();
    }
    assert_eq!(second.current_screen(), catalogue::COMPLETION);

    let answers = answers_from_screen_data(QuestionnaireKind::Gad7, second.screen_data()).unwrap();
    let result = complete_assessment(
        &*store,
        QuestionnaireKind::Gad7,
        answers,
        AssessmentContext::Standalone,
    )
    .await
    .unwrap();
    let _ = second.complete().await.unwrap();

    assert_eq!(result.score(), 10);
    assert_eq!(result.severity(), Severity::Moderate);
    let mut third = FlowSessionResumption::new(flow, store.clone());
    assert_eq!(third.initialize().await.unwrap(), FlowState::NoSession);
}
