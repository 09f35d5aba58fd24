use serde_json::json;
use tranquil_core::models::{AssessmentContext, QuestionnaireKind, Severity};
use tranquil_instruments::result::{AssessmentResult, score_assessment};

#[test]
fn scored_result_carries_sum_and_band() {
    let result = score_assessment(
        QuestionnaireKind::Phq9,
        vec![1, 1, 1, 1, 1, 1, 1, 1, 1],
        AssessmentContext::Onboarding,
    )
    .unwrap();

    assert_eq!(result.score(), 9);
    assert_eq!(result.severity(), Severity::Mild);
    assert_eq!(result.context(), AssessmentContext::Onboarding);
    assert_eq!(result.answers().len(), 9);
}

#[test]
fn incomplete_answers_never_produce_a_result() {
    let result = score_assessment(
        QuestionnaireKind::Gad7,
        vec![1, 1, 1],
        AssessmentContext::Standalone,
    );
    assert!(result.is_err());
}

#[test]
fn each_result_gets_a_fresh_id() {
    let a = score_assessment(QuestionnaireKind::Gad7, vec![0; 7], AssessmentContext::Standalone)
        .unwrap();
    let b = score_assessment(QuestionnaireKind::Gad7, vec![0; 7], AssessmentContext::Standalone)
        .unwrap();
    assert_ne!(a.id(), b.id());
}

#[test]
fn phq9_item_nine_triggers_crisis_follow_up() {
    let low_total = score_assessment(
        QuestionnaireKind::Phq9,
        vec![0, 0, 0, 0, 0, 0, 0, 0, 1],
        AssessmentContext::Standalone,
    )
    .unwrap();
    assert_eq!(low_total.severity(), Severity::Minimal);
    assert!(low_total.needs_crisis_follow_up());

    let no_item_nine = score_assessment(
        QuestionnaireKind::Phq9,
        vec![3, 3, 3, 3, 3, 3, 3, 3, 0],
        AssessmentContext::Standalone,
    )
    .unwrap();
    assert!(!no_item_nine.needs_crisis_follow_up());

    let gad7 = score_assessment(QuestionnaireKind::Gad7, vec![3; 7], AssessmentContext::Clinical)
        .unwrap();
    assert!(!gad7.needs_crisis_follow_up());
}

#[test]
fn result_survives_a_json_round_trip() {
    let result = score_assessment(
        QuestionnaireKind::Gad7,
        vec![2, 2, 2, 2, 2, 2, 3],
        AssessmentContext::Clinical,
    )
    .unwrap();

    let stored = serde_json::to_string(&result).unwrap();
    let loaded: AssessmentResult = serde_json::from_str(&stored).unwrap();
    assert_eq!(loaded, result);
}

fn stored(score: u32, severity: &str) -> serde_json::Value {
    json!({
        "id": "6f1c1a52-8f7e-4c59-9d1f-0d7b7e6a9b11",
        "kind": "gad7",
        "completed_at": "2026-03-01T20:00:00Z",
        "answers": [1, 1, 1, 1, 1, 0, 0],
        "score": score,
        "severity": severity,
        "context": "standalone",
    })
}

#[test]
fn stored_result_with_inconsistent_score_is_rejected() {
    assert!(serde_json::from_value::<AssessmentResult>(stored(5, "mild")).is_ok());

    let err = serde_json::from_value::<AssessmentResult>(stored(6, "mild")).unwrap_err();
    assert!(err.to_string().contains("does not match answers"), "{err}");
}

#[test]
fn stored_result_with_inconsistent_severity_is_rejected() {
    let err = serde_json::from_value::<AssessmentResult>(stored(5, "severe")).unwrap_err();
    assert!(err.to_string().contains("stored severity"), "{err}");
}
