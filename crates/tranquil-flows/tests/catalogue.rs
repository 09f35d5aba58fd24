use tranquil_core::models::QuestionnaireKind;
use tranquil_flows::FlowDefinition;
use tranquil_flows::catalogue::{self, COMPLETION};
use tranquil_flows::error::FlowError;

#[test]
fn every_built_in_flow_passes_definition_checks() {
    for flow in catalogue::all() {
        let rebuilt = FlowDefinition::new(flow.flow_type(), flow.steps().iter().cloned())
            .unwrap_or_else(|e| panic!("{}: {e}", flow.flow_type()));
        assert_eq!(rebuilt, flow);
        assert_eq!(flow.steps().last().map(String::as_str), Some(COMPLETION));
    }
}

#[test]
fn check_ins_are_registered_by_flow_type() {
    for flow_type in ["morning", "midday", "evening", "onboarding", "phq9", "gad7"] {
        assert!(catalogue::by_flow_type(flow_type).is_some(), "{flow_type}");
    }
    assert!(catalogue::by_flow_type("weekly").is_none());
}

#[test]
fn assessment_flows_have_one_step_per_item() {
    let phq9 = catalogue::assessment(QuestionnaireKind::Phq9);
    assert_eq!(phq9.steps().len(), 10);
    assert_eq!(phq9.first_step(), "Item1");
    assert_eq!(phq9.next_step("Item9"), Some(COMPLETION));

    let gad7 = catalogue::assessment(QuestionnaireKind::Gad7);
    assert_eq!(gad7.steps().len(), 8);
}

#[test]
fn step_navigation() {
    let morning = catalogue::morning();
    assert_eq!(morning.first_step(), "Mood");
    assert_eq!(morning.next_step("Mood"), Some("Sleep"));
    assert_eq!(morning.next_step(COMPLETION), None);
    assert_eq!(morning.position("Intentions"), Some(2));
    assert!(!morning.contains("Gratitude"));
}

#[test]
fn empty_duplicate_and_unsafe_definitions_are_rejected() {
    let empty: [&str; 0] = [];
    assert!(matches!(
        FlowDefinition::new("weekly", empty),
        Err(FlowError::InvalidDefinition(_))
    ));
    assert!(matches!(
        FlowDefinition::new("weekly", ["Mood", "Mood"]),
        Err(FlowError::InvalidDefinition(_))
    ));
    assert!(matches!(
        FlowDefinition::new("../weekly", ["Mood"]),
        Err(FlowError::InvalidDefinition(_))
    ));
}
