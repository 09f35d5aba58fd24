//! Built-in flows.

use tranquil_core::models::QuestionnaireKind;
use tranquil_instruments::questionnaire;

use crate::definition::FlowDefinition;

pub const COMPLETION: &str = "Completion";

pub fn morning() -> FlowDefinition {
    FlowDefinition::from_static("morning", &["Mood", "Sleep", "Intentions", COMPLETION])
}

pub fn midday() -> FlowDefinition {
    FlowDefinition::from_static("midday", &["Mood", "Energy", "Reflection", COMPLETION])
}

pub fn evening() -> FlowDefinition {
    FlowDefinition::from_static("evening", &["Mood", "Highlights", "Gratitude", COMPLETION])
}

/// First-run flow: both screens, then the crisis plan.
pub fn onboarding() -> FlowDefinition {
    FlowDefinition::from_static(
        "onboarding",
        &["Welcome", "Phq9", "Gad7", "SafetyPlan", COMPLETION],
    )
}

/// One step per questionnaire item (`Item1`, `Item2`, …) then completion.
pub fn assessment(kind: QuestionnaireKind) -> FlowDefinition {
    let mut steps: Vec<String> = (1..=questionnaire(kind).question_count())
        .map(item_step)
        .collect();
    steps.push(COMPLETION.to_string());
    let steps: Vec<&str> = steps.iter().map(String::as_str).collect();
    FlowDefinition::from_static(kind.as_str(), &steps)
}

/// Step name for the 1-based questionnaire item `number`.
pub fn item_step(number: usize) -> String {
    format!("Item{number}")
}

pub fn all() -> Vec<FlowDefinition> {
    let mut flows = vec![morning(), midday(), evening(), onboarding()];
    flows.extend(QuestionnaireKind::ALL.into_iter().map(assessment));
    flows
}

pub fn by_flow_type(flow_type: &str) -> Option<FlowDefinition> {
    all().into_iter().find(|flow| flow.flow_type() == flow_type)
}
