use std::collections::HashSet;

use serde::Serialize;
use ts_rs::TS;
use tranquil_core::store_keys;

use crate::error::FlowError;

/// An ordered sequence of named steps making up one flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct FlowDefinition {
    flow_type: String,
    steps: Vec<String>,
}

impl FlowDefinition {
    /// Steps must be non-empty and unique; the flow type must be a valid
    /// store key segment.
    pub fn new<S: Into<String>>(
        flow_type: impl Into<String>,
        steps: impl IntoIterator<Item = S>,
    ) -> Result<Self, FlowError> {
        let flow_type = flow_type.into();
        let steps: Vec<String> = steps.into_iter().map(Into::into).collect();

        store_keys::validate_flow_type(&flow_type)
            .map_err(|e| FlowError::InvalidDefinition(e.to_string()))?;
        if steps.is_empty() {
            return Err(FlowError::InvalidDefinition(format!(
                "flow '{flow_type}' has no steps"
            )));
        }
        let mut seen = HashSet::new();
        if let Some(duplicate) = steps.iter().find(|step| !seen.insert(step.as_str())) {
            return Err(FlowError::InvalidDefinition(format!(
                "flow '{flow_type}' lists step '{duplicate}' twice"
            )));
        }

        Ok(Self { flow_type, steps })
    }

    /// For built-in definitions whose shape is covered by tests.
    pub(crate) fn from_static(flow_type: &str, steps: &[&str]) -> Self {
        Self {
            flow_type: flow_type.to_string(),
            steps: steps.iter().map(|step| step.to_string()).collect(),
        }
    }

    pub fn flow_type(&self) -> &str {
        &self.flow_type
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn first_step(&self) -> &str {
        &self.steps[0]
    }

    pub fn position(&self, step: &str) -> Option<usize> {
        self.steps.iter().position(|s| s == step)
    }

    pub fn contains(&self, step: &str) -> bool {
        self.position(step).is_some()
    }

    /// The step after `step`, if any.
    pub fn next_step(&self, step: &str) -> Option<&str> {
        let index = self.position(step)?;
        self.steps.get(index + 1).map(String::as_str)
    }

    pub(crate) fn require_step(&self, step: &str) -> Result<usize, FlowError> {
        self.position(step).ok_or_else(|| FlowError::UnknownStep {
            flow_type: self.flow_type.clone(),
            step: step.to_string(),
        })
    }
}
