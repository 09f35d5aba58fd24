use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// Persisted progress through one multi-step flow (e.g. the morning check-in).
///
/// Written on every step transition and read back once when the flow mounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FlowSession {
    pub flow_type: String,
    /// The step the user was on when the session was last saved.
    pub current_screen: String,
    pub saved_at: jiff::Timestamp,
    #[serde(default)]
    pub screen_data: ScreenData,
}

/// Partial form data collected per step, keyed by step name.
///
/// Payloads are opaque JSON; callers deserialize them into their own types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScreenData(BTreeMap<String, Value>);

impl ScreenData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, step: &str) -> Option<&Value> {
        self.0.get(step)
    }

    pub fn contains_step(&self, step: &str) -> bool {
        self.0.contains_key(step)
    }

    /// Merge `partial` into the entry for `step`.
    ///
    /// Two JSON objects merge key by key with `partial` winning; any other
    /// combination replaces the stored value.
    pub fn merge(&mut self, step: &str, partial: Value) {
        let slot = self.0.entry(step.to_string()).or_insert(Value::Null);
        match (slot, partial) {
            (Value::Object(existing), Value::Object(incoming)) => existing.extend(incoming),
            (slot, partial) => *slot = partial,
        }
    }

    /// Drop every step for which `keep` returns false.
    pub fn retain_steps(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.0.retain(|step, _| keep(step));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for ScreenData {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
