use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// The screening questionnaires the app can administer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum QuestionnaireKind {
    /// Patient Health Questionnaire, 9 items (depression).
    Phq9,
    /// Generalized Anxiety Disorder scale, 7 items.
    Gad7,
}

impl QuestionnaireKind {
    pub const ALL: [QuestionnaireKind; 2] = [QuestionnaireKind::Phq9, QuestionnaireKind::Gad7];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Phq9 => "phq9",
            Self::Gad7 => "gad7",
        }
    }
}

impl fmt::Display for QuestionnaireKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionnaireKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "phq9" => Ok(Self::Phq9),
            "gad7" => Ok(Self::Gad7),
            other => Err(CoreError::UnknownQuestionnaire(other.to_string())),
        }
    }
}

/// Clinical severity band a questionnaire score falls into.
///
/// Ordered from least to most severe, so `Severity::Mild < Severity::Severe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Severity {
    Minimal,
    Mild,
    Moderate,
    /// PHQ-9 only.
    ModeratelySevere,
    Severe,
}

impl Severity {
    /// Human-readable label shown next to a result.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Minimal => "Minimal",
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::ModeratelySevere => "Moderately severe",
            Self::Severe => "Severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where in the app a questionnaire was completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AssessmentContext {
    Onboarding,
    Standalone,
    Clinical,
}
