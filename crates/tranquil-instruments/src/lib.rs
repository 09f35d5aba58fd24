//! tranquil-instruments
//!
//! Screening questionnaire definitions and scoring. Pure data and pure
//! functions: no storage, no async. Defines the items, response domain and
//! severity bands of each supported questionnaire, and builds validated
//! [`result::AssessmentResult`] records.

pub mod error;
pub mod instruments;
pub mod result;
pub mod scoring;

use tranquil_core::models::QuestionnaireKind;

use scoring::{MAX_RESPONSE, SeverityBand};

/// Trait implemented by each screening questionnaire.
pub trait Questionnaire: Send + Sync {
    fn kind(&self) -> QuestionnaireKind;

    /// Human-readable name (e.g., "PHQ-9").
    fn name(&self) -> &str;

    /// Stem shown above the items.
    fn prompt(&self) -> &str;

    /// Item texts, in administration order.
    fn items(&self) -> &[&'static str];

    /// Ascending, contiguous bands covering `0..=max_score()`.
    fn severity_bands(&self) -> &[SeverityBand];

    /// Index of an item where any non-zero answer calls for the crisis plan.
    fn crisis_item(&self) -> Option<usize> {
        None
    }

    fn question_count(&self) -> usize {
        self.items().len()
    }

    fn max_score(&self) -> u32 {
        self.question_count() as u32 * u32::from(MAX_RESPONSE)
    }

    /// Format answers as plain text, one item per line, for sharing with a
    /// clinician.
    fn to_structured_summary(&self, answers: &[u8]) -> String {
        let mut output = format!("## {}\n\n{}\n\n", self.name(), self.prompt());
        for (index, item) in self.items().iter().enumerate() {
            let label = answers
                .get(index)
                .and_then(|&value| scoring::RESPONSE_OPTIONS.get(usize::from(value)))
                .map(|option| option.label)
                .unwrap_or("Unanswered");
            output.push_str(&format!("{}. {item}: {label}\n", index + 1));
        }
        output
    }
}

/// Look up the definition for a questionnaire kind.
pub fn questionnaire(kind: QuestionnaireKind) -> &'static dyn Questionnaire {
    match kind {
        QuestionnaireKind::Phq9 => &instruments::phq9::Phq9,
        QuestionnaireKind::Gad7 => &instruments::gad7::Gad7,
    }
}

/// Return all registered questionnaires.
pub fn all_questionnaires() -> Vec<&'static dyn Questionnaire> {
    QuestionnaireKind::ALL.into_iter().map(questionnaire).collect()
}

/// Check every built-in band table; returns a description of each problem.
pub fn validate_definitions() -> Vec<String> {
    all_questionnaires()
        .into_iter()
        .flat_map(scoring::band_table_problems)
        .collect()
}
