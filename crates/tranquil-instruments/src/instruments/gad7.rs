use tranquil_core::models::{QuestionnaireKind, Severity};

use crate::Questionnaire;
use crate::scoring::SeverityBand;

/// GAD-7: Generalized Anxiety Disorder seven-item scale. Total 0–21.
pub struct Gad7;

const ITEMS: [&str; 7] = [
    "Feeling nervous, anxious, or on edge",
    "Not being able to stop or control worrying",
    "Worrying too much about different things",
    "Trouble relaxing",
    "Being so restless that it is hard to sit still",
    "Becoming easily annoyed or irritable",
    "Feeling afraid, as if something awful might happen",
];

const BANDS: [SeverityBand; 4] = [
    SeverityBand::new(4, Severity::Minimal),
    SeverityBand::new(9, Severity::Mild),
    SeverityBand::new(14, Severity::Moderate),
    SeverityBand::new(21, Severity::Severe),
];

impl Questionnaire for Gad7 {
    fn kind(&self) -> QuestionnaireKind {
        QuestionnaireKind::Gad7
    }

    fn name(&self) -> &str {
        "GAD-7"
    }

    fn prompt(&self) -> &str {
        "Over the last 2 weeks, how often have you been bothered by the following problems?"
    }

    fn items(&self) -> &[&'static str] {
        &ITEMS
    }

    fn severity_bands(&self) -> &[SeverityBand] {
        &BANDS
    }
}
