use tranquil_core::models::{QuestionnaireKind, Severity};

use crate::Questionnaire;
use crate::scoring::SeverityBand;

/// PHQ-9: Patient Health Questionnaire, nine-item depression screen.
/// Total 0–27. Item 9 asks about thoughts of self-harm.
pub struct Phq9;

const ITEMS: [&str; 9] = [
    "Little interest or pleasure in doing things",
    "Feeling down, depressed, or hopeless",
    "Trouble falling or staying asleep, or sleeping too much",
    "Feeling tired or having little energy",
    "Poor appetite or overeating",
    "Feeling bad about yourself, or that you are a failure or have let yourself or your family down",
    "Trouble concentrating on things, such as reading the newspaper or watching television",
    "Moving or speaking so slowly that other people could have noticed, or the opposite, being so fidgety or restless that you have been moving around a lot more than usual",
    "Thoughts that you would be better off dead, or of hurting yourself in some way",
];

const BANDS: [SeverityBand; 5] = [
    SeverityBand::new(4, Severity::Minimal),
    SeverityBand::new(9, Severity::Mild),
    SeverityBand::new(14, Severity::Moderate),
    SeverityBand::new(19, Severity::ModeratelySevere),
    SeverityBand::new(27, Severity::Severe),
];

impl Questionnaire for Phq9 {
    fn kind(&self) -> QuestionnaireKind {
        QuestionnaireKind::Phq9
    }

    fn name(&self) -> &str {
        "PHQ-9"
    }

    fn prompt(&self) -> &str {
        "Over the last 2 weeks, how often have you been bothered by any of the following problems?"
    }

    fn items(&self) -> &[&'static str] {
        &ITEMS
    }

    fn severity_bands(&self) -> &[SeverityBand] {
        &BANDS
    }

    fn crisis_item(&self) -> Option<usize> {
        Some(8)
    }
}
