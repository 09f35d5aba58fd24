use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use tranquil_core::models::{QuestionnaireKind, Severity};

use crate::error::{AnswerProblem, ScoringError};
use crate::{Questionnaire, questionnaire};

/// Highest value a single answer may take.
pub const MAX_RESPONSE: u8 = 3;

/// One legal answer value and the label shown for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResponseOption {
    pub value: u8,
    pub label: &'static str,
}

/// Shared by every supported questionnaire.
pub const RESPONSE_OPTIONS: [ResponseOption; 4] = [
    ResponseOption {
        value: 0,
        label: "Not at all",
    },
    ResponseOption {
        value: 1,
        label: "Several days",
    },
    ResponseOption {
        value: 2,
        label: "More than half the days",
    },
    ResponseOption {
        value: 3,
        label: "Nearly every day",
    },
];

/// A closed score range `(previous upper bound, upper_bound]` mapped to a
/// severity. Bands are listed in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SeverityBand {
    /// Inclusive.
    pub upper_bound: u32,
    pub severity: Severity,
}

impl SeverityBand {
    pub const fn new(upper_bound: u32, severity: Severity) -> Self {
        Self {
            upper_bound,
            severity,
        }
    }
}

/// Sum a complete answer set.
///
/// Fails if the number of answers differs from the questionnaire's item
/// count or any answer is above [`MAX_RESPONSE`].
pub fn calculate_score(kind: QuestionnaireKind, answers: &[u8]) -> Result<u32, ScoringError> {
    let questionnaire = questionnaire(kind);
    check_answers(questionnaire, answers)?;
    Ok(answers.iter().map(|&answer| u32::from(answer)).sum())
}

/// Map a total score to its severity band.
pub fn severity_level(kind: QuestionnaireKind, score: i64) -> Result<Severity, ScoringError> {
    let questionnaire = questionnaire(kind);
    let max = questionnaire.max_score();
    let in_range = u32::try_from(score).ok().filter(|&s| s <= max);
    let Some(score) = in_range else {
        return Err(ScoringError::InvalidScore { kind, score, max });
    };

    let bands = questionnaire.severity_bands();
    let severity = bands
        .iter()
        .find(|band| score <= band.upper_bound)
        .or(bands.last())
        .map(|band| band.severity)
        .unwrap_or(Severity::Minimal);
    Ok(severity)
}

/// Convert loosely-typed answers (as posted by a form) into validated values.
///
/// Rejects anything that is not a whole number in `0..=3`, and answer sets
/// of the wrong length. Whole floats such as `2.0` count as whole numbers.
pub fn parse_answers(kind: QuestionnaireKind, values: &[Value]) -> Result<Vec<u8>, ScoringError> {
    let questionnaire = questionnaire(kind);
    check_length(questionnaire, values.len())?;

    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let Some(number) = whole_number(value) else {
                return Err(ScoringError::InvalidAnswer {
                    kind,
                    problem: AnswerProblem::NotAnInteger {
                        index,
                        value: value.to_string(),
                    },
                });
            };
            u8::try_from(number)
                .ok()
                .filter(|&answer| answer <= MAX_RESPONSE)
                .ok_or(ScoringError::InvalidAnswer {
                    kind,
                    problem: AnswerProblem::OutOfRange {
                        index,
                        value: number,
                    },
                })
        })
        .collect()
}

/// Integral JSON numbers as `i64`; `u64` beyond range saturates.
fn whole_number(value: &Value) -> Option<i64> {
    if let Some(number) = value.as_i64() {
        return Some(number);
    }
    if let Some(big) = value.as_u64() {
        return Some(i64::try_from(big).unwrap_or(i64::MAX));
    }
    value
        .as_f64()
        .filter(|float| float.fract() == 0.0)
        .map(|float| float as i64)
}

pub(crate) fn check_answers(
    questionnaire: &dyn Questionnaire,
    answers: &[u8],
) -> Result<(), ScoringError> {
    check_length(questionnaire, answers.len())?;
    if let Some((index, &value)) = answers
        .iter()
        .enumerate()
        .find(|(_, answer)| **answer > MAX_RESPONSE)
    {
        return Err(ScoringError::InvalidAnswer {
            kind: questionnaire.kind(),
            problem: AnswerProblem::OutOfRange {
                index,
                value: i64::from(value),
            },
        });
    }
    Ok(())
}

fn check_length(questionnaire: &dyn Questionnaire, actual: usize) -> Result<(), ScoringError> {
    let expected = questionnaire.question_count();
    if actual != expected {
        return Err(ScoringError::InvalidAnswer {
            kind: questionnaire.kind(),
            problem: AnswerProblem::WrongLength { expected, actual },
        });
    }
    Ok(())
}

/// Describe every way a band table fails to cover `[0, max_score]`
/// contiguously. Empty when the table is sound.
pub fn band_table_problems(questionnaire: &dyn Questionnaire) -> Vec<String> {
    let bands = questionnaire.severity_bands();
    let mut problems = Vec::new();

    if bands.is_empty() {
        problems.push(format!("{}: no severity bands", questionnaire.name()));
        return problems;
    }

    for pair in bands.windows(2) {
        if pair[1].upper_bound <= pair[0].upper_bound {
            problems.push(format!(
                "{}: band {:?} (≤{}) does not extend past {:?} (≤{})",
                questionnaire.name(),
                pair[1].severity,
                pair[1].upper_bound,
                pair[0].severity,
                pair[0].upper_bound,
            ));
        }
    }

    let max = questionnaire.max_score();
    let last = bands[bands.len() - 1].upper_bound;
    if last < max {
        problems.push(format!(
            "{}: bands stop at {last} but scores reach {max}",
            questionnaire.name()
        ));
    }
    problems
}
