use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown questionnaire: {0}")]
    UnknownQuestionnaire(String),

    #[error("invalid flow type '{0}': expected lowercase letters, digits, '-' or '_'")]
    InvalidFlowType(String),
}
