use std::fmt;

use thiserror::Error;
use tranquil_instruments::error::ScoringError;
use tranquil_storage::error::StorageError;

use crate::resumption::FlowState;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("step '{step}' is not part of the '{flow_type}' flow")]
    UnknownStep { flow_type: String, step: String },

    #[error("cannot {operation} while the flow is {state}")]
    InvalidState {
        operation: &'static str,
        state: FlowState,
    },

    #[error("invalid flow definition: {0}")]
    InvalidDefinition(String),
}

/// Which store call a [`SessionPersistenceError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOperation {
    Load,
    Save,
    Clear,
}

impl fmt::Display for SessionOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Load => "load",
            Self::Save => "save",
            Self::Clear => "clear",
        })
    }
}

/// A store call for a flow session failed. Never fatal to the flow.
#[derive(Debug, Error)]
#[error("failed to {operation} session for flow '{flow_type}': {source}")]
pub struct SessionPersistenceError {
    pub operation: SessionOperation,
    pub flow_type: String,
    #[source]
    pub source: StorageError,
}

#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("scoring failed: {0}")]
    Scoring(#[from] ScoringError),

    #[error("failed to save assessment: {0}")]
    Storage(#[from] StorageError),
}
