//! Key/path conventions for the local store.
//!
//! Pure string functions. These define the canonical layout of records
//! under the app's data directory.

use uuid::Uuid;

use crate::error::CoreError;

pub const SESSIONS_PREFIX: &str = "sessions/";

pub const ASSESSMENTS_PREFIX: &str = "assessments/";

pub fn session(flow_type: &str) -> Result<String, CoreError> {
    validate_flow_type(flow_type)?;
    Ok(format!("{SESSIONS_PREFIX}{flow_type}.json"))
}

pub fn assessment(id: Uuid) -> String {
    format!("{ASSESSMENTS_PREFIX}{id}.json")
}

/// Flow types become file names, so keep them to a safe alphabet.
pub fn validate_flow_type(flow_type: &str) -> Result<(), CoreError> {
    let valid = !flow_type.is_empty()
        && flow_type
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(CoreError::InvalidFlowType(flow_type.to_string()))
    }
}
