//! tranquil-flows
//!
//! Multi-step flows: the built-in flow catalogue, resumable flow sessions,
//! and completion of screening questionnaires.

pub mod assessment;
pub mod catalogue;
pub mod definition;
pub mod error;
pub mod resumption;

pub use definition::FlowDefinition;
pub use resumption::{FlowSessionResumption, FlowState, SaveStatus};
