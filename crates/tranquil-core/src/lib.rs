//! tranquil-core
//!
//! Shared vocabulary of the Tranquil wellness core: questionnaire and
//! severity identifiers, persisted flow sessions, and store key conventions.
//! No I/O lives here.

pub mod error;
pub mod models;
pub mod store_keys;
