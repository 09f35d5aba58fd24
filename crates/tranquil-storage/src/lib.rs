//! tranquil-storage
//!
//! The local key-value store behind flow sessions and assessment history.
//! [`store`] defines the async contract; [`file::FileStore`] keeps JSON
//! documents under a data directory and [`memory::MemoryStore`] keeps them
//! in process.

pub mod error;
pub mod file;
pub mod memory;
pub mod objects;
pub mod state;
pub mod store;

pub use store::{AssessmentStore, BoxFuture, SessionStore};
