#![allow(dead_code)]

use std::sync::Mutex;

use tranquil_core::models::{FlowSession, ScreenData};
use tranquil_flows::FlowDefinition;
use tranquil_storage::error::StorageError;
use tranquil_storage::memory::MemoryStore;
use tranquil_storage::{BoxFuture, SessionStore};

pub fn screens_flow() -> FlowDefinition {
    FlowDefinition::new("test-flow", ["Screen1", "Screen2", "Screen3", "Completion"]).unwrap()
}

pub fn session(current_screen: &str, screen_data: ScreenData) -> FlowSession {
    FlowSession {
        flow_type: "test-flow".to_string(),
        current_screen: current_screen.to_string(),
        saved_at: jiff::Timestamp::now(),
        screen_data,
    }
}

/// A store call as seen by [`RecordingStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Load(String),
    Save {
        flow_type: String,
        current_screen: String,
        screen_data: ScreenData,
    },
    Clear(String),
}

/// Wraps a [`MemoryStore`], recording every call and optionally failing
/// some of them.
#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    calls: Mutex<Vec<Call>>,
    pub fail_load: bool,
    pub fail_save: bool,
    pub fail_clear: bool,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(load: bool, save: bool, clear: bool) -> Self {
        Self {
            fail_load: load,
            fail_save: save,
            fail_clear: clear,
            ..Self::default()
        }
    }

    pub async fn seed(&self, session: FlowSession) {
        self.inner.insert_session(session).await;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn saves(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Save { .. }))
            .collect()
    }

    pub fn clears(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Clear(_)))
            .count()
    }

    pub async fn stored(&self, flow_type: &str) -> Option<FlowSession> {
        self.inner.load_session(flow_type).await.unwrap()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn unavailable() -> StorageError {
    StorageError::Unavailable("disk is full".to_string())
}

impl SessionStore for RecordingStore {
    fn load_session<'a>(
        &'a self,
        flow_type: &'a str,
    ) -> BoxFuture<'a, Result<Option<FlowSession>, StorageError>> {
        Box::pin(async move {
            self.record(Call::Load(flow_type.to_string()));
            if self.fail_load {
                return Err(unavailable());
            }
            self.inner.load_session(flow_type).await
        })
    }

    fn save_session<'a>(
        &'a self,
        flow_type: &'a str,
        current_screen: &'a str,
        screen_data: &'a ScreenData,
    ) -> BoxFuture<'a, Result<FlowSession, StorageError>> {
        Box::pin(async move {
            self.record(Call::Save {
                flow_type: flow_type.to_string(),
                current_screen: current_screen.to_string(),
                screen_data: screen_data.clone(),
            });
            if self.fail_save {
                return Err(unavailable());
            }
            self.inner
                .save_session(flow_type, current_screen, screen_data)
                .await
        })
    }

    fn clear_session<'a>(&'a self, flow_type: &'a str) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            self.record(Call::Clear(flow_type.to_string()));
            if self.fail_clear {
                return Err(unavailable());
            }
            self.inner.clear_session(flow_type).await
        })
    }
}
