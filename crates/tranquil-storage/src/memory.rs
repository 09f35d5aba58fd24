use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tranquil_core::models::{FlowSession, ScreenData};
use tranquil_core::store_keys;
use tranquil_instruments::result::AssessmentResult;

use crate::error::StorageError;
use crate::store::{AssessmentStore, BoxFuture, SessionStore, sort_by_completion};

/// In-process store. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    sessions: Arc<Mutex<HashMap<String, FlowSession>>>,
    assessments: Arc<Mutex<Vec<AssessmentResult>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a session as if it had been saved earlier.
    pub async fn insert_session(&self, session: FlowSession) {
        self.sessions
            .lock()
            .await
            .insert(session.flow_type.clone(), session);
    }
}

impl SessionStore for MemoryStore {
    fn load_session<'a>(
        &'a self,
        flow_type: &'a str,
    ) -> BoxFuture<'a, Result<Option<FlowSession>, StorageError>> {
        Box::pin(async move {
            store_keys::validate_flow_type(flow_type)?;
            Ok(self.sessions.lock().await.get(flow_type).cloned())
        })
    }

    fn save_session<'a>(
        &'a self,
        flow_type: &'a str,
        current_screen: &'a str,
        screen_data: &'a ScreenData,
    ) -> BoxFuture<'a, Result<FlowSession, StorageError>> {
        Box::pin(async move {
            store_keys::validate_flow_type(flow_type)?;
            let session = FlowSession {
                flow_type: flow_type.to_string(),
                current_screen: current_screen.to_string(),
                saved_at: jiff::Timestamp::now(),
                screen_data: screen_data.clone(),
            };
            self.sessions
                .lock()
                .await
                .insert(flow_type.to_string(), session.clone());
            Ok(session)
        })
    }

    fn clear_session<'a>(&'a self, flow_type: &'a str) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            self.sessions.lock().await.remove(flow_type);
            Ok(())
        })
    }
}

impl AssessmentStore for MemoryStore {
    fn save_assessment<'a>(
        &'a self,
        result: &'a AssessmentResult,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let mut assessments = self.assessments.lock().await;
            assessments.retain(|existing| existing.id() != result.id());
            assessments.push(result.clone());
            Ok(())
        })
    }

    fn get_assessments(&self) -> BoxFuture<'_, Result<Vec<AssessmentResult>, StorageError>> {
        Box::pin(async move {
            let mut results = self.assessments.lock().await.clone();
            sort_by_completion(&mut results);
            Ok(results)
        })
    }
}
