use std::path::{Path, PathBuf};

use tranquil_core::models::{FlowSession, ScreenData};
use tranquil_core::store_keys;
use tranquil_instruments::result::AssessmentResult;

use crate::error::StorageError;
use crate::store::{AssessmentStore, BoxFuture, SessionStore, sort_by_completion};
use crate::{objects, state};

/// JSON documents under a data directory, laid out per [`store_keys`].
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SessionStore for FileStore {
    fn load_session<'a>(
        &'a self,
        flow_type: &'a str,
    ) -> BoxFuture<'a, Result<Option<FlowSession>, StorageError>> {
        Box::pin(async move {
            let key = store_keys::session(flow_type)?;
            let session = state::load_state_opt::<FlowSession>(&self.root, &key).await?;
            tracing::debug!(flow_type, found = session.is_some(), "session loaded");
            Ok(session)
        })
    }

    fn save_session<'a>(
        &'a self,
        flow_type: &'a str,
        current_screen: &'a str,
        screen_data: &'a ScreenData,
    ) -> BoxFuture<'a, Result<FlowSession, StorageError>> {
        Box::pin(async move {
            let key = store_keys::session(flow_type)?;
            let session = FlowSession {
                flow_type: flow_type.to_string(),
                current_screen: current_screen.to_string(),
                saved_at: jiff::Timestamp::now(),
                screen_data: screen_data.clone(),
            };
            state::save_state(&self.root, &key, &session).await?;
            tracing::debug!(flow_type, current_screen, "session saved");
            Ok(session)
        })
    }

    fn clear_session<'a>(&'a self, flow_type: &'a str) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let key = store_keys::session(flow_type)?;
            objects::delete_object(&self.root, &key).await?;
            tracing::debug!(flow_type, "session cleared");
            Ok(())
        })
    }
}

impl AssessmentStore for FileStore {
    fn save_assessment<'a>(
        &'a self,
        result: &'a AssessmentResult,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let key = store_keys::assessment(result.id());
            state::save_state(&self.root, &key, result).await
        })
    }

    fn get_assessments(&self) -> BoxFuture<'_, Result<Vec<AssessmentResult>, StorageError>> {
        Box::pin(async move {
            let keys = objects::list_objects(&self.root, store_keys::ASSESSMENTS_PREFIX).await?;
            let mut results = Vec::with_capacity(keys.len());
            for key in keys {
                // One unreadable record shouldn't hide the rest of the history.
                match state::load_state::<AssessmentResult>(&self.root, &key).await {
                    Ok(result) => results.push(result),
                    Err(e) => tracing::warn!(key = %key, error = %e, "skipping unreadable assessment"),
                }
            }
            sort_by_completion(&mut results);
            Ok(results)
        })
    }
}
