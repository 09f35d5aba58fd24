use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use ts_rs::TS;
use tranquil_core::models::{FlowSession, ScreenData};
use tranquil_storage::SessionStore;
use tranquil_storage::error::StorageError;

use crate::definition::FlowDefinition;
use crate::error::{FlowError, SessionOperation, SessionPersistenceError};

/// Lifecycle of one flow instance.
///
/// `Checking` → `NoSession` | `ResumeOffered` → `Active` → `Completed` | `Discarded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FlowState {
    /// Waiting for the stored session to load.
    Checking,
    /// Nothing worth resuming; the flow starts at its first step.
    NoSession,
    /// A session beyond the first step exists; the caller should ask the
    /// user whether to resume or restart.
    ResumeOffered,
    Active,
    Completed,
    Discarded,
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Checking => "checking for a saved session",
            Self::NoSession => "without a saved session",
            Self::ResumeOffered => "offering to resume",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Discarded => "discarded",
        })
    }
}

/// Outcome of a store write made on the caller's behalf.
///
/// `Unsaved` is a warning: in-memory progress is kept, only resumability
/// after a restart is lost.
#[must_use]
#[derive(Debug)]
pub enum SaveStatus {
    Saved,
    Unsaved(SessionPersistenceError),
}

impl SaveStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }

    pub fn warning(&self) -> Option<&SessionPersistenceError> {
        match self {
            Self::Saved => None,
            Self::Unsaved(e) => Some(e),
        }
    }
}

/// Tracks progress through one flow and keeps it resumable across restarts.
///
/// Construct per flow instance, call [`initialize`](Self::initialize) on
/// mount, [`update_screen_data`](Self::update_screen_data) after each step,
/// and [`complete`](Self::complete) or [`discard`](Self::discard) at the end.
pub struct FlowSessionResumption {
    flow: FlowDefinition,
    store: Arc<dyn SessionStore>,
    state: FlowState,
    current_screen: String,
    screen_data: ScreenData,
    resumable_session: Option<FlowSession>,
}

impl FlowSessionResumption {
    pub fn new(flow: FlowDefinition, store: Arc<dyn SessionStore>) -> Self {
        let current_screen = flow.first_step().to_string();
        Self {
            flow,
            store,
            state: FlowState::Checking,
            current_screen,
            screen_data: ScreenData::new(),
            resumable_session: None,
        }
    }

    /// Load any stored session and decide between a fresh start and a
    /// resume offer.
    ///
    /// Load failures are logged and treated as no session, so the user can
    /// always start over.
    pub async fn initialize(&mut self) -> Result<FlowState, FlowError> {
        self.expect_state("initialize", &[FlowState::Checking])?;
        let flow_type = self.flow.flow_type().to_string();

        let session = match self.store.load_session(&flow_type).await {
            Ok(session) => session,
            Err(source) => {
                let error = self.persistence_error(SessionOperation::Load, source);
                tracing::warn!(error = %error, "could not load session, starting fresh");
                None
            }
        };

        let Some(session) = session else {
            tracing::debug!(flow_type = %flow_type, "no saved session");
            self.state = FlowState::NoSession;
            return Ok(self.state);
        };

        match self.flow.position(&session.current_screen) {
            Some(index) if index > 0 => {
                tracing::info!(
                    flow_type = %flow_type,
                    current_screen = %session.current_screen,
                    "offering to resume saved session"
                );
                self.resumable_session = Some(session);
                self.state = FlowState::ResumeOffered;
            }
            position => {
                // First-step leftovers carry nothing worth resuming; a step
                // the flow no longer has can't be resumed at all.
                tracing::info!(
                    flow_type = %flow_type,
                    current_screen = %session.current_screen,
                    known_step = position.is_some(),
                    "clearing non-resumable session"
                );
                if let SaveStatus::Unsaved(error) = self.clear_stored().await {
                    tracing::warn!(error = %error, "could not clear non-resumable session");
                }
                self.state = FlowState::NoSession;
            }
        }
        Ok(self.state)
    }

    /// Drop any stored progress and restart at the first step.
    pub async fn handle_begin_fresh(&mut self) -> Result<SaveStatus, FlowError> {
        self.expect_state(
            "begin fresh",
            &[FlowState::ResumeOffered, FlowState::NoSession, FlowState::Active],
        )?;

        let status = self.clear_stored().await;
        self.resumable_session = None;
        self.screen_data = ScreenData::new();
        self.current_screen = self.flow.first_step().to_string();
        self.state = FlowState::Active;
        tracing::info!(flow_type = %self.flow.flow_type(), "starting flow fresh");
        Ok(status)
    }

    /// Adopt the offered session's step and data.
    pub fn handle_resume(&mut self) -> Result<(), FlowError> {
        self.expect_state("resume", &[FlowState::ResumeOffered])?;
        let Some(session) = self.resumable_session.take() else {
            return Err(FlowError::InvalidState {
                operation: "resume",
                state: self.state,
            });
        };

        let current = self.flow.require_step(&session.current_screen)?;
        let mut screen_data = session.screen_data;
        self.prune_after(&mut screen_data, current);

        self.current_screen = session.current_screen;
        self.screen_data = screen_data;
        self.state = FlowState::Active;
        tracing::info!(
            flow_type = %self.flow.flow_type(),
            current_screen = %self.current_screen,
            "resumed saved session"
        );
        Ok(())
    }

    /// Record `partial` for `step`, move to `next`, and persist.
    ///
    /// Objects merge into what the step already holds. Moving back to an
    /// earlier step drops data for the steps after it. The write completes
    /// before this returns; a failed write comes back as
    /// [`SaveStatus::Unsaved`] with the in-memory update kept.
    pub async fn update_screen_data(
        &mut self,
        step: &str,
        partial: Value,
        next: &str,
    ) -> Result<SaveStatus, FlowError> {
        self.expect_state("update screen data", &[FlowState::NoSession, FlowState::Active])?;
        self.flow.require_step(step)?;
        let next_index = self.flow.require_step(next)?;

        let mut screen_data = std::mem::take(&mut self.screen_data);
        screen_data.merge(step, partial);
        self.prune_after(&mut screen_data, next_index);
        self.screen_data = screen_data;
        self.current_screen = next.to_string();
        self.state = FlowState::Active;

        let flow_type = self.flow.flow_type();
        match self
            .store
            .save_session(flow_type, &self.current_screen, &self.screen_data)
            .await
        {
            Ok(_) => {
                tracing::debug!(flow_type, step, next, "flow progress saved");
                Ok(SaveStatus::Saved)
            }
            Err(source) => {
                let error = self.persistence_error(SessionOperation::Save, source);
                tracing::warn!(error = %error, "flow progress not saved");
                Ok(SaveStatus::Unsaved(error))
            }
        }
    }

    /// The flow finished: forget the stored session.
    pub async fn complete(&mut self) -> Result<SaveStatus, FlowError> {
        self.finish("complete", FlowState::Completed).await
    }

    /// The user abandoned the flow: forget the stored session.
    pub async fn discard(&mut self) -> Result<SaveStatus, FlowError> {
        self.finish("discard", FlowState::Discarded).await
    }

    pub fn flow(&self) -> &FlowDefinition {
        &self.flow
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn is_checking_session(&self) -> bool {
        self.state == FlowState::Checking
    }

    pub fn show_resume_modal(&self) -> bool {
        self.state == FlowState::ResumeOffered
    }

    pub fn resumable_session(&self) -> Option<&FlowSession> {
        self.resumable_session.as_ref()
    }

    pub fn current_screen(&self) -> &str {
        &self.current_screen
    }

    pub fn screen_data(&self) -> &ScreenData {
        &self.screen_data
    }

    /// Deserialize the data recorded for `step`. `Ok(None)` if nothing was
    /// recorded.
    pub fn screen_data_as<T: DeserializeOwned>(
        &self,
        step: &str,
    ) -> Result<Option<T>, serde_json::Error> {
        self.screen_data
            .get(step)
            .map(|value| T::deserialize(value))
            .transpose()
    }

    async fn finish(
        &mut self,
        operation: &'static str,
        terminal: FlowState,
    ) -> Result<SaveStatus, FlowError> {
        self.expect_state(
            operation,
            &[FlowState::NoSession, FlowState::ResumeOffered, FlowState::Active],
        )?;
        let status = self.clear_stored().await;
        self.resumable_session = None;
        self.state = terminal;
        tracing::info!(flow_type = %self.flow.flow_type(), state = %terminal, "flow ended");
        Ok(status)
    }

    async fn clear_stored(&self) -> SaveStatus {
        match self.store.clear_session(self.flow.flow_type()).await {
            Ok(()) => SaveStatus::Saved,
            Err(source) => {
                let error = self.persistence_error(SessionOperation::Clear, source);
                tracing::warn!(error = %error, "stored session not cleared");
                SaveStatus::Unsaved(error)
            }
        }
    }

    /// Keep only steps at or before `index` in the flow.
    fn prune_after(&self, screen_data: &mut ScreenData, index: usize) {
        screen_data.retain_steps(|step| self.flow.position(step).is_some_and(|pos| pos <= index));
    }

    fn expect_state(
        &self,
        operation: &'static str,
        allowed: &[FlowState],
    ) -> Result<(), FlowError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(FlowError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }

    fn persistence_error(
        &self,
        operation: SessionOperation,
        source: StorageError,
    ) -> SessionPersistenceError {
        SessionPersistenceError {
            operation,
            flow_type: self.flow.flow_type().to_string(),
            source,
        }
    }
}
