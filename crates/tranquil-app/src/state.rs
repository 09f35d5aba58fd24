use std::sync::Arc;

use serde::Serialize;
use tranquil_core::models::{QuestionnaireKind, Severity};
use tranquil_flows::{FlowSessionResumption, catalogue};
use tranquil_storage::file::FileStore;
use tranquil_storage::{AssessmentStore, SessionStore};

use crate::config::TranquilConfig;

/// Everything a host needs to drive flows, built once at startup.
pub struct AppState {
    pub config: TranquilConfig,
    pub store: Arc<FileStore>,
}

impl AppState {
    pub fn open(config: TranquilConfig) -> eyre::Result<Self> {
        let data_dir = config.resolved_data_dir()?;
        tracing::debug!(data_dir = %data_dir.display(), "opening store");
        Ok(Self {
            config,
            store: Arc::new(FileStore::new(data_dir)),
        })
    }

    /// A fresh controller for a built-in flow. Call `initialize` before use.
    pub fn flow(&self, flow_type: &str) -> eyre::Result<FlowSessionResumption> {
        let definition = catalogue::by_flow_type(flow_type)
            .ok_or_else(|| eyre::eyre!("unknown flow: {flow_type}"))?;
        Ok(FlowSessionResumption::new(definition, self.store.clone()))
    }

    /// Pending sessions and the latest result of each questionnaire.
    pub async fn status_report(&self) -> eyre::Result<StatusReport> {
        let mut pending = Vec::new();
        for flow in catalogue::all() {
            match self.store.load_session(flow.flow_type()).await {
                // Same rule as resumption: only progress past the first step
                // of a step the flow still has.
                Ok(Some(session))
                    if flow
                        .position(&session.current_screen)
                        .is_some_and(|index| index > 0) =>
                {
                    pending.push(PendingFlow {
                        flow_type: session.flow_type,
                        current_screen: session.current_screen,
                        saved_at: session.saved_at,
                    })
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(flow_type = %flow.flow_type(), error = %e, "unreadable session")
                }
            }
        }

        let mut latest = Vec::new();
        for kind in QuestionnaireKind::ALL {
            if let Some(result) = self.store.get_latest_assessment(kind).await? {
                latest.push(LatestAssessment {
                    kind,
                    score: result.score(),
                    severity: result.severity(),
                    completed_at: result.completed_at(),
                    needs_crisis_follow_up: result.needs_crisis_follow_up(),
                });
            }
        }

        Ok(StatusReport { pending, latest })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub pending: Vec<PendingFlow>,
    pub latest: Vec<LatestAssessment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PendingFlow {
    pub flow_type: String,
    pub current_screen: String,
    pub saved_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct LatestAssessment {
    pub kind: QuestionnaireKind,
    pub score: u32,
    pub severity: Severity,
    pub completed_at: jiff::Timestamp,
    pub needs_crisis_follow_up: bool,
}
