use std::future::Future;
use std::pin::Pin;

use tranquil_core::models::{FlowSession, QuestionnaireKind, ScreenData};
use tranquil_instruments::result::AssessmentResult;

use crate::error::StorageError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Persistence for in-progress flows. One session per flow type.
pub trait SessionStore: Send + Sync {
    /// None = no session saved for this flow.
    fn load_session<'a>(
        &'a self,
        flow_type: &'a str,
    ) -> BoxFuture<'a, Result<Option<FlowSession>, StorageError>>;

    /// Overwrite the session for `flow_type`, stamping `saved_at`.
    /// Returns the session as written.
    fn save_session<'a>(
        &'a self,
        flow_type: &'a str,
        current_screen: &'a str,
        screen_data: &'a ScreenData,
    ) -> BoxFuture<'a, Result<FlowSession, StorageError>>;

    /// Remove the session for `flow_type`. Clearing a missing session succeeds.
    fn clear_session<'a>(&'a self, flow_type: &'a str) -> BoxFuture<'a, Result<(), StorageError>>;
}

/// Persistence for completed questionnaires.
pub trait AssessmentStore: Send + Sync {
    fn save_assessment<'a>(
        &'a self,
        result: &'a AssessmentResult,
    ) -> BoxFuture<'a, Result<(), StorageError>>;

    /// Every stored result, oldest first.
    fn get_assessments(&self) -> BoxFuture<'_, Result<Vec<AssessmentResult>, StorageError>>;

    /// Stored results of one questionnaire, oldest first.
    fn get_assessments_by_type(
        &self,
        kind: QuestionnaireKind,
    ) -> BoxFuture<'_, Result<Vec<AssessmentResult>, StorageError>> {
        Box::pin(async move {
            let mut results = self.get_assessments().await?;
            results.retain(|result| result.kind() == kind);
            Ok(results)
        })
    }

    /// Most recently completed result of one questionnaire.
    fn get_latest_assessment(
        &self,
        kind: QuestionnaireKind,
    ) -> BoxFuture<'_, Result<Option<AssessmentResult>, StorageError>> {
        Box::pin(async move {
            let results = self.get_assessments_by_type(kind).await?;
            Ok(results.into_iter().max_by_key(|result| result.completed_at()))
        })
    }
}

pub(crate) fn sort_by_completion(results: &mut [AssessmentResult]) {
    results.sort_by_key(|result| result.completed_at());
}
