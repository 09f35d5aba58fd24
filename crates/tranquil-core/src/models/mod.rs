pub mod assessment;
pub mod flow_session;

pub use assessment::{AssessmentContext, QuestionnaireKind, Severity};
pub use flow_session::{FlowSession, ScreenData};
