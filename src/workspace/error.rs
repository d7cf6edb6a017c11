use crate::workspace::projects::ProjectCode;
use uuid::Uuid;

/// Failures surfaced by workspace operations. Messages are shown to the
/// user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkspaceError {
    #[error("please sign in to continue")]
    NotSignedIn,

    #[error("project title can't be empty")]
    EmptyTitle,

    #[error("{0:?} is not a valid project code")]
    InvalidProjectCode(String),

    #[error("no project uses code {0}, please check the code and try again")]
    ProjectNotFound(ProjectCode),

    #[error("no free project code found after {0} attempts")]
    CodeSpaceExhausted(usize),

    #[error("contract template {0} not found")]
    TemplateNotFound(Uuid),

    #[error("the agreement has to be accepted before signing")]
    AgreementNotAccepted,

    #[error("amount must be positive and within the payable limit")]
    InvalidAmount,

    #[error("payment {0} not found")]
    PaymentNotFound(Uuid),

    #[error("request failed: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, WorkspaceError>;
