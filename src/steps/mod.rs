use crate::api::ApiError;

pub mod background;
pub mod character;
pub mod product;
pub mod project;
pub mod status;
pub mod story;
pub mod validation;

pub use background::{BackgroundInput, BackgroundResult, BackgroundStep, Lighting, StylePreference};
pub use character::{CharacterInput, CharacterResult, CharacterStep, Personality};
pub use product::{ProductInput, ProductResult, ProductSource, ProductStep};
pub use project::{Project, ProjectStep};
pub use status::{StatusKind, StatusMessage};
pub use story::{StoryBundle, StoryPrerequisites, StoryResult, StoryStep};

pub const MISSING_PROJECT_MESSAGE: &str = "Please create a project first";

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("{0}")]
    Validation(String),
    #[error("Error: {0}")]
    Api(#[from] ApiError),
    #[error("{0}")]
    Sequencing(String),
    #[error("Please complete the following first: {}", .0.join(", "))]
    MissingPrerequisites(Vec<&'static str>),
}

impl StepError {
    pub fn is_validation(&self) -> bool {
        matches!(self, StepError::Validation(_))
    }
}

/// Logs a failed step operation and mirrors it into the step's inline status.
pub(crate) fn record_failure(
    step: &'static str,
    status: &mut Option<StatusMessage>,
    err: StepError,
) -> StepError {
    match &err {
        StepError::Validation(reason) => tracing::debug!(step, %reason, "input rejected"),
        StepError::Api(source) => tracing::error!(step, error = %source, "submission failed"),
        StepError::Sequencing(_) | StepError::MissingPrerequisites(_) => {
            tracing::info!(step, reason = %err, "operation refused")
        }
    }
    *status = Some(StatusMessage::error(err.to_string()));
    err
}

pub(crate) fn require_project(project: Option<&Project>) -> Result<&Project, StepError> {
    project.ok_or_else(|| StepError::Sequencing(MISSING_PROJECT_MESSAGE.to_string()))
}
