use super::validation::validate_story_text;
use super::{
    record_failure, require_project, BackgroundResult, CharacterResult, ProductResult, Project,
    StatusMessage, StepError,
};
use crate::api::{StoryApi, StoryRequest};
use crate::events::{EventBus, WorkflowEvent};
use crate::shared::ids::AssetId;

const STEP: &str = "story";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryResult {
    pub id: AssetId,
    pub text: String,
    /// Character count of `text`.
    pub length: usize,
}

/// Everything image generation needs, handed over on story approval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryBundle {
    pub story: StoryResult,
    pub project: Project,
    pub character: CharacterResult,
    pub product: ProductResult,
    pub background: BackgroundResult,
}

/// Borrowed view of the upstream results story approval depends on.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoryPrerequisites<'a> {
    pub project: Option<&'a Project>,
    pub character: Option<&'a CharacterResult>,
    pub product: Option<&'a ProductResult>,
    pub background: Option<&'a BackgroundResult>,
}

impl StoryPrerequisites<'_> {
    /// Names of the missing pieces, in workflow order.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.project.is_none() {
            missing.push("Project");
        }
        if self.character.is_none() {
            missing.push("Character");
        }
        if self.product.is_none() {
            missing.push("Product");
        }
        if self.background.is_none() {
            missing.push("Background");
        }
        missing
    }
}

#[derive(Debug, Default)]
pub struct StoryStep {
    current: Option<StoryResult>,
    status: Option<StatusMessage>,
}

impl StoryStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&StoryResult> {
        self.current.as_ref()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn submit(
        &mut self,
        api: &dyn StoryApi,
        project: Option<&Project>,
        bus: &mut EventBus,
        text: &str,
    ) -> Result<&StoryResult, StepError> {
        let text =
            validate_story_text(text).map_err(|err| record_failure(STEP, &mut self.status, err))?;
        let project = require_project(project)
            .map_err(|err| record_failure(STEP, &mut self.status, err))?;

        let record = api
            .create_story(
                &project.id,
                &StoryRequest {
                    story_text: text.clone(),
                },
            )
            .map_err(|err| record_failure(STEP, &mut self.status, err.into()))?;

        let result = StoryResult {
            id: record.id,
            length: text.chars().count(),
            text,
        };
        tracing::info!(project_id = %project.id, story_id = %result.id, length = result.length, "story saved");
        bus.publish(WorkflowEvent::StoryCreated(result.clone()));
        self.status = Some(StatusMessage::success("Story saved successfully!"));
        Ok(&*self.current.insert(result))
    }

    /// Hands the story and its prerequisites to image generation. Missing
    /// prerequisites are reported before a missing story.
    pub fn approve(
        &mut self,
        prerequisites: &StoryPrerequisites<'_>,
        bus: &mut EventBus,
    ) -> Result<(), StepError> {
        let (Some(project), Some(character), Some(product), Some(background)) = (
            prerequisites.project,
            prerequisites.character,
            prerequisites.product,
            prerequisites.background,
        ) else {
            return Err(record_failure(
                STEP,
                &mut self.status,
                StepError::MissingPrerequisites(prerequisites.missing()),
            ));
        };
        let Some(story) = self.current.clone() else {
            return Err(record_failure(
                STEP,
                &mut self.status,
                StepError::Sequencing("Save your story before approving".to_string()),
            ));
        };

        bus.publish(WorkflowEvent::StoryApproved(Box::new(StoryBundle {
            story,
            project: project.clone(),
            character: character.clone(),
            product: product.clone(),
            background: background.clone(),
        })));
        self.status = Some(StatusMessage::success(
            "Story approved! Ready to generate final images.",
        ));
        Ok(())
    }

    /// Drops the saved story so the text can be edited and resubmitted.
    pub fn clear(&mut self) {
        self.current = None;
        self.status = Some(StatusMessage::info("Story cleared."));
    }

    pub fn reset(&mut self) {
        self.current = None;
        self.status = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_prerequisites_follow_workflow_order() {
        let prerequisites = StoryPrerequisites::default();
        assert_eq!(
            prerequisites.missing(),
            vec!["Project", "Character", "Product", "Background"]
        );
    }

    #[test]
    fn approve_without_prerequisites_lists_them_and_publishes_nothing() {
        let mut step = StoryStep::new();
        let mut bus = EventBus::new();
        let err = step
            .approve(&StoryPrerequisites::default(), &mut bus)
            .expect_err("refused");
        assert_eq!(
            err.to_string(),
            "Please complete the following first: Project, Character, Product, Background"
        );
        assert!(bus.is_empty());
        assert!(step.status().is_some_and(StatusMessage::is_error));
    }
}
