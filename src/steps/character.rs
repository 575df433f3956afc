use super::validation::{required_text, DESCRIPTION_MAX_CHARS};
use super::{record_failure, require_project, Project, StatusMessage, StepError};
use crate::api::{CharacterRequest, StoryApi};
use crate::events::{EventBus, WorkflowEvent};
use crate::shared::ids::AssetId;

const STEP: &str = "character";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Personality {
    Professional,
    Approachable,
    Confident,
    Innovative,
    Trustworthy,
    Youthful,
    Sophisticated,
}

pub const ALL_PERSONALITIES: [Personality; 7] = [
    Personality::Professional,
    Personality::Approachable,
    Personality::Confident,
    Personality::Innovative,
    Personality::Trustworthy,
    Personality::Youthful,
    Personality::Sophisticated,
];

impl Personality {
    pub fn as_str(self) -> &'static str {
        match self {
            Personality::Professional => "professional",
            Personality::Approachable => "approachable",
            Personality::Confident => "confident",
            Personality::Innovative => "innovative",
            Personality::Trustworthy => "trustworthy",
            Personality::Youthful => "youthful",
            Personality::Sophisticated => "sophisticated",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Personality::Professional => "Professional & Corporate",
            Personality::Approachable => "Warm & Approachable",
            Personality::Confident => "Confident & Authoritative",
            Personality::Innovative => "Innovative & Creative",
            Personality::Trustworthy => "Trustworthy & Reliable",
            Personality::Youthful => "Youthful & Energetic",
            Personality::Sophisticated => "Sophisticated & Elegant",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        let normalized = raw.trim().to_ascii_lowercase();
        ALL_PERSONALITIES
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "personality must be one of: {}",
                    ALL_PERSONALITIES
                        .iter()
                        .map(|p| p.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

impl std::fmt::Display for Personality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterInput {
    pub details: String,
    pub personality: Option<Personality>,
}

impl CharacterInput {
    pub fn new(details: &str, personality: Option<Personality>) -> Self {
        Self {
            details: details.to_string(),
            personality,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterResult {
    pub id: AssetId,
    pub image_url: String,
    pub details: String,
    pub personality: Option<Personality>,
}

impl CharacterResult {
    pub fn personality_label(&self) -> &'static str {
        self.personality.map_or("Not specified", Personality::label)
    }
}

#[derive(Debug, Default)]
pub struct CharacterStep {
    current: Option<CharacterResult>,
    status: Option<StatusMessage>,
}

impl CharacterStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&CharacterResult> {
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
        input: CharacterInput,
    ) -> Result<&CharacterResult, StepError> {
        let details = required_text(
            &input.details,
            "Character details",
            "Please provide character details",
            DESCRIPTION_MAX_CHARS,
        )
        .map_err(|err| record_failure(STEP, &mut self.status, err))?;
        let project = require_project(project)
            .map_err(|err| record_failure(STEP, &mut self.status, err))?;

        let request = CharacterRequest {
            details: details.clone(),
            personality: input.personality.map(|p| p.as_str().to_string()),
        };
        let record = api
            .create_character(&project.id, &request)
            .map_err(|err| record_failure(STEP, &mut self.status, err.into()))?;

        let result = CharacterResult {
            id: record.id,
            image_url: record.image_url,
            details,
            personality: input.personality,
        };
        tracing::info!(project_id = %project.id, character_id = %result.id, "character generated");
        bus.publish(WorkflowEvent::CharacterCreated(result.clone()));
        self.status = Some(StatusMessage::success("Character generated successfully!"));
        Ok(&*self.current.insert(result))
    }

    pub fn approve(&mut self, bus: &mut EventBus) -> Result<(), StepError> {
        let Some(result) = self.current.clone() else {
            return Err(record_failure(
                STEP,
                &mut self.status,
                StepError::Sequencing("Generate a character before approving".to_string()),
            ));
        };
        bus.publish(WorkflowEvent::CharacterApproved(result));
        self.status = Some(StatusMessage::success(
            "Character approved! You can now add your product.",
        ));
        Ok(())
    }

    /// Drops the generated character so it can be regenerated from the same
    /// input.
    pub fn discard(&mut self) {
        self.current = None;
        self.status = Some(StatusMessage::info(
            "Character discarded. Adjust the details and regenerate.",
        ));
    }

    pub fn reset(&mut self) {
        self.current = None;
        self.status = None;
    }
}
