use super::validation::{required_text, DESCRIPTION_MAX_CHARS};
use super::{record_failure, require_project, Project, StatusMessage, StepError};
use crate::api::{BackgroundRequest, StoryApi};
use crate::events::{EventBus, WorkflowEvent};
use crate::shared::ids::AssetId;

const STEP: &str = "background";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lighting {
    NaturalDaylight,
    WarmIndoor,
    Dramatic,
    BrightAndAiry,
    GoldenHour,
    Studio,
    UrbanNight,
}

pub const ALL_LIGHTING: [Lighting; 7] = [
    Lighting::NaturalDaylight,
    Lighting::WarmIndoor,
    Lighting::Dramatic,
    Lighting::BrightAndAiry,
    Lighting::GoldenHour,
    Lighting::Studio,
    Lighting::UrbanNight,
];

impl Lighting {
    /// Value sent to the API.
    pub fn as_str(self) -> &'static str {
        match self {
            Lighting::NaturalDaylight => "natural daylight",
            Lighting::WarmIndoor => "warm indoor",
            Lighting::Dramatic => "dramatic",
            Lighting::BrightAndAiry => "bright and airy",
            Lighting::GoldenHour => "golden hour",
            Lighting::Studio => "studio lighting",
            Lighting::UrbanNight => "urban night",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Lighting::NaturalDaylight => "Natural Daylight",
            Lighting::WarmIndoor => "Warm Indoor",
            Lighting::Dramatic => "Dramatic",
            Lighting::BrightAndAiry => "Bright & Airy",
            Lighting::GoldenHour => "Golden Hour",
            Lighting::Studio => "Studio Lighting",
            Lighting::UrbanNight => "Urban Night",
        }
    }

    /// Accepts the API value or a snake/kebab-case spelling of it.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let normalized = raw.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        ALL_LIGHTING
            .into_iter()
            .find(|l| l.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "lighting must be one of: {}",
                    ALL_LIGHTING
                        .iter()
                        .map(|l| l.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StylePreference {
    Photorealistic,
    Professional,
    BrandAppropriate,
}

pub const ALL_STYLE_PREFERENCES: [StylePreference; 3] = [
    StylePreference::Photorealistic,
    StylePreference::Professional,
    StylePreference::BrandAppropriate,
];

impl StylePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            StylePreference::Photorealistic => "photorealistic",
            StylePreference::Professional => "professional",
            StylePreference::BrandAppropriate => "brand_appropriate",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StylePreference::Photorealistic => "Photorealistic",
            StylePreference::Professional => "Professional",
            StylePreference::BrandAppropriate => "Brand Appropriate",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        let normalized = raw.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        ALL_STYLE_PREFERENCES
            .into_iter()
            .find(|s| s.as_str() == normalized)
            .ok_or_else(|| format!("unknown style preference `{}`", raw.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundInput {
    pub scene_details: String,
    pub lighting: Option<Lighting>,
    pub styles: Vec<StylePreference>,
}

impl BackgroundInput {
    /// Every style preference starts enabled.
    pub fn new(scene_details: &str, lighting: Option<Lighting>) -> Self {
        Self {
            scene_details: scene_details.to_string(),
            lighting,
            styles: ALL_STYLE_PREFERENCES.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundResult {
    pub id: AssetId,
    pub image_url: String,
    pub scene_details: String,
    pub lighting: Option<Lighting>,
    pub styles: Vec<StylePreference>,
}

impl BackgroundResult {
    pub fn lighting_label(&self) -> &'static str {
        self.lighting.map_or("Not specified", Lighting::label)
    }

    pub fn styles_label(&self) -> String {
        if self.styles.is_empty() {
            return "None".to_string();
        }
        self.styles
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Default)]
pub struct BackgroundStep {
    current: Option<BackgroundResult>,
    status: Option<StatusMessage>,
}

impl BackgroundStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&BackgroundResult> {
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
        input: BackgroundInput,
    ) -> Result<&BackgroundResult, StepError> {
        let scene_details = required_text(
            &input.scene_details,
            "Scene details",
            "Please provide scene details",
            DESCRIPTION_MAX_CHARS,
        )
        .map_err(|err| record_failure(STEP, &mut self.status, err))?;
        let project = require_project(project)
            .map_err(|err| record_failure(STEP, &mut self.status, err))?;

        let request = BackgroundRequest {
            scene_details: scene_details.clone(),
            lighting: input.lighting.map(|l| l.as_str().to_string()),
        };
        let record = api
            .create_background(&project.id, &request)
            .map_err(|err| record_failure(STEP, &mut self.status, err.into()))?;

        let mut styles = input.styles;
        styles.sort();
        styles.dedup();
        let result = BackgroundResult {
            id: record.id,
            image_url: record.image_url,
            scene_details,
            lighting: input.lighting,
            styles,
        };
        tracing::info!(project_id = %project.id, background_id = %result.id, "background generated");
        bus.publish(WorkflowEvent::BackgroundCreated(result.clone()));
        self.status = Some(StatusMessage::success("Background generated successfully!"));
        Ok(&*self.current.insert(result))
    }

    pub fn approve(&mut self, bus: &mut EventBus) -> Result<(), StepError> {
        let Some(result) = self.current.clone() else {
            return Err(record_failure(
                STEP,
                &mut self.status,
                StepError::Sequencing("Generate a background before approving".to_string()),
            ));
        };
        bus.publish(WorkflowEvent::BackgroundApproved(result));
        self.status = Some(StatusMessage::success(
            "Background approved! You can now write your story.",
        ));
        Ok(())
    }

    pub fn discard(&mut self) {
        self.current = None;
        self.status = Some(StatusMessage::info(
            "Background discarded. Adjust the scene and regenerate.",
        ));
    }

    pub fn reset(&mut self) {
        self.current = None;
        self.status = None;
    }
}
