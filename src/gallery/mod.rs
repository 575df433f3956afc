use crate::api::GeneratedImage;
use crate::events::{EventBus, WorkflowEvent};
use crate::steps::{StatusMessage, StepError};
use serde::Serialize;
use std::collections::BTreeSet;

const STEP: &str = "gallery";
const PROMPT_EXCERPT_CHARS: usize = 100;
const DEFAULT_FUSION_STYLE: &str = "Custom";

pub const EMPTY_SAVE_MESSAGE: &str = "Please select at least one image to save.";
pub const EMPTY_FINISH_MESSAGE: &str = "Please select at least one image before finishing.";

/// Terminal summary recorded when the user finishes the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionSummary {
    pub selected: Vec<GeneratedImage>,
    pub selected_images: usize,
    pub total_images: usize,
}

impl CompletionSummary {
    pub fn headline(&self) -> String {
        format!(
            "You've successfully created {} brand storytelling images.",
            self.selected_images
        )
    }
}

/// Detail view of one generated image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImagePreview {
    pub index: usize,
    pub image_url: String,
    pub fusion_style: String,
    pub prompt: String,
    pub prompt_excerpt: String,
    pub selected: bool,
}

fn prompt_excerpt(prompt: &str) -> String {
    if prompt.chars().count() <= PROMPT_EXCERPT_CHARS {
        return prompt.to_string();
    }
    let head: String = prompt.chars().take(PROMPT_EXCERPT_CHARS).collect();
    format!("{head}...")
}

#[derive(Debug, Default)]
pub struct Gallery {
    images: Vec<GeneratedImage>,
    selected: BTreeSet<usize>,
    status: Option<StatusMessage>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[GeneratedImage] {
        &self.images
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Replaces the batch and clears the selection.
    pub fn display_images(&mut self, images: Vec<GeneratedImage>) {
        tracing::info!(count = images.len(), "gallery batch displayed");
        self.images = images;
        self.selected.clear();
        self.status = None;
    }

    /// Flips membership of `index` and returns whether it is now selected.
    pub fn toggle_selection(&mut self, index: usize) -> Result<bool, StepError> {
        if index >= self.images.len() {
            return Err(StepError::Validation(format!(
                "image index {index} is out of range (batch has {} images)",
                self.images.len()
            )));
        }
        if self.selected.remove(&index) {
            Ok(false)
        } else {
            self.selected.insert(index);
            Ok(true)
        }
    }

    pub fn select_all(&mut self) {
        self.selected = (0..self.images.len()).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn selected_indices(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }

    /// Selected images in batch order.
    pub fn selected_images(&self) -> Vec<GeneratedImage> {
        self.selected
            .iter()
            .filter_map(|index| self.images.get(*index).cloned())
            .collect()
    }

    /// `(selected, total)`.
    pub fn selection_counts(&self) -> (usize, usize) {
        (self.selected.len(), self.images.len())
    }

    pub fn save_selected(&mut self, bus: &mut EventBus) -> Result<(), StepError> {
        if self.selected.is_empty() {
            return Err(self.refuse(EMPTY_SAVE_MESSAGE));
        }
        let images = self.selected_images();
        tracing::info!(count = images.len(), "images saved");
        self.status = Some(StatusMessage::success(format!(
            "Saved {} image(s).",
            images.len()
        )));
        bus.publish(WorkflowEvent::ImagesSaved(images));
        Ok(())
    }

    pub fn finish_project(&mut self, bus: &mut EventBus) -> Result<(), StepError> {
        if self.selected.is_empty() {
            return Err(self.refuse(EMPTY_FINISH_MESSAGE));
        }
        let (selected_images, total_images) = self.selection_counts();
        bus.publish(WorkflowEvent::ProjectCompleted(CompletionSummary {
            selected: self.selected_images(),
            selected_images,
            total_images,
        }));
        Ok(())
    }

    /// Requests another batch. The current batch stays on display until the
    /// new one arrives.
    pub fn generate_more(&mut self, bus: &mut EventBus) {
        self.status = Some(StatusMessage::info(
            "Generating additional image variations...",
        ));
        bus.publish(WorkflowEvent::GenerateMoreRequested);
    }

    pub fn preview<F>(&self, index: usize, resolve_url: F) -> Option<ImagePreview>
    where
        F: Fn(&str) -> String,
    {
        let image = self.images.get(index)?;
        Some(ImagePreview {
            index,
            image_url: resolve_url(&image.image_url),
            fusion_style: image
                .fusion_style
                .clone()
                .filter(|style| !style.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FUSION_STYLE.to_string()),
            prompt_excerpt: prompt_excerpt(&image.prompt),
            prompt: image.prompt.clone(),
            selected: self.is_selected(index),
        })
    }

    pub fn reset(&mut self) {
        self.images.clear();
        self.selected.clear();
        self.status = None;
    }

    fn refuse(&mut self, message: &str) -> StepError {
        tracing::debug!(step = STEP, reason = message, "input rejected");
        self.status = Some(StatusMessage::error(message));
        StepError::Validation(message.to_string())
    }
}
