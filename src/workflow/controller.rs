use super::navigation::{wizard_action_from_key, WizardAction};
use super::progress::ProgressSnapshot;
use super::state::WorkflowState;
use super::step::WorkflowStep;
use super::view::{nav_item_label, WorkflowView};
use crate::api::{GeneratedImage, StoryApi};
use crate::events::{EventBus, EventKind, WorkflowEvent};
use crate::gallery::{CompletionSummary, Gallery, ImagePreview};
use crate::steps::{
    BackgroundInput, BackgroundResult, BackgroundStep, CharacterInput, CharacterResult,
    CharacterStep, ProductInput, ProductResult, ProductStep, Project, ProjectStep,
    StepError, StoryPrerequisites, StoryResult, StoryStep, MISSING_PROJECT_MESSAGE,
};
use crossterm::event::KeyEvent;

const GENERATION_FAILURE_PREFIX: &str = "Failed to generate images";

/// Owns every step component and coordinates them through the event bus.
///
/// Component operations publish into the bus and the controller drains it
/// before returning, so each call leaves the wizard in a settled state. The
/// step pointer only moves in [`WorkflowController::handle_event`] or through
/// explicit navigation.
#[derive(Debug)]
pub struct WorkflowController<A: StoryApi> {
    api: A,
    bus: EventBus,
    state: WorkflowState,
    project: ProjectStep,
    character: CharacterStep,
    product: ProductStep,
    background: BackgroundStep,
    story: StoryStep,
    gallery: Gallery,
    global_error: Option<String>,
    completion: Option<CompletionSummary>,
    saved_images: Vec<GeneratedImage>,
}

impl<A: StoryApi> WorkflowController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            bus: EventBus::new(),
            state: WorkflowState::new(),
            project: ProjectStep::new(),
            character: CharacterStep::new(),
            product: ProductStep::new(),
            background: BackgroundStep::new(),
            story: StoryStep::new(),
            gallery: Gallery::new(),
            global_error: None,
            completion: None,
            saved_images: Vec::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn current_step(&self) -> WorkflowStep {
        self.state.current_step()
    }

    pub fn project(&self) -> &ProjectStep {
        &self.project
    }

    pub fn character(&self) -> &CharacterStep {
        &self.character
    }

    pub fn product(&self) -> &ProductStep {
        &self.product
    }

    pub fn background(&self) -> &BackgroundStep {
        &self.background
    }

    pub fn story(&self) -> &StoryStep {
        &self.story
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn global_error(&self) -> Option<&str> {
        self.global_error.as_deref()
    }

    pub fn completion(&self) -> Option<&CompletionSummary> {
        self.completion.as_ref()
    }

    pub fn saved_images(&self) -> &[GeneratedImage] {
        &self.saved_images
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, subscriber: F)
    where
        F: FnMut(&WorkflowEvent) + 'static,
    {
        self.bus.subscribe(kind, subscriber);
    }

    pub fn subscribe_all<F>(&mut self, subscriber: F)
    where
        F: FnMut(&WorkflowEvent) + 'static,
    {
        self.bus.subscribe_all(subscriber);
    }

    pub fn create_project(&mut self, name: &str) -> Result<Project, StepError> {
        let result = self
            .project
            .submit(&self.api, &mut self.bus, name)
            .cloned();
        self.pump_events();
        result
    }

    pub fn refresh_project(&mut self) -> Result<Project, StepError> {
        self.project.refresh(&self.api).cloned()
    }

    /// Drops the active project and every downstream result.
    pub fn reset_project(&mut self) {
        self.project.reset(&mut self.bus);
        self.pump_events();
    }

    pub fn submit_character(&mut self, input: CharacterInput) -> Result<CharacterResult, StepError> {
        let result = self
            .character
            .submit(&self.api, self.project.current(), &mut self.bus, input)
            .cloned();
        self.pump_events();
        result
    }

    pub fn approve_character(&mut self) -> Result<(), StepError> {
        let result = self.character.approve(&mut self.bus);
        self.pump_events();
        result
    }

    pub fn discard_character(&mut self) {
        self.character.discard();
    }

    pub fn submit_product(&mut self, input: ProductInput) -> Result<ProductResult, StepError> {
        let result = self
            .product
            .submit(&self.api, self.project.current(), &mut self.bus, input)
            .cloned();
        self.pump_events();
        result
    }

    pub fn approve_product(&mut self) -> Result<(), StepError> {
        let result = self.product.approve(&mut self.bus);
        self.pump_events();
        result
    }

    pub fn discard_product(&mut self) {
        self.product.discard();
    }

    pub fn submit_background(
        &mut self,
        input: BackgroundInput,
    ) -> Result<BackgroundResult, StepError> {
        let result = self
            .background
            .submit(&self.api, self.project.current(), &mut self.bus, input)
            .cloned();
        self.pump_events();
        result
    }

    pub fn approve_background(&mut self) -> Result<(), StepError> {
        let result = self.background.approve(&mut self.bus);
        self.pump_events();
        result
    }

    pub fn discard_background(&mut self) {
        self.background.discard();
    }

    pub fn submit_story(&mut self, text: &str) -> Result<StoryResult, StepError> {
        let result = self
            .story
            .submit(&self.api, self.project.current(), &mut self.bus, text)
            .cloned();
        self.pump_events();
        result
    }

    /// Approves the story; on success image generation runs before this
    /// returns.
    pub fn approve_story(&mut self) -> Result<(), StepError> {
        let prerequisites = StoryPrerequisites {
            project: self.project.current(),
            character: self.character.current(),
            product: self.product.current(),
            background: self.background.current(),
        };
        let result = self.story.approve(&prerequisites, &mut self.bus);
        self.pump_events();
        result
    }

    pub fn clear_story(&mut self) {
        self.story.clear();
    }

    pub fn toggle_image(&mut self, index: usize) -> Result<bool, StepError> {
        self.gallery.toggle_selection(index)
    }

    pub fn select_all_images(&mut self) {
        self.gallery.select_all();
    }

    pub fn clear_image_selection(&mut self) {
        self.gallery.clear_selection();
    }

    pub fn save_selected_images(&mut self) -> Result<(), StepError> {
        let result = self.gallery.save_selected(&mut self.bus);
        self.pump_events();
        result
    }

    pub fn finish_project(&mut self) -> Result<(), StepError> {
        let result = self.gallery.finish_project(&mut self.bus);
        self.pump_events();
        result
    }

    pub fn generate_more(&mut self) {
        self.gallery.generate_more(&mut self.bus);
        self.pump_events();
    }

    pub fn preview_image(&self, index: usize) -> Option<ImagePreview> {
        self.gallery
            .preview(index, |raw| self.api.resolve_image_url(raw))
    }

    /// Requests a batch of final images for the active project.
    pub fn generate_final_images(&mut self) {
        self.request_images();
        self.pump_events();
    }

    pub fn dismiss_global_error(&mut self) {
        self.global_error = None;
    }

    /// Moves to the previous step if it exists and is available.
    pub fn navigate_previous(&mut self) -> bool {
        match self.state.current_index().checked_sub(1) {
            Some(target) => self.navigate_to(target),
            None => false,
        }
    }

    /// Moves to the next step if it exists and is available.
    pub fn navigate_next(&mut self) -> bool {
        self.navigate_to(self.state.current_index() + 1)
    }

    /// Jumps to `index` from the navigation list.
    pub fn select_step(&mut self, index: usize) -> bool {
        if self.navigate_to(index) {
            return true;
        }
        if let Some(step) = WorkflowStep::from_index(index) {
            tracing::info!(label = %nav_item_label(&self.state, step), "step selection refused");
        }
        false
    }

    pub fn apply_action(&mut self, action: WizardAction) -> bool {
        tracing::debug!(action = %action, "wizard action");
        match action {
            WizardAction::NewProject => {
                self.reset_project();
                true
            }
            WizardAction::PreviousStep => self.navigate_previous(),
            WizardAction::NextStep => self.navigate_next(),
            WizardAction::Dismiss => {
                let had_error = self.global_error.is_some();
                self.dismiss_global_error();
                had_error
            }
            WizardAction::SelectStep(index) => self.select_step(index),
        }
    }

    /// Applies the action bound to `key`; `None` when the key is unbound.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<bool> {
        wizard_action_from_key(key).map(|action| self.apply_action(action))
    }

    pub fn progress(&self) -> ProgressSnapshot {
        self.state.progress()
    }

    pub fn view(&self) -> WorkflowView {
        WorkflowView::build(
            &self.state,
            self.global_error.as_deref(),
            self.completion.clone(),
        )
    }

    /// Drains the bus, applying each event in publication order. Events
    /// published while handling are processed in the same pass.
    pub fn pump_events(&mut self) {
        while let Some(event) = self.bus.next() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: WorkflowEvent) {
        match event {
            WorkflowEvent::ProjectCreated(project) => {
                tracing::debug!(project_id = %project.id, "handling project created");
                self.state.advance_to_step(WorkflowStep::Character.index());
            }
            WorkflowEvent::ProjectReset => {
                self.state.reset();
                self.character.reset();
                self.product.reset();
                self.background.reset();
                self.story.reset();
                self.gallery.reset();
                self.global_error = None;
                self.completion = None;
                self.saved_images.clear();
            }
            WorkflowEvent::CharacterApproved(_) => {
                self.state.advance_to_step(WorkflowStep::Product.index());
            }
            WorkflowEvent::ProductApproved(_) => {
                self.state.advance_to_step(WorkflowStep::Background.index());
            }
            WorkflowEvent::BackgroundApproved(_) => {
                self.state.advance_to_step(WorkflowStep::Story.index());
            }
            WorkflowEvent::StoryApproved(bundle) => {
                tracing::info!(
                    project_id = %bundle.project.id,
                    story_length = bundle.story.length,
                    "story approved, generating images"
                );
                self.state.advance_to_step(WorkflowStep::Generate.index());
                self.request_images();
            }
            WorkflowEvent::ImagesGenerated(images) => {
                self.gallery.display_images(images);
                self.state.advance_to_step(WorkflowStep::Gallery.index());
            }
            WorkflowEvent::GenerateMoreRequested => self.request_images(),
            WorkflowEvent::ImagesSaved(images) => {
                tracing::info!(count = images.len(), "selection saved");
                self.saved_images = images;
            }
            WorkflowEvent::ProjectCompleted(summary) => {
                tracing::info!(
                    selected = summary.selected_images,
                    total = summary.total_images,
                    "project completed"
                );
                self.completion = Some(summary);
            }
            WorkflowEvent::CharacterCreated(_)
            | WorkflowEvent::ProductUploaded(_)
            | WorkflowEvent::BackgroundCreated(_)
            | WorkflowEvent::StoryCreated(_) => {
                tracing::debug!(event = %event.kind(), "result created");
            }
        }
    }

    fn navigate_to(&mut self, target: usize) -> bool {
        if WorkflowStep::from_index(target).is_none() || !self.state.is_step_available(target) {
            return false;
        }
        self.state.advance_to_step(target)
    }

    fn request_images(&mut self) {
        let Some(project_id) = self.project.current_id().cloned() else {
            self.global_error = Some(format!(
                "{GENERATION_FAILURE_PREFIX}: {MISSING_PROJECT_MESSAGE}"
            ));
            return;
        };
        match self.api.generate_images(&project_id) {
            Ok(record) => {
                tracing::info!(project_id = %project_id, count = record.images.len(), "images generated");
                self.global_error = None;
                self.bus.publish(WorkflowEvent::ImagesGenerated(record.images));
            }
            Err(err) => {
                tracing::error!(project_id = %project_id, error = %err, "image generation failed");
                self.global_error = Some(format!("{GENERATION_FAILURE_PREFIX}: {err}"));
            }
        }
    }
}
