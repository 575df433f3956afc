use crate::api::GeneratedImage;
use crate::gallery::CompletionSummary;
use crate::steps::{BackgroundResult, CharacterResult, Project, ProductResult, StoryBundle, StoryResult};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    ProjectCreated(Project),
    ProjectReset,
    CharacterCreated(CharacterResult),
    CharacterApproved(CharacterResult),
    ProductUploaded(ProductResult),
    ProductApproved(ProductResult),
    BackgroundCreated(BackgroundResult),
    BackgroundApproved(BackgroundResult),
    StoryCreated(StoryResult),
    StoryApproved(Box<StoryBundle>),
    ImagesGenerated(Vec<GeneratedImage>),
    GenerateMoreRequested,
    ImagesSaved(Vec<GeneratedImage>),
    ProjectCompleted(CompletionSummary),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ProjectCreated,
    ProjectReset,
    CharacterCreated,
    CharacterApproved,
    ProductUploaded,
    ProductApproved,
    BackgroundCreated,
    BackgroundApproved,
    StoryCreated,
    StoryApproved,
    ImagesGenerated,
    GenerateMoreRequested,
    ImagesSaved,
    ProjectCompleted,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::ProjectCreated => "projectCreated",
            EventKind::ProjectReset => "projectReset",
            EventKind::CharacterCreated => "characterCreated",
            EventKind::CharacterApproved => "characterApproved",
            EventKind::ProductUploaded => "productUploaded",
            EventKind::ProductApproved => "productApproved",
            EventKind::BackgroundCreated => "backgroundCreated",
            EventKind::BackgroundApproved => "backgroundApproved",
            EventKind::StoryCreated => "storyCreated",
            EventKind::StoryApproved => "storyApproved",
            EventKind::ImagesGenerated => "imagesGenerated",
            EventKind::GenerateMoreRequested => "generateMoreImages",
            EventKind::ImagesSaved => "imagesSaved",
            EventKind::ProjectCompleted => "projectCompleted",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WorkflowEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            WorkflowEvent::ProjectCreated(_) => EventKind::ProjectCreated,
            WorkflowEvent::ProjectReset => EventKind::ProjectReset,
            WorkflowEvent::CharacterCreated(_) => EventKind::CharacterCreated,
            WorkflowEvent::CharacterApproved(_) => EventKind::CharacterApproved,
            WorkflowEvent::ProductUploaded(_) => EventKind::ProductUploaded,
            WorkflowEvent::ProductApproved(_) => EventKind::ProductApproved,
            WorkflowEvent::BackgroundCreated(_) => EventKind::BackgroundCreated,
            WorkflowEvent::BackgroundApproved(_) => EventKind::BackgroundApproved,
            WorkflowEvent::StoryCreated(_) => EventKind::StoryCreated,
            WorkflowEvent::StoryApproved(_) => EventKind::StoryApproved,
            WorkflowEvent::ImagesGenerated(_) => EventKind::ImagesGenerated,
            WorkflowEvent::GenerateMoreRequested => EventKind::GenerateMoreRequested,
            WorkflowEvent::ImagesSaved(_) => EventKind::ImagesSaved,
            WorkflowEvent::ProjectCompleted(_) => EventKind::ProjectCompleted,
        }
    }
}

pub type Subscriber = Box<dyn FnMut(&WorkflowEvent)>;

/// FIFO event queue with kind-filtered subscribers.
///
/// Components publish into the bus; the workflow controller drains it with
/// [`EventBus::next`]. Subscribers registered for an event's kind (or for all
/// kinds) are notified in registration order as the event is dequeued.
#[derive(Default)]
pub struct EventBus {
    queue: VecDeque<WorkflowEvent>,
    subscribers: Vec<(Option<EventKind>, Subscriber)>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("queue", &self.queue)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&mut self, event: WorkflowEvent) {
        tracing::debug!(event = %event.kind(), "event published");
        self.queue.push_back(event);
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, subscriber: F)
    where
        F: FnMut(&WorkflowEvent) + 'static,
    {
        self.subscribers.push((Some(kind), Box::new(subscriber)));
    }

    pub fn subscribe_all<F>(&mut self, subscriber: F)
    where
        F: FnMut(&WorkflowEvent) + 'static,
    {
        self.subscribers.push((None, Box::new(subscriber)));
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Dequeues the oldest event after notifying its subscribers.
    pub fn next(&mut self) -> Option<WorkflowEvent> {
        let event = self.queue.pop_front()?;
        let kind = event.kind();
        for (filter, subscriber) in &mut self.subscribers {
            if filter.map_or(true, |wanted| wanted == kind) {
                subscriber(&event);
            }
        }
        Some(event)
    }
}
