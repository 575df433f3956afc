use super::validation::{required_text, PROJECT_NAME_MAX_CHARS};
use super::{record_failure, StatusMessage, StepError};
use crate::api::{CreateProjectRequest, ProjectRecord, StoryApi};
use crate::events::{EventBus, WorkflowEvent};
use crate::shared::ids::ProjectId;
use chrono::{DateTime, NaiveDateTime};

const STEP: &str = "project";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub created_at: String,
}

impl Project {
    /// `created_at` as `YYYY-MM-DD HH:MM:SS`, or the raw value when it is not
    /// an ISO-8601 timestamp.
    pub fn created_at_display(&self) -> String {
        let raw = self.created_at.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return parsed.format("%Y-%m-%d %H:%M:%S").to_string();
        }
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return parsed.format("%Y-%m-%d %H:%M:%S").to_string();
        }
        raw.to_string()
    }
}

impl From<ProjectRecord> for Project {
    fn from(record: ProjectRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Default)]
pub struct ProjectStep {
    current: Option<Project>,
    status: Option<StatusMessage>,
}

impl ProjectStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Project> {
        self.current.as_ref()
    }

    pub fn current_id(&self) -> Option<&ProjectId> {
        self.current.as_ref().map(|project| &project.id)
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Creates a project. Replacing an active project publishes
    /// `ProjectReset` ahead of `ProjectCreated` so downstream state is cleared
    /// before the new project is announced.
    pub fn submit(
        &mut self,
        api: &dyn StoryApi,
        bus: &mut EventBus,
        name: &str,
    ) -> Result<&Project, StepError> {
        let name = required_text(
            name,
            "Project name",
            "Please enter a project name",
            PROJECT_NAME_MAX_CHARS,
        )
        .map_err(|err| record_failure(STEP, &mut self.status, err))?;

        let record = api
            .create_project(&CreateProjectRequest { name })
            .map_err(|err| record_failure(STEP, &mut self.status, err.into()))?;
        let project = Project::from(record);
        tracing::info!(project_id = %project.id, name = %project.name, "project created");

        if self.current.is_some() {
            bus.publish(WorkflowEvent::ProjectReset);
        }
        bus.publish(WorkflowEvent::ProjectCreated(project.clone()));
        self.status = Some(StatusMessage::success("Project created successfully!"));
        Ok(&*self.current.insert(project))
    }

    /// Re-reads the active project from the API.
    pub fn refresh(&mut self, api: &dyn StoryApi) -> Result<&Project, StepError> {
        let Some(project_id) = self.current_id().cloned() else {
            return Err(record_failure(
                STEP,
                &mut self.status,
                StepError::Sequencing(super::MISSING_PROJECT_MESSAGE.to_string()),
            ));
        };
        let record = api
            .get_project(&project_id)
            .map_err(|err| record_failure(STEP, &mut self.status, err.into()))?;
        Ok(&*self.current.insert(Project::from(record)))
    }

    /// Drops the active project and announces the reset.
    pub fn reset(&mut self, bus: &mut EventBus) {
        self.current = None;
        self.status = None;
        tracing::info!("project reset");
        bus.publish(WorkflowEvent::ProjectReset);
    }
}
