use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    Project,
    Character,
    Product,
    Background,
    Story,
    Generate,
    Gallery,
}

pub const ALL_WORKFLOW_STEPS: [WorkflowStep; 7] = [
    WorkflowStep::Project,
    WorkflowStep::Character,
    WorkflowStep::Product,
    WorkflowStep::Background,
    WorkflowStep::Story,
    WorkflowStep::Generate,
    WorkflowStep::Gallery,
];

pub const STEP_COUNT: usize = ALL_WORKFLOW_STEPS.len();

impl WorkflowStep {
    pub fn index(self) -> usize {
        match self {
            WorkflowStep::Project => 0,
            WorkflowStep::Character => 1,
            WorkflowStep::Product => 2,
            WorkflowStep::Background => 3,
            WorkflowStep::Story => 4,
            WorkflowStep::Generate => 5,
            WorkflowStep::Gallery => 6,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        ALL_WORKFLOW_STEPS.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WorkflowStep::Project => "project",
            WorkflowStep::Character => "character",
            WorkflowStep::Product => "product",
            WorkflowStep::Background => "background",
            WorkflowStep::Story => "story",
            WorkflowStep::Generate => "generate",
            WorkflowStep::Gallery => "gallery",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WorkflowStep::Project => "Create Project",
            WorkflowStep::Character => "Define Character",
            WorkflowStep::Product => "Add Product",
            WorkflowStep::Background => "Set Background",
            WorkflowStep::Story => "Write Story",
            WorkflowStep::Generate => "Generate Images",
            WorkflowStep::Gallery => "Review Gallery",
        }
    }

    pub fn section_id(self) -> String {
        format!("{}-section", self.as_str())
    }
}

impl std::fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
