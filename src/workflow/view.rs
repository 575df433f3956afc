use super::progress::ProgressSnapshot;
use super::state::WorkflowState;
use super::step::{WorkflowStep, ALL_WORKFLOW_STEPS};
use crate::gallery::CompletionSummary;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavItemStatus {
    Active,
    Completed,
    Available,
    Locked,
}

impl NavItemStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            NavItemStatus::Active => "active",
            NavItemStatus::Completed => "completed",
            NavItemStatus::Available => "available",
            NavItemStatus::Locked => "locked",
        }
    }
}

/// Active beats completed beats available.
pub fn nav_item_status(state: &WorkflowState, index: usize) -> NavItemStatus {
    let current = state.current_index();
    if index == current {
        NavItemStatus::Active
    } else if index < current {
        NavItemStatus::Completed
    } else if state.is_step_available(index) {
        NavItemStatus::Available
    } else {
        NavItemStatus::Locked
    }
}

/// Accessible label; the active item reads as available.
pub fn nav_item_label(state: &WorkflowState, step: WorkflowStep) -> String {
    let index = step.index();
    let suffix = if index < state.current_index() {
        "completed"
    } else if state.is_step_available(index) {
        "available"
    } else {
        "not available"
    };
    format!("{} step - {suffix}", step.as_str())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub step: WorkflowStep,
    pub title: &'static str,
    pub status: NavItemStatus,
    pub label: String,
    pub section_id: String,
    pub visible: bool,
}

/// Render-ready snapshot of the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowView {
    pub visible_section: String,
    pub nav: Vec<NavItem>,
    pub progress: ProgressSnapshot,
    pub global_error: Option<String>,
    pub completion: Option<CompletionSummary>,
}

impl WorkflowView {
    pub fn build(
        state: &WorkflowState,
        global_error: Option<&str>,
        completion: Option<CompletionSummary>,
    ) -> Self {
        let current = state.current_step();
        let nav = ALL_WORKFLOW_STEPS
            .into_iter()
            .map(|step| NavItem {
                step,
                title: step.title(),
                status: nav_item_status(state, step.index()),
                label: nav_item_label(state, step),
                section_id: step.section_id(),
                visible: step == current,
            })
            .collect();
        Self {
            visible_section: current.section_id(),
            nav,
            progress: state.progress(),
            global_error: global_error.map(str::to_string),
            completion,
        }
    }

    pub fn visible_count(&self) -> usize {
        self.nav.iter().filter(|item| item.visible).count()
    }
}
