use super::progress::{progress_percent, ProgressSnapshot};
use super::step::{WorkflowStep, STEP_COUNT};

/// Step pointer of the wizard. Only [`WorkflowState::advance_to_step`] and
/// [`WorkflowState::reset`] move it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkflowState {
    current: usize,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> WorkflowStep {
        WorkflowStep::from_index(self.current).unwrap_or(WorkflowStep::Project)
    }

    /// Step 0 is always available; step `i` once the pointer has reached
    /// `i - 1`.
    pub fn is_step_available(&self, index: usize) -> bool {
        match index {
            0 => true,
            i if i < STEP_COUNT => self.current + 1 >= i,
            _ => false,
        }
    }

    /// Moves the pointer to `index`. Out-of-range targets are ignored.
    pub fn advance_to_step(&mut self, index: usize) -> bool {
        let Some(step) = WorkflowStep::from_index(index) else {
            tracing::warn!(index, "ignoring advance to unknown workflow step");
            return false;
        };
        tracing::info!(from = self.current, to = index, step = %step, "workflow step changed");
        self.current = index;
        true
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }

    pub fn progress_percent(&self) -> u8 {
        progress_percent(self.current)
    }

    pub fn progress(&self) -> ProgressSnapshot {
        ProgressSnapshot::for_step(self.current_step())
    }
}
