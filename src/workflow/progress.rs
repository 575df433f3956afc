use super::step::{WorkflowStep, STEP_COUNT};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    pub current_step: usize,
    pub step: WorkflowStep,
    pub percent: u8,
    pub text: String,
    pub announcement: String,
}

/// `round((index + 1) / 7 * 100)`, clamped to the last step.
pub fn progress_percent(index: usize) -> u8 {
    let reached = index.min(STEP_COUNT - 1) + 1;
    ((reached as f64 / STEP_COUNT as f64) * 100.0).round() as u8
}

impl ProgressSnapshot {
    pub fn for_step(step: WorkflowStep) -> Self {
        let percent = progress_percent(step.index());
        let text = format!("{percent}% Complete");
        Self {
            current_step: step.index(),
            step,
            percent,
            announcement: format!("Current step: {}. {text}", step.as_str()),
            text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_round_per_step() {
        let percents: Vec<u8> = (0..STEP_COUNT).map(progress_percent).collect();
        assert_eq!(percents, vec![14, 29, 43, 57, 71, 86, 100]);
    }

    #[test]
    fn snapshot_text_and_announcement() {
        let snapshot = ProgressSnapshot::for_step(WorkflowStep::Character);
        assert_eq!(snapshot.text, "29% Complete");
        assert_eq!(snapshot.announcement, "Current step: character. 29% Complete");
    }
}
