pub mod controller;
pub mod navigation;
pub mod progress;
pub mod state;
pub mod step;
pub mod view;

pub use controller::WorkflowController;
pub use navigation::{parse_scripted_keys, wizard_action_from_key, WizardAction};
pub use progress::{progress_percent, ProgressSnapshot};
pub use state::WorkflowState;
pub use step::{WorkflowStep, ALL_WORKFLOW_STEPS, STEP_COUNT};
pub use view::{nav_item_label, nav_item_status, NavItem, NavItemStatus, WorkflowView};
