use super::step::STEP_COUNT;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    NewProject,
    PreviousStep,
    NextStep,
    Dismiss,
    SelectStep(usize),
}

impl WizardAction {
    pub fn as_str(self) -> &'static str {
        match self {
            WizardAction::NewProject => "new_project",
            WizardAction::PreviousStep => "previous_step",
            WizardAction::NextStep => "next_step",
            WizardAction::Dismiss => "dismiss",
            WizardAction::SelectStep(_) => "select_step",
        }
    }
}

impl std::fmt::Display for WizardAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WizardAction::SelectStep(index) => write!(f, "select_step:{index}"),
            other => f.write_str(other.as_str()),
        }
    }
}

pub fn wizard_action_from_key(key: KeyEvent) -> Option<WizardAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Char('n') | KeyCode::Char('N') if alt => Some(WizardAction::NewProject),
        KeyCode::Left if alt => Some(WizardAction::PreviousStep),
        KeyCode::Right if alt => Some(WizardAction::NextStep),
        KeyCode::Esc => Some(WizardAction::Dismiss),
        KeyCode::Char(digit @ '1'..='7') if !alt => {
            let index = digit.to_digit(10).map(|d| d as usize - 1)?;
            (index < STEP_COUNT).then_some(WizardAction::SelectStep(index))
        }
        _ => None,
    }
}

/// Parses a comma-separated key script such as `alt-n,alt-right,esc,3`.
pub fn parse_scripted_keys(raw: &str) -> Result<Vec<KeyEvent>, String> {
    let mut keys = Vec::new();
    for token in raw.split(',') {
        let normalized = token.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            continue;
        }
        let key = match normalized.as_str() {
            "alt-n" => KeyEvent::new(KeyCode::Char('n'), KeyModifiers::ALT),
            "alt-left" => KeyEvent::new(KeyCode::Left, KeyModifiers::ALT),
            "alt-right" => KeyEvent::new(KeyCode::Right, KeyModifiers::ALT),
            "esc" => KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            digit @ ("1" | "2" | "3" | "4" | "5" | "6" | "7") => {
                KeyEvent::new(KeyCode::Char(char::from(digit.as_bytes()[0])), KeyModifiers::NONE)
            }
            other => {
                return Err(format!(
                    "invalid key token `{other}`; valid tokens: alt-n,alt-left,alt-right,esc,1-7"
                ));
            }
        };
        keys.push(key);
    }
    Ok(keys)
}
