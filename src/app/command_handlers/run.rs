use crate::api::ApiClient;
use crate::app::session::{run_session, SessionScript};
use crate::config::ClientSettings;
use crate::workflow::WorkflowController;
use std::path::Path;

pub fn cmd_run(args: &[String], settings: Result<ClientSettings, String>) -> Result<String, String> {
    let [script_path] = args else {
        return Err("usage: run <session.yaml>".to_string());
    };
    let script_path = Path::new(script_path);
    let script = SessionScript::from_path(script_path)?;
    let base_dir = script_path.parent().unwrap_or_else(|| Path::new("."));

    let mut controller = WorkflowController::new(ApiClient::new(&settings?));
    let lines = run_session(&mut controller, &script, base_dir)?;
    Ok(lines.join("\n"))
}
