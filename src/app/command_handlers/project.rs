use crate::api::{ApiClient, StoryApi};
use crate::config::ClientSettings;
use crate::shared::ids::ProjectId;
use crate::steps::Project;

pub fn cmd_project(
    args: &[String],
    settings: Result<ClientSettings, String>,
) -> Result<String, String> {
    match args {
        [action, id] if action == "get" => cmd_project_get(id, settings?),
        _ => Err("usage: project get <id>".to_string()),
    }
}

fn cmd_project_get(raw_id: &str, settings: ClientSettings) -> Result<String, String> {
    let project_id = ProjectId::parse(raw_id).map_err(|e| format!("invalid project id: {e}"))?;
    let client = ApiClient::new(&settings);
    let project = Project::from(client.get_project(&project_id).map_err(|e| e.to_string())?);
    Ok([
        format!("project_id={}", project.id),
        format!("project_name={}", project.name),
        format!("project_created_at={}", project.created_at_display()),
    ]
    .join("\n"))
}
