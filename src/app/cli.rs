#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Steps,
    Config,
    Project,
    Keys,
    Run,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "steps" => CliVerb::Steps,
        "config" => CliVerb::Config,
        "project" => CliVerb::Project,
        "keys" => CliVerb::Keys,
        "run" => CliVerb::Run,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  steps                                List the workflow steps in order".to_string(),
        "  config                               Show resolved client settings".to_string(),
        "  project get <id>                     Fetch a project from the API".to_string(),
        "  keys <script>                        Decode a key script, e.g. alt-n,alt-right,esc,3"
            .to_string(),
        "  run <session.yaml>                   Drive the full wizard from a session script"
            .to_string(),
    ]
}

pub(crate) fn help_text() -> String {
    let mut lines = cli_help_lines();
    lines.push(String::new());
    lines.push("Environment:".to_string());
    lines.push(format!(
        "  {:36} Override the API base URL",
        crate::config::API_URL_ENV
    ));
    lines.push(format!(
        "  {:36} Override the image asset host",
        crate::config::ASSET_URL_ENV
    ));
    lines.join("\n")
}
