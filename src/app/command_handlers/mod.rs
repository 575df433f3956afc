use crate::app::cli::{help_text, parse_cli_verb, CliVerb};
use crate::config::ClientSettings;

pub mod keys;
pub mod project;
pub mod run;
pub mod settings;
pub mod steps;

/// `settings` is the already-loaded client configuration. A load failure is
/// only reported by commands that need it.
pub fn run_cli(
    args: Vec<String>,
    settings: Result<ClientSettings, String>,
) -> Result<String, String> {
    if args.is_empty() {
        return Ok(help_text());
    }

    match parse_cli_verb(args[0].as_str()) {
        CliVerb::Steps => steps::cmd_steps(),
        CliVerb::Config => settings::cmd_config(settings?),
        CliVerb::Project => project::cmd_project(&args[1..], settings),
        CliVerb::Keys => keys::cmd_keys(&args[1..]),
        CliVerb::Run => run::cmd_run(&args[1..], settings),
        CliVerb::Help => Ok(help_text()),
        CliVerb::Unknown => Err(format!("unknown command `{}`", args[0])),
    }
}
