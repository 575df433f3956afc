use brandstory::app::command_handlers;
use brandstory::config::{load_client_settings, DEFAULT_LOG_FILTER};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(fallback: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<(), String> {
    let settings = load_client_settings().map_err(|e| e.to_string());
    init_tracing(
        settings
            .as_ref()
            .map(|settings| settings.log_filter.as_str())
            .unwrap_or(DEFAULT_LOG_FILTER),
    );
    let args: Vec<String> = std::env::args().skip(1).collect();
    let output = command_handlers::run_cli(args, settings)?;
    println!("{output}");
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
