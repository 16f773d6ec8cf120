use std::process::ExitCode;

use takefare_core::config::{AppConfig, LoadOptions};

fn init_logging() -> anyhow::Result<()> {
    use takefare_core::config::LogFormat::*;
    use tracing::Level;

    // Logging comes up before any command runs; a broken config file still
    // gets default logging so the command itself can report the error.
    let logging = AppConfig::load(LoadOptions::default())
        .map(|config| config.logging)
        .unwrap_or_default();
    let log_level = logging.level.parse::<Level>().unwrap_or(Level::INFO);

    let installed = match logging.format {
        Compact => tracing_subscriber::fmt()
            .with_target(false)
            .with_max_level(log_level)
            .compact()
            .try_init(),
        Pretty => tracing_subscriber::fmt()
            .with_target(false)
            .with_max_level(log_level)
            .pretty()
            .try_init(),
        Json => tracing_subscriber::fmt()
            .with_target(false)
            .with_max_level(log_level)
            .json()
            .try_init(),
    };

    installed.map_err(|error| anyhow::anyhow!("could not install tracing subscriber: {error}"))
}

fn main() -> ExitCode {
    if let Err(error) = init_logging() {
        eprintln!("{error:#}");
        return ExitCode::from(2);
    }

    takefare_cli::run()
}
