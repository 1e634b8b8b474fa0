//! fibdrv-client: walks the Fibonacci device forward and back.

use fibdrv_lib::{app, config, errors};

fn main() {
    let config = config::AppConfig::parse();

    let default_level = if config.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = app::run(&config) {
        eprintln!("Error: {err:#}");
        std::process::exit(errors::exit_code(&err));
    }
}
