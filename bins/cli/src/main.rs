//! Subpool CLI
//!
//! Previews pool splits and generates charges from JSON documents.

mod cli;
mod error;
mod request;

use clap::Parser;
use subpool_shared::config::LoggingConfig;
use subpool_shared::{AppConfig, AppError};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = cli::Cli::parse();
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => fail(&AppError::from(e)),
    };
    init_tracing(&config.logging)?;

    match cli::run(args, &config) {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(e) => fail(&e),
    }
}

fn fail(e: &AppError) -> ! {
    eprintln!("{}", render_error(e));
    std::process::exit(1);
}

fn render_error(e: &AppError) -> String {
    format!("error[{}]: {e}", e.error_code())
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    let json = logging.json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let text = (!logging.json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .try_init()?;
    Ok(())
}
