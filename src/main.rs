//! scribe-article - Turn a recorded talk into a polished article
//!
//! Entry point for the scribe-article CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use scribe_article::cli::{Cli, Commands};
use scribe_article::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    match cli.command.unwrap_or_default() {
        Commands::Completions { shell } => {
            scribe_article::cli::completions::print(shell);
        }
        command => {
            // A local .env may carry the API key; exported variables win.
            dotenvy::dotenv().ok();

            // Load configuration only for runtime commands.
            let settings = Settings::load()?;
            init_logging(&settings, cli.verbose);

            match command {
                Commands::Run {
                    audio,
                    retranscribe,
                } => {
                    scribe_article::cli::commands::run_pipeline(&settings, audio, retranscribe)
                        .await?;
                }
                Commands::Doctor { json } => {
                    scribe_article::cli::commands::run_doctor(&settings, json).await?;
                }
                Commands::Config(config_cmd) => {
                    scribe_article::cli::commands::config_command(&settings, config_cmd)?;
                }
                Commands::Completions { .. } => unreachable!(),
            }
        }
    }

    Ok(())
}

/// `--verbose` forces debug, then `RUST_LOG`, then `general.log_level`.
fn init_logging(settings: &Settings, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&settings.general.log_level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
