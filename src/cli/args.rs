//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// scribe-article - Turn a recorded talk into a polished DOCX/PDF article
///
/// Without a subcommand the full pipeline runs on the configured audio file.
#[derive(Parser, Debug)]
#[command(name = "scribe-article")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transcribe, draft, improve and export an article
    Run {
        /// Audio file to process (defaults to input.audio_file from the config)
        #[arg(short, long)]
        audio: Option<PathBuf>,

        /// Transcribe again even if a transcript already exists
        #[arg(long)]
        retranscribe: bool,
    },

    /// Check API key, model and input file setup
    Doctor {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Print a shell completion script
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Run {
            audio: None,
            retranscribe: false,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
