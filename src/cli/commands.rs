//! CLI command implementations

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::cli::args::ConfigCommand;
use crate::config::Settings;
use crate::llm::build_generator;
use crate::pipeline::ArticlePipeline;
use crate::transcription::build_transcriber;

/// Run the full audio-to-article pipeline
pub async fn run_pipeline(
    settings: &Settings,
    audio: Option<PathBuf>,
    retranscribe: bool,
) -> Result<()> {
    let audio_path = settings.resolve_audio_path(audio.as_deref());

    let generator = build_generator(settings).context("Cannot reach the article generator")?;
    let transcriber = build_transcriber(settings)?;

    let pipeline = ArticlePipeline::new(settings, transcriber.as_ref(), generator.as_ref())
        .reuse_transcript(settings.pipeline.reuse_transcript && !retranscribe);

    let report = match pipeline.run(&audio_path).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(stage = e.stage(), "Pipeline aborted: {}", e);
            return Err(e.into());
        }
    };

    let source = if report.transcript_cached {
        "reused"
    } else {
        "new"
    };
    println!("Transcript ({}): {}", source, report.transcript_path.display());
    println!("Article saved:");
    println!("  {}", report.exported.docx.display());
    println!("  {}", report.exported.pdf.display());

    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let mut shown = settings.clone();
            if shown.has_api_key() {
                shown.llm.api_key = "********".to_string();
            }
            let toml = toml::to_string_pretty(&shown)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: &'static str,
    detail: String,
}

#[derive(Serialize)]
struct DoctorReport {
    config_file: String,
    data_dir: String,
    checks: Vec<DoctorCheck>,
}

/// Run diagnostic checks to help troubleshoot local setup issues.
pub async fn run_doctor(settings: &Settings, json: bool) -> Result<()> {
    let report = collect_doctor_report(settings);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("scribe-article doctor");
    println!("config: {}", report.config_file);
    println!("data:   {}", report.data_dir);
    println!();

    for check in &report.checks {
        println!("{:<10} {:<8} {}", check.name, check.status, check.detail);
    }

    Ok(())
}

fn collect_doctor_report(settings: &Settings) -> DoctorReport {
    let config_file = match Settings::config_path() {
        Ok(path) if path.exists() => path.display().to_string(),
        Ok(path) => format!("{} (not found, using defaults)", path.display()),
        Err(e) => format!("unavailable: {}", e),
    };

    let model_path = settings.model_path();
    let audio_path = settings.resolve_audio_path(None);

    let checks = vec![
        DoctorCheck {
            name: "api_key",
            status: if settings.has_api_key() { "ok" } else { "missing" },
            detail: "set llm.api_key, SCRIBE_GEMINI_API_KEY or GOOGLE_API_KEY".to_string(),
        },
        DoctorCheck {
            name: "whisper",
            status: if cfg!(feature = "whisper") {
                "ok"
            } else {
                "missing"
            },
            detail: "speech-to-text engine compiled in".to_string(),
        },
        file_check("model", &model_path),
        file_check("audio", &audio_path),
    ];

    DoctorReport {
        config_file,
        data_dir: settings.general.data_dir.display().to_string(),
        checks,
    }
}

fn file_check(name: &'static str, path: &Path) -> DoctorCheck {
    DoctorCheck {
        name,
        status: if path.is_file() { "ok" } else { "missing" },
        detail: path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doctor_flags_missing_key_and_files() {
        let tmp = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.general.data_dir = tmp.path().to_path_buf();
        settings.whisper.models_dir = tmp.path().join("models");
        settings.llm.api_key.clear();

        let report = collect_doctor_report(&settings);
        let status = |name: &str| {
            report
                .checks
                .iter()
                .find(|c| c.name == name)
                .map(|c| c.status)
                .unwrap()
        };

        assert_eq!(status("api_key"), "missing");
        assert_eq!(status("model"), "missing");
        assert_eq!(status("audio"), "missing");
    }

    #[test]
    fn doctor_sees_present_audio() {
        let tmp = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.general.data_dir = tmp.path().to_path_buf();
        settings.llm.api_key = "key".to_string();
        settings.ensure_dirs().unwrap();
        std::fs::write(settings.resolve_audio_path(None), b"RIFF").unwrap();

        let report = collect_doctor_report(&settings);
        let audio = report.checks.iter().find(|c| c.name == "audio").unwrap();
        let key = report.checks.iter().find(|c| c.name == "api_key").unwrap();

        assert_eq!(audio.status, "ok");
        assert_eq!(key.status, "ok");
    }
}
