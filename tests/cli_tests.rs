mod common;

use common::{run_scribe, TestEnv};

#[test]
fn help_shows_usage() {
    let output = run_scribe(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "--help should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("run"));
    assert!(stdout.contains("doctor"));
}

#[test]
fn version_shows_version() {
    let output = run_scribe(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("scribe-article "));
}

#[test]
fn completions_bash_outputs_script() {
    let output = run_scribe(&["completions", "bash"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "completions bash should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("scribe-article"));
}

#[test]
fn config_show_prints_sections_and_masks_key() {
    let env = TestEnv::new();
    let output = env.run_with_api_key(&["config", "show"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "config show should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("[general]"));
    assert!(stdout.contains("[llm]"));
    assert!(stdout.contains("draft_model"));
    assert!(!stdout.contains("test-key"));
}

#[test]
fn config_path_returns_toml_file() {
    let output = run_scribe(&["config", "path"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.trim().ends_with("config.toml"));
}

#[test]
fn config_init_refuses_to_overwrite_without_force() {
    let env = TestEnv::new();

    let first = env.run(&["config", "init"]);
    assert!(
        first.status.success(),
        "first init should succeed\nstderr:\n{}",
        String::from_utf8_lossy(&first.stderr)
    );
    assert!(env.config_path().is_file());

    let second = env.run(&["config", "init"]);
    assert!(!second.status.success());
    assert!(String::from_utf8_lossy(&second.stderr).contains("--force"));

    let forced = env.run(&["config", "init", "--force"]);
    assert!(forced.status.success());
}

#[test]
fn doctor_reports_missing_key() {
    let output = run_scribe(&["doctor"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "doctor should run successfully\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("api_key"));
    assert!(stdout.contains("missing"));
}

#[test]
fn doctor_json_is_machine_readable() {
    let output = TestEnv::new().run_with_api_key(&["doctor", "--json"]);
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("doctor --json should print JSON");
    let checks = report["checks"].as_array().expect("checks array");
    let api_key = checks
        .iter()
        .find(|c| c["name"] == "api_key")
        .expect("api_key check");
    assert_eq!(api_key["status"], "ok");
}

#[test]
fn dotenv_in_working_directory_supplies_api_key() {
    let env = TestEnv::new();
    env.write_dotenv("GOOGLE_API_KEY=from-dotenv\n");

    let output = env.run(&["doctor", "--json"]);
    assert!(
        output.status.success(),
        "doctor should succeed\nstderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("doctor --json should print JSON");
    let api_key = report["checks"]
        .as_array()
        .expect("checks array")
        .iter()
        .find(|c| c["name"] == "api_key")
        .expect("api_key check")
        .clone();
    assert_eq!(api_key["status"], "ok");

    let shown = env.run(&["config", "show"]);
    assert!(!String::from_utf8_lossy(&shown.stdout).contains("from-dotenv"));
}

#[test]
fn run_without_api_key_fails() {
    let output = run_scribe(&["run"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success(), "run should fail without an API key");
    assert!(
        stderr.contains("API key is missing"),
        "expected missing key error, got:\n{}",
        stderr
    );
}

#[test]
fn bare_invocation_runs_the_pipeline() {
    let output = run_scribe(&[]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("API key is missing"));
}

#[test]
fn run_reports_missing_audio_as_transcription_failure() {
    let env = TestEnv::new();
    env.write_config(&format!(
        "[general]\ndata_dir = {:?}\n",
        env.data_dir().display().to_string()
    ));

    let output = env.run_with_api_key(&["run", "--audio", "missing.wav"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(
        stderr.contains("Transcription error") && stderr.contains("Audio file not found"),
        "expected transcription failure, got:\n{}",
        stderr
    );
    assert!(env.data_dir().join("audio_files").is_dir());
    assert_eq!(
        std::fs::read_dir(env.data_dir().join("articles"))
            .unwrap()
            .count(),
        0
    );
}

#[test]
fn run_with_cached_transcript_reports_generation_failure() {
    let env = TestEnv::new();
    env.write_config(&format!(
        "[general]\ndata_dir = {:?}\n\n[llm]\nendpoint = \"http://127.0.0.1:9/v1beta\"\ntimeout_secs = 5\n",
        env.data_dir().display().to_string()
    ));

    let transcripts = env.data_dir().join("transcripts");
    std::fs::create_dir_all(&transcripts).unwrap();
    std::fs::write(transcripts.join("talk_transcript.txt"), "Hello world.").unwrap();

    let output = env.run_with_api_key(&["run", "--audio", "talk.wav"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(
        stderr.contains("Reusing existing transcript"),
        "expected cached transcript to be used, got:\n{}",
        stderr
    );
    assert!(
        stderr.contains("Generation error") && stderr.contains("Draft failed"),
        "expected generation failure, got:\n{}",
        stderr
    );
}
