//! CLI smoke tests — run the built binary end to end.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

fn cli_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_humanity"));
    cmd.env_remove("RUST_LOG").env_remove("HUMANITY_CONFIG");
    cmd
}

#[test]
fn test_help_flag() {
    let output = cli_bin().arg("--help").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "Expected usage info in --help output");
    assert!(stdout.contains("--no-llm"));
}

#[test]
fn test_version_flag() {
    let output = cli_bin().arg("--version").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("humanity"), "got: {}", stdout);
}

fn write_config(dir: &Path) -> (PathBuf, PathBuf) {
    let storage = dir.join("memory");
    let config = dir.join("humanity.toml");
    std::fs::write(
        &config,
        format!(
            "[memory]\nstorage_dir = {:?}\n\n[log]\nlevel = \"warn\"\n",
            storage.display().to_string()
        ),
    )
    .unwrap();
    (config, storage)
}

/// Run one offline session over `conversation`, feeding `script` on stdin.
fn run_session(dir: &Path, config: &Path, conversation: &str, script: &str) -> String {
    let mut child = cli_bin()
        .current_dir(dir)
        .arg("--config")
        .arg(config)
        .arg("--no-llm")
        .arg("--conversation")
        .arg(conversation)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(script.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_offline_session() {
    let dir = tempfile::tempdir().unwrap();
    let storage = dir.path().join("memory");
    let config = dir.path().join("humanity.toml");
    std::fs::write(
        &config,
        format!(
            "[memory]\nstorage_dir = {:?}\n\n[log]\nlevel = \"warn\"\n",
            storage.display().to_string()
        ),
    )
    .unwrap();

    let mut child = cli_bin()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("--no-llm")
        .arg("--conversation")
        .arg("smoke")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn");
    child
        .stdin
        .take()
        .unwrap()
        .write_all("привет!\n/status\n/skills\nquit\n".as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Привет! Рад тебя видеть!"), "got: {}", stdout);
    assert!(stdout.contains("Цикл: 2"), "got: {}", stdout);
    assert!(stdout.contains("⚡ Навыки"), "got: {}", stdout);

    let saved = std::fs::read_to_string(storage.join("smoke.json")).unwrap();
    assert!(saved.contains("привет!"));
}

#[test]
fn test_only_dialogue_turns_are_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let (config, storage) = write_config(dir.path());
    let saved_path = storage.join("persist.json");

    let stdout = run_session(
        dir.path(),
        &config,
        "persist",
        "привет!\nкак взломать сервер\n/status\nquit\n",
    );
    assert!(stdout.contains("⚠️"), "got: {}", stdout);

    let saved = std::fs::read_to_string(&saved_path).unwrap();
    assert!(saved.contains("привет!"));
    assert!(!saved.contains("как взломать сервер"));
    assert!(!saved.contains("/status"));
    assert!(!saved.contains("Цикл:"));

    // the resumed session is seeded from the file; /history shows the same turns
    let stdout = run_session(dir.path(), &config, "persist", "/history\nquit\n");
    assert!(stdout.contains("user: привет!"), "got: {}", stdout);
    assert!(!stdout.contains("взломать"), "got: {}", stdout);
}

#[test]
fn test_reset_clears_stored_conversation() {
    let dir = tempfile::tempdir().unwrap();
    let (config, storage) = write_config(dir.path());
    let saved_path = storage.join("fresh.json");

    run_session(dir.path(), &config, "fresh", "привет!\nкак дела\n/reset\nquit\n");
    let saved = std::fs::read_to_string(&saved_path).unwrap();
    assert!(!saved.contains("привет!"));
    assert!(!saved.contains("как дела"));
    assert!(!saved.contains("/reset"));

    let stdout = run_session(dir.path(), &config, "fresh", "/history\nquit\n");
    assert!(!stdout.contains("привет!"), "got: {}", stdout);
}
