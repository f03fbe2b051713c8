//! Error scenario integration tests

use std::path::Path;
use std::process::{Command, Output};

use voice_notes::cli::{EXIT_ERROR, EXIT_USAGE_ERROR};

fn voice_notes_bin(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_voice-notes"));
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("XDG_DATA_HOME", home.join(".local/share"))
        .env_remove("VOICE_NOTES_DIR");
    cmd
}

fn run(cmd: &mut Command) -> Output {
    cmd.output().expect("Failed to execute command")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn missing_subcommand_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    let output = run(&mut voice_notes_bin(home.path()));

    assert_eq!(output.status.code(), Some(EXIT_USAGE_ERROR as i32));
}

#[test]
fn record_name_with_discard_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    let output = run(voice_notes_bin(home.path()).args(["record", "--name", "a", "--discard"]));

    assert_eq!(output.status.code(), Some(EXIT_USAGE_ERROR as i32));
}

#[test]
fn record_with_unusable_name_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    let notes = tempfile::tempdir().unwrap();
    let output = run(voice_notes_bin(home.path())
        .args(["record", "--name", " ... ", "--notes-dir"])
        .arg(notes.path()));

    assert_eq!(output.status.code(), Some(EXIT_USAGE_ERROR as i32));
    assert!(stderr(&output).contains("Invalid name"), "got: {}", stderr(&output));
}

#[test]
fn config_get_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    let output = run(voice_notes_bin(home.path()).args(["config", "get", "api_key"]));

    assert_eq!(output.status.code(), Some(EXIT_USAGE_ERROR as i32));
    assert!(
        stderr(&output).contains("Unknown key"),
        "Expected error about unknown key, got: {}",
        stderr(&output)
    );
}

#[test]
fn config_set_invalid_share_backend() {
    let home = tempfile::tempdir().unwrap();
    let output = run(voice_notes_bin(home.path()).args(["config", "set", "share", "airdrop"]));

    assert_eq!(output.status.code(), Some(EXIT_USAGE_ERROR as i32));
    let err = stderr(&output);
    assert!(err.contains("clipboard") && err.contains("none"), "got: {}", err);
}

#[test]
fn config_init_twice_fails() {
    let home = tempfile::tempdir().unwrap();
    assert!(run(voice_notes_bin(home.path()).args(["config", "init"]))
        .status
        .success());

    let output = run(voice_notes_bin(home.path()).args(["config", "init"]));
    assert_eq!(output.status.code(), Some(EXIT_ERROR as i32));
    assert!(stderr(&output).contains("already exists"), "got: {}", stderr(&output));
}

#[test]
fn play_missing_note() {
    let home = tempfile::tempdir().unwrap();
    let notes = tempfile::tempdir().unwrap();
    let output = run(voice_notes_bin(home.path())
        .args(["play", "Nope", "--notes-dir"])
        .arg(notes.path()));

    assert_eq!(output.status.code(), Some(EXIT_ERROR as i32));
    assert!(stderr(&output).contains("No note named \"Nope\""));
}

#[test]
fn delete_missing_note() {
    let home = tempfile::tempdir().unwrap();
    let notes = tempfile::tempdir().unwrap();
    let output = run(voice_notes_bin(home.path())
        .args(["delete", "Nope", "--notes-dir"])
        .arg(notes.path()));

    assert_eq!(output.status.code(), Some(EXIT_ERROR as i32));
    assert!(stderr(&output).contains("Not found"));
}

#[test]
fn share_when_disabled() {
    let home = tempfile::tempdir().unwrap();
    let notes = tempfile::tempdir().unwrap();
    std::fs::write(notes.path().join("Note 1"), b"audio").unwrap();

    assert!(run(voice_notes_bin(home.path()).args(["config", "set", "share", "none"]))
        .status
        .success());

    let output = run(voice_notes_bin(home.path())
        .args(["share", "Note 1", "--notes-dir"])
        .arg(notes.path()));

    assert_eq!(output.status.code(), Some(EXIT_ERROR as i32));
    assert!(stderr(&output).contains("not available"), "got: {}", stderr(&output));
}

#[test]
fn play_undecodable_note() {
    let home = tempfile::tempdir().unwrap();
    let notes = tempfile::tempdir().unwrap();
    std::fs::write(notes.path().join("Broken"), b"not audio at all").unwrap();

    let output = run(voice_notes_bin(home.path())
        .args(["play", "Broken", "--notes-dir"])
        .arg(notes.path()));

    assert_eq!(output.status.code(), Some(EXIT_ERROR as i32));
    assert!(stderr(&output).contains("Playback failed"), "got: {}", stderr(&output));
}
