//! Application wiring for the desktop CLI

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::application::ports::ConfigStore;
use crate::application::{
    MemoError, NoteSharer, NoteStore, PermissionGate, PlaybackController, RecordingController,
};
use crate::domain::config::AppConfig;
use crate::domain::ConfigError;
use crate::infrastructure::{
    create_share_sheet, CpalMicrophonePermission, CpalRecorder, FsNoteStorage, RodioPlayer,
    XdgConfigStore,
};

use super::args::{Commands, RecordOptions};
use super::config_cmd::handle_config_command;
use super::notes_cmd::{handle_delete, handle_list, handle_play, handle_share};
use super::presenter::Presenter;
use super::record_cmd::record_note;
use super::signals::{interrupted, wait_for_stop};

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable overriding the note directory
pub const NOTES_DIR_ENV: &str = "VOICE_NOTES_DIR";

/// Settings taken from the environment
pub fn env_config() -> AppConfig {
    AppConfig {
        notes_dir: env::var(NOTES_DIR_ENV).ok().filter(|s| !s.trim().is_empty()),
        ..Default::default()
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config<S: ConfigStore>(store: &S, cli_config: AppConfig) -> AppConfig {
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            Presenter::new().warn(&format!("Ignoring config file: {}", e));
            AppConfig::empty()
        }
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config)
}

/// Install the stderr log subscriber. RUST_LOG wins over the config level.
pub fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level_or_default()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Exit code for a failed command. Bad user input is a usage error.
fn exit_code(err: &MemoError) -> u8 {
    match err {
        MemoError::InvalidName(_) => EXIT_USAGE_ERROR,
        _ => EXIT_ERROR,
    }
}

/// Exit code for a failed `config` command
fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::ValidationError { .. } => EXIT_USAGE_ERROR,
        _ => EXIT_ERROR,
    }
}

/// Report a command result and turn it into an exit code
fn finish(result: Result<(), MemoError>, presenter: &Presenter) -> ExitCode {
    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(MemoError::ShareUnavailable) => {
            presenter.warn(&MemoError::ShareUnavailable.to_string());
            ExitCode::from(EXIT_ERROR)
        }
        Err(e) => {
            presenter.error(&format!("{}: {}", e.title(), e));
            ExitCode::from(exit_code(&e))
        }
    }
}

fn note_store(config: &AppConfig) -> NoteStore<FsNoteStorage> {
    NoteStore::new(FsNoteStorage::new(), config.notes_dir_or_default())
}

/// Record one note with the microphone
pub async fn run_record(options: RecordOptions, config: &AppConfig) -> ExitCode {
    let mut presenter = Presenter::new();

    let store = Arc::new(note_store(config));
    store.load_all().await;

    let gate = Arc::new(PermissionGate::new(CpalMicrophonePermission::new()));
    let controller = RecordingController::new(CpalRecorder::new(), gate, store);

    let result = record_note(&controller, &options, &mut presenter, wait_for_stop()).await;
    finish(result.map(|_| ()), &presenter)
}

/// Run any command other than `record`
pub async fn run_command(command: Commands, config: &AppConfig) -> ExitCode {
    let mut presenter = Presenter::new();

    let result = match command {
        Commands::Record { name, discard } => {
            return run_record(RecordOptions { name, discard }, config).await;
        }
        Commands::Config { action } => {
            let store = XdgConfigStore::new();
            return match handle_config_command(action, &store, &presenter).await {
                Ok(()) => ExitCode::from(EXIT_SUCCESS),
                Err(e) => {
                    presenter.error(&e.to_string());
                    ExitCode::from(config_exit_code(&e))
                }
            };
        }
        Commands::List { query } => handle_list(&note_store(config), query.as_deref(), &presenter)
            .await
            .map(|_| ()),
        Commands::Play { name } => {
            let playback = PlaybackController::new(RodioPlayer::new());
            handle_play(
                &note_store(config),
                &playback,
                &name,
                &mut presenter,
                interrupted(),
            )
            .await
        }
        Commands::Delete { name } => handle_delete(&note_store(config), &name, &presenter).await,
        Commands::Share { name } => {
            let sharer = NoteSharer::new(create_share_sheet(config.share_or_default()));
            handle_share(&note_store(config), &sharer, &name, &presenter).await
        }
    };

    finish(result, &presenter)
}
