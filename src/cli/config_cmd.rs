//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, ShareBackend, VALID_LOG_LEVELS};
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    }
}

/// Apply `key = value` to `config` after validating it
fn apply_setting(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(unknown_key(key));
    }

    validate_config_value(key, value)?;

    match key {
        "notes_dir" => config.notes_dir = Some(value.trim().to_string()),
        "share" => config.share = Some(value.parse::<ShareBackend>()?.to_string()),
        "log_level" => config.log_level = Some(value.trim().to_lowercase()),
        _ => return Err(unknown_key(key)),
    }

    Ok(())
}

/// Read `key` from `config`
fn read_setting(config: &AppConfig, key: &str) -> Result<Option<String>, ConfigError> {
    match key {
        "notes_dir" => Ok(config.notes_dir.clone()),
        "share" => Ok(config.share.clone()),
        "log_level" => Ok(config.log_level.clone()),
        _ => Err(unknown_key(key)),
    }
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let mut config = store.load().await?;
    apply_setting(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(unknown_key(key));
    }

    let config = store.load().await?;
    let value = read_setting(&config, key)?;
    presenter.output(value.as_deref().unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = read_setting(&config, key)?;
        presenter.key_value(key, value.as_deref().unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "notes_dir" => {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Value must not be empty".to_string(),
                });
            }
        }
        "share" => {
            value.parse::<ShareBackend>()?;
        }
        "log_level" => {
            let lower = value.trim().to_lowercase();
            if !VALID_LOG_LEVELS.contains(&lower.as_str()) {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: format!(
                        "Invalid value '{}'. Valid options: {}",
                        value,
                        VALID_LOG_LEVELS.join(", ")
                    ),
                });
            }
        }
        _ => {}
    }
    Ok(())
}
