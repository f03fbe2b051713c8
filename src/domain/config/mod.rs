//! Configuration domain module

mod app_config;

pub use app_config::{
    default_notes_dir, AppConfig, ShareBackend, APP_DIR_NAME, DEFAULT_LOG_LEVEL, VALID_LOG_LEVELS,
};
