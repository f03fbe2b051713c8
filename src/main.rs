//! voice-notes CLI entry point

use std::process::ExitCode;

use clap::Parser;

use voice_notes::cli::app::{init_tracing, load_merged_config, run_command};
use voice_notes::cli::Cli;
use voice_notes::domain::config::AppConfig;
use voice_notes::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let cli_config = AppConfig {
        notes_dir: cli.notes_dir.clone(),
        ..Default::default()
    };

    let config = load_merged_config(&XdgConfigStore::new(), cli_config).await;
    init_tracing(&config);

    run_command(cli.command, &config).await
}
