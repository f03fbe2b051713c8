//! Stop requests for interactive commands

use colored::Colorize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::warn;

/// What ended an interactive command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopRequest {
    /// Enter pressed on stdin
    Enter,
    /// SIGINT / Ctrl-C
    Interrupt,
}

/// Resolve on Ctrl-C. Never resolves if the handler cannot be installed.
pub async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    eprintln!();
    eprintln!("{} Interrupted", "↓".cyan());
}

/// Resolve when a line is read. Never resolves once input is closed.
pub async fn line_entered<R>(reader: R)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    match lines.next_line().await {
        Ok(Some(_)) => {}
        Ok(None) | Err(_) => std::future::pending::<()>().await,
    }
}

/// Wait for Enter on stdin or Ctrl-C, whichever comes first
pub async fn wait_for_stop() -> StopRequest {
    tokio::select! {
        _ = line_entered(BufReader::new(tokio::io::stdin())) => StopRequest::Enter,
        _ = interrupted() => StopRequest::Interrupt,
    }
}
