//! # Stopping a race on a termination signal.
//!
//! [`Supervisor::run`](super::Supervisor::run) races the double barrier against
//! [`shutdown_requested`]. When the signal wins:
//!
//! ```text
//! signal ─► publish ShutdownRequested
//!        ─► cancel the runtime token (each sort task holds a child token)
//!        ─► wait up to Config::grace for the sort tasks to return
//!        ─► abort whatever is still running
//!        ─► RuntimeError::Canceled { stuck = names of the aborted tasks }
//! ```
//!
//! On unix any of SIGINT, SIGTERM or SIGQUIT counts; elsewhere only Ctrl-C is watched.

use std::io;

/// Resolves once the process receives a termination signal.
///
/// If the handlers cannot be installed the future never resolves, and the race runs to
/// completion as if no signal was sent.
pub async fn shutdown_requested() {
    if first_signal().await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn first_signal() -> io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut streams = [
        SignalKind::interrupt(),
        SignalKind::terminate(),
        SignalKind::quit(),
    ]
    .into_iter()
    .map(signal)
    .collect::<io::Result<Vec<_>>>()?;

    futures::future::select_all(streams.iter_mut().map(|s| Box::pin(s.recv()))).await;
    Ok(())
}

#[cfg(not(unix))]
async fn first_signal() -> io::Result<()> {
    tokio::signal::ctrl_c().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_stays_pending_without_a_signal() {
        let waited = tokio::time::timeout(Duration::from_millis(20), shutdown_requested()).await;
        assert!(waited.is_err());
    }
}
