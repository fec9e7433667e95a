//! Process signals that end the server.

use std::fmt;

use anyhow::{Context, Result};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Which signal asked the process to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    Interrupt,
    Terminate,
}

impl fmt::Display for Shutdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Interrupt => "Ctrl+C",
            Self::Terminate => "SIGTERM",
        })
    }
}

/// Signal handlers, installed before the server binds.
struct Listener {
    #[cfg(unix)]
    terminate: signal::unix::Signal,
}

impl Listener {
    #[cfg(unix)]
    fn install() -> Result<Self> {
        let terminate = signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("failed to install SIGTERM handler")?;
        Ok(Self { terminate })
    }

    #[cfg(not(unix))]
    #[allow(clippy::unnecessary_wraps)]
    fn install() -> Result<Self> {
        Ok(Self {})
    }

    #[cfg(unix)]
    async fn recv(mut self) -> Result<Shutdown> {
        tokio::select! {
            res = signal::ctrl_c() => {
                res.context("failed to listen for Ctrl+C")?;
                Ok(Shutdown::Interrupt)
            }
            _ = self.terminate.recv() => Ok(Shutdown::Terminate),
        }
    }

    #[cfg(not(unix))]
    #[allow(clippy::unused_self)]
    async fn recv(self) -> Result<Shutdown> {
        signal::ctrl_c()
            .await
            .context("failed to listen for Ctrl+C")?;
        Ok(Shutdown::Interrupt)
    }
}

/// A token that is cancelled on the first Ctrl+C or SIGTERM.
///
/// Must be called from inside the tokio runtime.
///
/// # Errors
/// Returns an error if the SIGTERM handler cannot be installed.
pub fn shutdown_token() -> Result<CancellationToken> {
    let listener = Listener::install()?;
    let token = CancellationToken::new();
    let cancel = token.clone();

    tokio::spawn(async move {
        match listener.recv().await {
            Ok(received) => {
                info!(signal = %received, "Shutdown requested, draining in-flight requests");
                cancel.cancel();
            }
            Err(e) => error!(error = %e, "Signal listener failed; graceful shutdown unavailable"),
        }
    });

    Ok(token)
}
