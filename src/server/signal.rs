// Signal handling module
//
// Supported signals:
// - SIGINT:  Stop (Ctrl+C)
// - SIGTERM: Stop
//
// Non-Unix platforms only get Ctrl+C.

use crate::error::StartupError;

/// Process termination signals, registered up front so failures surface at startup
#[cfg(unix)]
pub struct ShutdownSignal {
    sigint: tokio::signal::unix::Signal,
    sigterm: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl ShutdownSignal {
    /// Register handlers; must be called from within a Tokio runtime
    pub fn register() -> Result<Self, StartupError> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            sigint: signal(SignalKind::interrupt()).map_err(StartupError::Signal)?,
            sigterm: signal(SignalKind::terminate()).map_err(StartupError::Signal)?,
        })
    }

    /// Resolve once SIGINT or SIGTERM arrives
    pub async fn recv(mut self) {
        tokio::select! {
            _ = self.sigint.recv() => tracing::info!("SIGINT received"),
            _ = self.sigterm.recv() => tracing::info!("SIGTERM received"),
        }
    }
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub struct ShutdownSignal;

#[cfg(not(unix))]
impl ShutdownSignal {
    pub fn register() -> Result<Self, StartupError> {
        Ok(Self)
    }

    pub async fn recv(self) {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Ctrl+C received"),
            Err(e) => {
                crate::logger::log_error(&format!("Failed to listen for Ctrl+C: {e}"));
                std::future::pending::<()>().await;
            }
        }
    }
}
