//! OS signal handling.
//!
//! # Responsibilities
//! - Register handlers for the two termination signals (SIGINT, SIGTERM)
//! - Suspend until the first one arrives; every other signal is ignored
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe, buffered delivery: a signal
//!   arriving before the await is not lost)
//! - Handler installation failure is a programmer error, not a runtime
//!   condition

/// Wait for the first termination signal (SIGINT or SIGTERM on unix,
/// interrupt only elsewhere). Event-driven: costs nothing while idle.
pub async fn terminated() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut term =
            signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result.expect("failed to install interrupt handler");
            }
            _ = term.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install interrupt handler");
    }
}
