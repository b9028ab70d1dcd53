//! Graceful shutdown coordination.
//!
//! # Responsibilities
//! - Turn the first termination signal into one bounded stop attempt
//! - Report the outcome through the logging interface and return
//!
//! # Design Decisions
//! - Exactly one transition: waiting → shutting down → done; the coordinator
//!   never re-arms signal handling, so a second signal during an in-progress
//!   stop is ignored
//! - The grace period is both handed to the server and enforced externally
//!   with `tokio::time::timeout`, so the coordinator returns on schedule even
//!   if the server ignores its deadline
//! - Stop failure is logged, not escalated; the caller decides what happens
//!   after `shutdown` returns

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use crate::lifecycle::signals;
use crate::observability::logging::Logger;

/// Contract for a server that can be stopped gracefully: stop accepting new
/// work immediately, let in-flight work finish for up to `grace`, then
/// report the outcome.
pub trait GracefulServer {
    type Error: Display;

    fn shutdown(self, grace: Duration) -> impl Future<Output = Result<(), Self::Error>>;
}

/// Block until the first SIGINT or SIGTERM, then stop `server` gracefully
/// within `timeout` and return. The serve loop must run on its own task so
/// that it and this wait progress independently.
pub async fn shutdown<S: GracefulServer>(server: S, timeout: Duration, logger: &Logger) {
    signals::terminated().await;
    stop_server(server, timeout, logger).await;
}

/// Drive one bounded stop attempt immediately, without waiting for a signal.
///
/// Logs the outcome and returns no later than `timeout` plus scheduling
/// overhead, whether the server stopped cleanly, reported an error, or
/// overran its deadline.
pub async fn stop_server<S: GracefulServer>(server: S, timeout: Duration, logger: &Logger) {
    logger.info(format!("shutting down server with {:?} timeout", timeout));

    match tokio::time::timeout(timeout, server.shutdown(timeout)).await {
        Ok(Ok(())) => logger.info("server was shut down gracefully"),
        Ok(Err(err)) => logger.error(format!("error while shutting down server: {}", err)),
        Err(_) => logger.error(format!(
            "error while shutting down server: deadline of {:?} elapsed",
            timeout
        )),
    }
}
