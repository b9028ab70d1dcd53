//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router and wire up middleware (tracing, timeout,
//!   request scope)
//! - Serve connections until told to stop
//! - Expose a handle the shutdown coordinator can drive
//!
//! # Design Decisions
//! - Stop is channel-triggered: the handle flips a watch channel, the serve
//!   loop stops accepting and drains, then reports completion on a oneshot
//! - The serve loop owns the listener; the handle owns nothing but channels,
//!   so the two sides can live on different tasks

use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Extension, Json, Router};
use serde_json::json;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, watch};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::lifecycle::GracefulServer;
use crate::observability::context::{RequestScope, RequestScopeLayer};
use crate::observability::logging::Logger;

/// Application state injected into handlers.
#[derive(Clone)]
struct AppState {
    logger: Logger,
}

/// The HTTP server. Owns the router; consumed by [`HttpServer::run`].
pub struct HttpServer {
    router: Router,
    stop_rx: watch::Receiver<bool>,
    done_tx: oneshot::Sender<()>,
}

/// Stop handle for a running [`HttpServer`].
///
/// Implements [`GracefulServer`]: triggering it makes the serve loop stop
/// accepting connections immediately and drain in-flight requests.
pub struct ServerHandle {
    stop_tx: watch::Sender<bool>,
    done_rx: oneshot::Receiver<()>,
}

/// Error produced when a stop attempt cannot observe the serve loop finish.
#[derive(Debug, Error)]
pub enum StopError {
    /// The serve task went away without signalling completion.
    #[error("server task terminated unexpectedly")]
    ServerGone,
}

impl HttpServer {
    /// Build the server and its stop handle from configuration.
    pub fn new(config: &ServerConfig, logger: Logger) -> (Self, ServerHandle) {
        let (stop_tx, stop_rx) = watch::channel(false);
        let (done_tx, done_rx) = oneshot::channel();

        let router = Self::build_router(config, AppState { logger });

        (
            Self {
                router,
                stop_rx,
                done_tx,
            },
            ServerHandle { stop_tx, done_rx },
        )
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/healthz", get(health_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.request_timeout_secs,
            )))
            .layer(RequestScopeLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Serve connections on the given listener. Blocks until the stop handle
    /// is triggered and in-flight requests have drained.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let mut stop_rx = self.stop_rx;
        let result = axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.changed().await;
            })
            .await;

        tracing::info!("HTTP server stopped");
        let _ = self.done_tx.send(());
        result
    }
}

impl GracefulServer for ServerHandle {
    type Error = StopError;

    async fn shutdown(self, _grace: Duration) -> Result<(), StopError> {
        // A send error means the serve loop is already gone; the oneshot
        // below settles which way it went.
        let _ = self.stop_tx.send(true);
        self.done_rx.await.map_err(|_| StopError::ServerGone)
    }
}

async fn health_handler(
    State(state): State<AppState>,
    Extension(scope): Extension<RequestScope>,
) -> impl IntoResponse {
    state.logger.with_scope(Some(&scope)).info("health check");
    Json(json!({ "status": "ok" }))
}
