//! API server core: lifecycle-managed HTTP serving with request-scoped
//! structured logging.
//!
//! # Architecture Overview
//! ```text
//!                  ┌──────────────────────────────────────────────┐
//!                  │                  API SERVER                   │
//!                  │                                               │
//!   Client ────────┼─▶ http/server ──▶ handlers                   │
//!                  │        │              │                       │
//!                  │   RequestScopeLayer   │ Logger::with_scope    │
//!                  │   (X-Request-ID /     ▼                       │
//!                  │    X-Correlation-ID)  structured log events   │
//!                  │                                               │
//!   SIGINT/SIGTERM ┼─▶ lifecycle ──▶ bounded graceful stop        │
//!                  │                                               │
//!                  │   config: TOML schema + loader                │
//!                  └──────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use http::{HttpServer, ServerHandle};
pub use lifecycle::GracefulServer;
pub use observability::Logger;
