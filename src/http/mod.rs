//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: trace, timeout, request scope)
//!     → handlers (log through a scope-derived Logger)
//!     → response to client
//!
//! Stop path:
//!     ServerHandle (watch) → serve loop stops accepting → drain → oneshot
//! ```

pub mod server;

pub use server::{HttpServer, ServerHandle, StopError};
