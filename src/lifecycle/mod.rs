//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     Signal received → stop accepting → drain in-flight → log outcome
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger graceful shutdown (first signal only)
//! ```
//!
//! # Design Decisions
//! - Single-shot: one signal, one bounded stop attempt, then return
//! - Shutdown has a deadline; the coordinator returns when it elapses even
//!   if the server has not finished draining

pub mod shutdown;
pub mod signals;

pub use shutdown::{shutdown, stop_server, GracefulServer};
