//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → context.rs (extract/generate request + correlation IDs, attach scope)
//!     → logging.rs (derive per-request Logger, emit structured entries)
//!     → db.rs      (statement hooks log query/execution outcomes)
//!
//! Consumers:
//!     → tracing subscriber (stdout, JSON or human format)
//!     → ObservedEntries recorder (tests)
//! ```
//!
//! # Design Decisions
//! - One Logger per process, derived per request; derivation never mutates
//! - Request ID flows through all subsystems via explicit scope passing
//! - Log message literals are stable for downstream log-based alerting

pub mod context;
pub mod db;
pub mod logging;

pub use context::{RequestScope, RequestScopeLayer, X_CORRELATION_ID, X_REQUEST_ID};
pub use db::{db_exec, db_query, DbLogFn};
pub use logging::{Level, LogEntry, LogSink, Logger, ObservedEntries};
