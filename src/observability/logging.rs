//! Structured logging core.
//!
//! # Responsibilities
//! - Provide an immutable `Logger` handle over a pluggable structured backend
//! - Derive per-request loggers carrying correlation identifiers
//! - Provide an in-memory recording backend for tests
//!
//! # Design Decisions
//! - Production backend forwards to the `tracing` macros; swapping the sink
//!   swaps the backend without touching call sites
//! - A logger is read-only after construction; derivation allocates a new
//!   field set instead of mutating shared state, so no locking is needed on
//!   the request path

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::observability::context::RequestScope;

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// A single structured log entry: severity, message, key/value fields.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    pub message: String,
    pub fields: Vec<(&'static str, String)>,
}

impl LogEntry {
    /// Look up a field value by key.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A structured logging backend. Receives fully assembled entries.
pub trait LogSink: Send + Sync {
    fn log(&self, entry: LogEntry);
}

/// Default backend: emits entries through the `tracing` macros.
///
/// Attached fields are rendered logfmt-style into a single `fields`
/// attribute so the active subscriber controls the final encoding.
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, entry: LogEntry) {
        let fields = FieldFmt(&entry.fields);
        match entry.level {
            Level::Info => tracing::info!(fields = %fields, "{}", entry.message),
            Level::Error => tracing::error!(fields = %fields, "{}", entry.message),
        }
    }
}

struct FieldFmt<'a>(&'a [(&'static str, String)]);

impl fmt::Display for FieldFmt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

/// In-memory, thread-safe recorder of emitted entries. Test backend.
#[derive(Clone, Default)]
pub struct ObservedEntries {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl ObservedEntries {
    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all recorded entries, in emission order.
    pub fn all(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }

    /// Atomically drain the recorder, returning exactly the entries present
    /// at the moment of the drain and leaving it empty.
    pub fn take_all(&self) -> Vec<LogEntry> {
        std::mem::take(&mut *self.entries.lock().unwrap())
    }
}

impl LogSink for ObservedEntries {
    fn log(&self, entry: LogEntry) {
        self.entries.lock().unwrap().push(entry);
    }
}

struct LoggerInner {
    sink: Arc<dyn LogSink>,
    fields: Vec<(&'static str, String)>,
}

/// Immutable handle over a structured backend plus attached fields.
///
/// Cloning is cheap (shared inner state). Construct once at process start
/// and pass explicitly; derive per-request handles with [`Logger::with_scope`].
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

impl Logger {
    /// Create a logger over the default `tracing` backend.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingSink))
    }

    /// Create a logger over a caller-supplied backend.
    pub fn with_sink(sink: Arc<dyn LogSink>) -> Self {
        Self {
            inner: Arc::new(LoggerInner {
                sink,
                fields: Vec::new(),
            }),
        }
    }

    /// Create a logger backed by an in-memory recorder, for tests.
    pub fn for_test() -> (Self, ObservedEntries) {
        let entries = ObservedEntries::default();
        (Self::with_sink(Arc::new(entries.clone())), entries)
    }

    /// Derive a logger carrying the identifiers of a request scope.
    ///
    /// With no scope this is a no-op fast path: the returned handle shares
    /// the receiver's inner state. With a scope, a new independent instance
    /// is returned with `request_id` (always) and `correlation_id` (when the
    /// caller supplied one) attached; the receiver is left unchanged.
    pub fn with_scope(&self, scope: Option<&RequestScope>) -> Logger {
        let Some(scope) = scope else {
            return Logger {
                inner: Arc::clone(&self.inner),
            };
        };
        let mut derived = self.with_field("request_id", scope.request_id());
        if let Some(correlation_id) = scope.correlation_id() {
            derived = derived.with_field("correlation_id", correlation_id);
        }
        derived
    }

    /// Derive a logger with one extra field attached.
    pub fn with_field(&self, key: &'static str, value: impl Into<String>) -> Logger {
        let mut fields = self.inner.fields.clone();
        fields.push((key, value.into()));
        Logger {
            inner: Arc::new(LoggerInner {
                sink: Arc::clone(&self.inner.sink),
                fields,
            }),
        }
    }

    /// Log a message at INFO level.
    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message.into());
    }

    /// Log a message at ERROR level.
    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message.into());
    }

    fn log(&self, level: Level, message: String) {
        self.inner.sink.log(LogEntry {
            level,
            message,
            fields: self.inner.fields.clone(),
        });
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderMap;

    fn scope_from(request_id: &str, correlation_id: &str) -> RequestScope {
        let mut headers = HeaderMap::new();
        if !request_id.is_empty() {
            headers.insert("x-request-id", request_id.parse().unwrap());
        }
        if !correlation_id.is_empty() {
            headers.insert("x-correlation-id", correlation_id.parse().unwrap());
        }
        RequestScope::from_headers(&headers)
    }

    #[test]
    fn test_new_constructs() {
        let logger = Logger::new();
        logger.info("startup");
    }

    #[test]
    fn test_with_sink_uses_supplied_backend() {
        let entries = ObservedEntries::default();
        let logger = Logger::with_sink(Arc::new(entries.clone()));
        logger.info("recorded");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.all()[0].message, "recorded");
    }

    #[test]
    fn test_observed_entries_count_and_drain() {
        let (logger, entries) = Logger::for_test();
        assert_eq!(entries.len(), 0);

        logger.info("msg 1");
        logger.info("msg 2");
        logger.info("msg 3");
        assert_eq!(entries.len(), 3);

        let drained = entries.take_all();
        let messages: Vec<_> = drained.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["msg 1", "msg 2", "msg 3"]);
        assert_eq!(entries.len(), 0);

        logger.info("msg 4");
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_with_scope_none_is_identity() {
        let (logger, _entries) = Logger::for_test();
        let same = logger.with_scope(None);
        assert!(Arc::ptr_eq(&logger.inner, &same.inner));
    }

    #[test]
    fn test_with_scope_attaches_identifiers() {
        let (logger, entries) = Logger::for_test();
        let scope = scope_from("abc", "123");

        let derived = logger.with_scope(Some(&scope));
        assert!(!Arc::ptr_eq(&logger.inner, &derived.inner));

        derived.info("scoped");
        let entry = &entries.take_all()[0];
        assert_eq!(entry.field("request_id"), Some("abc"));
        assert_eq!(entry.field("correlation_id"), Some("123"));

        // The receiver must be unchanged by the derivation.
        logger.info("unscoped");
        let entry = &entries.take_all()[0];
        assert_eq!(entry.field("request_id"), None);
        assert_eq!(entry.field("correlation_id"), None);
    }

    #[test]
    fn test_with_scope_omits_absent_correlation_id() {
        let (logger, entries) = Logger::for_test();
        let scope = scope_from("abc", "");

        logger.with_scope(Some(&scope)).info("scoped");
        let entry = &entries.take_all()[0];
        assert_eq!(entry.field("request_id"), Some("abc"));
        assert_eq!(entry.field("correlation_id"), None);
    }

    #[test]
    fn test_concurrent_appends_are_serialized() {
        let (logger, entries) = Logger::for_test();
        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let logger = logger.clone();
                std::thread::spawn(move || {
                    for i in 0..100 {
                        logger.info(format!("worker {} msg {}", worker, i));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(entries.len(), 800);
        assert_eq!(entries.take_all().len(), 800);
        assert_eq!(entries.len(), 0);
    }

    #[test]
    fn test_levels_recorded() {
        let (logger, entries) = Logger::for_test();
        logger.info("fine");
        logger.error("broken");
        let all = entries.all();
        assert_eq!(all[0].level, Level::Info);
        assert_eq!(all[1].level, Level::Error);
    }
}
