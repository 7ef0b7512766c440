//! Structured events and the client capability contract.

use crate::SinkResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Severity of a reported event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Fine-grained diagnostic events.
    Debug,
    /// Routine informational events.
    Info,
    /// Suspicious but non-fatal conditions.
    Warning,
    /// Failures that should reach the collector.
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
        };
        f.write_str(s)
    }
}

/// A captured log/error event, forwarded verbatim to the client.
///
/// Produced by the host's logging integration; the core treats it as an
/// immutable value and never inspects or rewrites its contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEvent {
    /// Event severity.
    pub level: Level,
    /// Rendered message body.
    pub message: String,
    /// Name of the logger that produced the event.
    pub logger: String,
    /// Capture time.
    pub timestamp: DateTime<Utc>,
    /// Name of the producing thread, when known.
    pub thread_name: Option<String>,
    /// Additional structured context.
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl ReportEvent {
    /// Creates an event stamped with the current time and thread name.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            logger: String::new(),
            timestamp: Utc::now(),
            thread_name: std::thread::current().name().map(String::from),
            fields: BTreeMap::new(),
        }
    }

    /// Sets the producing logger name.
    pub fn with_logger(mut self, logger: impl Into<String>) -> Self {
        self.logger = logger.into();
        self
    }

    /// Attaches a structured context field.
    pub fn with_field(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }
}

/// Capability to transmit a structured event to the remote collector.
///
/// The transport behind an implementation is its own concern; the appender
/// only requires that failures come back as errors rather than panics, so
/// they can be isolated and reported without disturbing the host.
pub trait ReportClient: Send + Sync {
    /// Transmits one event. Failures surface as
    /// [`SinkError::ClientSend`](crate::SinkError::ClientSend).
    fn send(&self, event: &ReportEvent) -> SinkResult<()>;
}
