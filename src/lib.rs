//! # report-sink
//!
//! Configuration-and-dispatch core for an error-reporting client: resolve a
//! DSN, pick a client factory by name, construct the client exactly once,
//! and forward captured events to it without ever letting a reporting
//! failure escape into the host application.
//!
//! # Core Invariants
//!
//! 1. **Explicit-wins resolution**: a configured DSN always beats ambient
//!    discovery, and discovery never runs when an explicit value is set
//! 2. **Construct-once**: concurrent activation races build exactly one
//!    client per appender
//! 3. **Fault isolation**: failures during activation or delivery are
//!    reported to the [`ErrorSink`], never propagated to the host
//!
//! # Architecture
//!
//! ```text
//! host logging layer -> Appender -> ReportClient -> remote collector
//!                          |
//!                          +-> DsnLocator -> Dsn::parse
//!                          +-> FactoryRegistry -> ClientFactory
//!                          +-> ErrorSink (internal failures)
//! ```
//!
//! The wire transport behind [`ReportClient`] is out of scope here; this
//! crate stops at handing a structured [`ReportEvent`] to the client.

pub mod appender;
pub mod client;
pub mod dsn;
pub mod error;
pub mod factory;
pub mod locator;

#[cfg(test)]
mod tests;

pub use appender::{Appender, AppenderState, ErrorSink, TracingErrorSink};
pub use client::{Level, ReportClient, ReportEvent};
pub use dsn::Dsn;
pub use error::{SinkError, SinkResult};
pub use factory::{ClientFactory, FactoryRegistry, LogClientFactory, DEFAULT_FACTORY_NAME};
pub use locator::{DsnLocator, DsnLookup, EnvDsnLookup, DSN_ENV_VAR, DSN_ENV_VAR_FALLBACK};
