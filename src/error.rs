//! Error types for DSN resolution, factory dispatch, and event delivery.

use thiserror::Error;

/// Error type for the report sink core.
///
/// Every variant raised during `Appender::activate` or `Appender::append`
/// is caught at the appender boundary and reported to the configured
/// [`ErrorSink`](crate::ErrorSink); none of them propagate to the host.
#[derive(Error, Debug)]
pub enum SinkError {
    /// The connection string is missing a scheme, public key, or host.
    #[error("Malformed DSN: {0}")]
    MalformedDsn(String),

    /// No explicit DSN was configured and no ambient source provided one.
    #[error("No DSN configured and no ambient source provided one")]
    DsnNotFound,

    /// The configured factory name was never registered.
    #[error("Unknown client factory: {0}")]
    UnknownFactory(String),

    /// A factory failed to build a usable client.
    #[error("Client construction failed: {0}")]
    ClientConstruction(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The client failed to transmit an event.
    #[error("Client send failed: {0}")]
    ClientSend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SinkError {
    /// Wraps an underlying cause as a construction failure.
    pub fn construction(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::ClientConstruction(cause.into())
    }

    /// Wraps an underlying cause as a send failure.
    pub fn send(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::ClientSend(cause.into())
    }
}

/// Result type alias using SinkError.
pub type SinkResult<T> = Result<T, SinkError>;
