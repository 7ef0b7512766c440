//! Client factories and the factory registry.
//!
//! Factories are selected by name through a registry that the host builds
//! at startup and injects into each appender. The registry is read-mostly
//! shared state: registrations happen during startup, lookups happen once
//! per appender activation.

use crate::{Dsn, ReportClient, ReportEvent, SinkError, SinkResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry slot used when no factory name is configured.
pub const DEFAULT_FACTORY_NAME: &str = "default";

/// Capability to build a [`ReportClient`] from a parsed DSN.
///
/// Invoked at most once per appender lifecycle, during activation.
pub trait ClientFactory: Send + Sync {
    /// Builds a client for the given DSN. Fails with
    /// [`SinkError::ClientConstruction`] when no usable client can be built
    /// (e.g. an unsupported scheme).
    fn create_client(&self, dsn: &Dsn) -> SinkResult<Arc<dyn ReportClient>>;
}

/// Name-to-factory mapping.
///
/// Built explicitly at application start and passed to each appender,
/// rather than living in hidden static state, so tests stay hermetic.
/// Registration and lookup are safe under concurrent access.
#[derive(Default)]
pub struct FactoryRegistry {
    factories: RwLock<HashMap<String, Arc<dyn ClientFactory>>>,
}

impl FactoryRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` under `name`. Always succeeds; a later
    /// registration under the same name replaces the earlier one.
    pub fn register(&self, name: impl Into<String>, factory: Arc<dyn ClientFactory>) {
        let name = name.into();
        tracing::debug!(factory = %name, "registering client factory");
        self.factories.write().insert(name, factory);
    }

    /// Registers `factory` as the default, used when no name is configured.
    pub fn register_default(&self, factory: Arc<dyn ClientFactory>) {
        self.register(DEFAULT_FACTORY_NAME, factory);
    }

    /// Looks up a factory by name. `None` or an empty name selects the
    /// default slot. A name that was never registered (including a missing
    /// default) is [`SinkError::UnknownFactory`].
    pub fn lookup(&self, name: Option<&str>) -> SinkResult<Arc<dyn ClientFactory>> {
        let name = match name {
            Some(n) if !n.is_empty() => n,
            _ => DEFAULT_FACTORY_NAME,
        };
        self.factories
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| SinkError::UnknownFactory(name.to_string()))
    }
}

/// Built-in default factory.
///
/// Accepts `http`, `https`, and `noop` DSNs and builds a client that emits
/// each forwarded event through `tracing`. It stands in for a real wire
/// transport in hosts that only need local visibility.
#[derive(Debug, Default)]
pub struct LogClientFactory;

impl LogClientFactory {
    const SUPPORTED_SCHEMES: [&'static str; 3] = ["http", "https", "noop"];
}

impl ClientFactory for LogClientFactory {
    fn create_client(&self, dsn: &Dsn) -> SinkResult<Arc<dyn ReportClient>> {
        if !Self::SUPPORTED_SCHEMES.contains(&dsn.scheme.as_str()) {
            return Err(SinkError::construction(format!(
                "unsupported DSN scheme: {}",
                dsn.scheme
            )));
        }
        Ok(Arc::new(LogReportClient {
            project_id: dsn.project_id.clone(),
        }))
    }
}

/// Client built by [`LogClientFactory`]: logs events instead of
/// transmitting them.
struct LogReportClient {
    project_id: String,
}

impl ReportClient for LogReportClient {
    fn send(&self, event: &ReportEvent) -> SinkResult<()> {
        tracing::info!(
            project_id = %self.project_id,
            level = %event.level,
            logger = %event.logger,
            message = %event.message,
            "report event"
        );
        Ok(())
    }
}
