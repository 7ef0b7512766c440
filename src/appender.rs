//! The appender: lifecycle owner and fail-safe event dispatcher.
//!
//! The appender is the single surface the host's logging integration talks
//! to: `set_dsn`, `set_factory_name`, `activate`, `append`. Its central
//! contract is fault isolation — a reporting-infrastructure outage must
//! never take down the application being monitored, so every internal
//! failure is converted into an [`ErrorSink`] report instead of propagating.

use crate::{
    Dsn, DsnLocator, DsnLookup, FactoryRegistry, ReportClient, ReportEvent, SinkResult,
};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Lifecycle state of an [`Appender`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppenderState {
    /// Not yet activated; configuration setters are honored.
    Uninitialized,
    /// Client constructed; events are forwarded.
    Activated,
    /// Activation failed; events are dropped until an explicit [`Appender::reset`].
    Failed,
}

const STATE_UNINITIALIZED: u8 = 0;
const STATE_ACTIVATED: u8 = 1;
const STATE_FAILED: u8 = 2;

/// Channel for reporting the appender's own internal failures.
///
/// Analogous to a logging framework's error handler: the host provides one,
/// the appender reports into it, and nothing ever propagates back through
/// the normal event path.
pub trait ErrorSink: Send + Sync {
    /// Records one internal failure.
    fn report_error(&self, message: &str, cause: Option<&(dyn std::error::Error + 'static)>);
}

/// Default sink: reports through `tracing::error!`.
#[derive(Debug, Default)]
pub struct TracingErrorSink;

impl ErrorSink for TracingErrorSink {
    fn report_error(&self, message: &str, cause: Option<&(dyn std::error::Error + 'static)>) {
        match cause {
            Some(cause) => tracing::error!(%cause, "{message}"),
            None => tracing::error!("{message}"),
        }
    }
}

/// Pre-activation configuration.
#[derive(Default)]
struct AppenderConfig {
    dsn: Option<String>,
    factory_name: Option<String>,
}

/// Owns one lazily-constructed [`ReportClient`] and forwards events to it.
///
/// # Lifecycle
///
/// `Uninitialized → Activated | Failed`. The transition runs at most once:
/// concurrent first-use races are guarded so exactly one client is ever
/// constructed. `Failed` is permanent until an explicit [`reset`].
///
/// # Thread safety
///
/// `append` may be called from arbitrary threads after activation; the
/// steady-state path takes no lock other than the client read lock.
///
/// [`reset`]: Appender::reset
pub struct Appender {
    registry: Arc<FactoryRegistry>,
    locator: DsnLocator,
    error_sink: Arc<dyn ErrorSink>,
    config: Mutex<AppenderConfig>,
    state: AtomicU8,
    /// Guards the `Uninitialized → Activated | Failed` transition only.
    activation: Mutex<()>,
    client: RwLock<Option<Arc<dyn ReportClient>>>,
}

impl Appender {
    /// Creates an appender backed by the given factory registry, with the
    /// environment-variable discovery hook and the tracing error sink.
    pub fn new(registry: Arc<FactoryRegistry>) -> Self {
        Self {
            registry,
            locator: DsnLocator::default(),
            error_sink: Arc::new(TracingErrorSink),
            config: Mutex::new(AppenderConfig::default()),
            state: AtomicU8::new(STATE_UNINITIALIZED),
            activation: Mutex::new(()),
            client: RwLock::new(None),
        }
    }

    /// Replaces the ambient DSN discovery hook.
    pub fn with_lookup(mut self, lookup: Arc<dyn DsnLookup>) -> Self {
        self.locator = DsnLocator::new(lookup);
        self
    }

    /// Replaces the error sink.
    pub fn with_error_sink(mut self, sink: Arc<dyn ErrorSink>) -> Self {
        self.error_sink = sink;
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> AppenderState {
        match self.state.load(Ordering::Acquire) {
            STATE_ACTIVATED => AppenderState::Activated,
            STATE_FAILED => AppenderState::Failed,
            _ => AppenderState::Uninitialized,
        }
    }

    /// Configures an explicit DSN. Honored only before activation.
    pub fn set_dsn(&self, value: impl Into<String>) {
        if self.state.load(Ordering::Acquire) != STATE_UNINITIALIZED {
            tracing::warn!("set_dsn ignored: appender already activated");
            return;
        }
        self.config.lock().dsn = Some(value.into());
    }

    /// Configures the client factory name. Honored only before activation.
    /// Unset or empty means the registry's default factory.
    pub fn set_factory_name(&self, value: impl Into<String>) {
        if self.state.load(Ordering::Acquire) != STATE_UNINITIALIZED {
            tracing::warn!("set_factory_name ignored: appender already activated");
            return;
        }
        self.config.lock().factory_name = Some(value.into());
    }

    /// Resolves the DSN, selects a factory, and constructs the client.
    ///
    /// Idempotent: once the appender has left `Uninitialized`, further
    /// calls return immediately. Concurrent calls construct exactly one
    /// client. Failures transition to `Failed` and are reported to the
    /// error sink; they never propagate to the caller.
    pub fn activate(&self) {
        if self.state.load(Ordering::Acquire) != STATE_UNINITIALIZED {
            return;
        }
        let _guard = self.activation.lock();
        // Re-check: another thread may have completed the transition while
        // we waited on the lock.
        if self.state.load(Ordering::Acquire) != STATE_UNINITIALIZED {
            return;
        }
        match self.build_client() {
            Ok(client) => {
                *self.client.write() = Some(client);
                self.state.store(STATE_ACTIVATED, Ordering::Release);
                tracing::debug!("appender activated");
            }
            Err(e) => {
                self.state.store(STATE_FAILED, Ordering::Release);
                self.error_sink
                    .report_error("Failed to activate report appender", Some(&e));
            }
        }
    }

    fn build_client(&self) -> SinkResult<Arc<dyn ReportClient>> {
        let (dsn_text, factory_name) = {
            let config = self.config.lock();
            (config.dsn.clone(), config.factory_name.clone())
        };
        let resolved = self.locator.resolve(dsn_text.as_deref())?;
        let dsn = Dsn::parse(&resolved)?;
        let factory = self.registry.lookup(factory_name.as_deref())?;
        factory.create_client(&dsn)
    }

    /// Forwards one event to the client.
    ///
    /// In `Activated`, a send failure is caught and reported to the error
    /// sink; it never reaches the caller and does not affect subsequent
    /// events. In `Uninitialized` or `Failed`, the call is a no-op.
    pub fn append(&self, event: &ReportEvent) {
        if self.state.load(Ordering::Acquire) != STATE_ACTIVATED {
            tracing::debug!("append dropped: appender not activated");
            return;
        }
        let client = self.client.read().clone();
        if let Some(client) = client {
            if let Err(e) = client.send(event) {
                self.error_sink
                    .report_error("Failed to forward event to report client", Some(&e));
            }
        }
    }

    /// Clears the client and returns to `Uninitialized`, allowing a host to
    /// reconfigure and re-activate after a `Failed` transition.
    pub fn reset(&self) {
        let _guard = self.activation.lock();
        *self.client.write() = None;
        *self.config.lock() = AppenderConfig::default();
        self.state.store(STATE_UNINITIALIZED, Ordering::Release);
    }
}
