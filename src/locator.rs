//! DSN resolution.
//!
//! The locator decides which connection string an appender uses. An
//! explicitly configured value always wins; only when none is set does the
//! ambient discovery hook run. Discovery never re-runs once an explicit
//! value is present.

use crate::{SinkError, SinkResult};
use std::sync::Arc;

/// Environment variable consulted first by [`EnvDsnLookup`].
pub const DSN_ENV_VAR: &str = "REPORT_SINK_DSN";
/// Fallback environment variable consulted by [`EnvDsnLookup`].
pub const DSN_ENV_VAR_FALLBACK: &str = "REPORT_DSN";

/// Ambient DSN discovery hook.
///
/// Implementors consult process-level configuration sources (environment
/// variables or equivalent) in their own priority order. `None` or an empty
/// string both mean "not found". Injectable so tests can observe whether
/// discovery ran at all.
pub trait DsnLookup: Send + Sync {
    /// Returns the discovered DSN text, or None if no source yields one.
    fn lookup(&self) -> Option<String>;
}

/// Default discovery hook: checks [`DSN_ENV_VAR`], then
/// [`DSN_ENV_VAR_FALLBACK`]. Empty values count as absent.
#[derive(Debug, Default)]
pub struct EnvDsnLookup;

impl DsnLookup for EnvDsnLookup {
    fn lookup(&self) -> Option<String> {
        for var in [DSN_ENV_VAR, DSN_ENV_VAR_FALLBACK] {
            if let Ok(value) = std::env::var(var) {
                if !value.is_empty() {
                    tracing::debug!(var, "DSN discovered from environment");
                    return Some(value);
                }
            }
        }
        None
    }
}

/// Resolves the effective DSN text for an appender.
#[derive(Clone)]
pub struct DsnLocator {
    lookup: Arc<dyn DsnLookup>,
}

impl DsnLocator {
    /// Creates a locator backed by the given discovery hook.
    pub fn new(lookup: Arc<dyn DsnLookup>) -> Self {
        Self { lookup }
    }

    /// Resolves the DSN text, in strict priority order:
    ///
    /// 1. A non-empty `explicit` value is returned unchanged and the
    ///    discovery hook is not invoked.
    /// 2. Otherwise the hook runs; a non-empty result is returned.
    /// 3. Otherwise [`SinkError::DsnNotFound`].
    pub fn resolve(&self, explicit: Option<&str>) -> SinkResult<String> {
        if let Some(dsn) = explicit.filter(|s| !s.is_empty()) {
            return Ok(dsn.to_string());
        }
        match self.lookup.lookup() {
            Some(dsn) if !dsn.is_empty() => Ok(dsn),
            _ => Err(SinkError::DsnNotFound),
        }
    }
}

impl Default for DsnLocator {
    fn default() -> Self {
        Self::new(Arc::new(EnvDsnLookup))
    }
}
