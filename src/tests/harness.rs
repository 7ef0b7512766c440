//! Shared test doubles: every collaborator seam gets a counting stub so
//! tests can assert exactly how often it was exercised.

use crate::{
    ClientFactory, Dsn, DsnLookup, ErrorSink, ReportClient, ReportEvent, SinkError, SinkResult,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Ambient discovery stub returning a fixed value and counting invocations.
pub struct CountingLookup {
    value: Option<String>,
    calls: AtomicUsize,
}

impl CountingLookup {
    pub fn returning(value: &str) -> Arc<Self> {
        Arc::new(Self {
            value: Some(value.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn empty() -> Arc<Self> {
        Arc::new(Self {
            value: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DsnLookup for CountingLookup {
    fn lookup(&self) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.value.clone()
    }
}

/// Client stub recording every forwarded event; optionally fails each send.
pub struct StubClient {
    events: Mutex<Vec<ReportEvent>>,
    fail_sends: bool,
}

impl StubClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            events: Mutex::new(Vec::new()),
            fail_sends: false,
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            events: Mutex::new(Vec::new()),
            fail_sends: true,
        })
    }

    pub fn received_count(&self) -> usize {
        self.events.lock().len()
    }

    pub fn received_events(&self) -> Vec<ReportEvent> {
        self.events.lock().clone()
    }
}

impl ReportClient for StubClient {
    fn send(&self, event: &ReportEvent) -> SinkResult<()> {
        self.events.lock().push(event.clone());
        if self.fail_sends {
            return Err(SinkError::send("stub transport down"));
        }
        Ok(())
    }
}

/// Factory stub handing out a fixed client, recording the DSN it was given
/// and how many times it ran.
pub struct StubFactory {
    client: Arc<StubClient>,
    fail_construction: bool,
    created: AtomicUsize,
    seen_dsn: Mutex<Option<Dsn>>,
}

impl StubFactory {
    pub fn with_client(client: Arc<StubClient>) -> Arc<Self> {
        Arc::new(Self {
            client,
            fail_construction: false,
            created: AtomicUsize::new(0),
            seen_dsn: Mutex::new(None),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            client: StubClient::new(),
            fail_construction: true,
            created: AtomicUsize::new(0),
            seen_dsn: Mutex::new(None),
        })
    }

    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn seen_dsn(&self) -> Option<Dsn> {
        self.seen_dsn.lock().clone()
    }
}

impl ClientFactory for StubFactory {
    fn create_client(&self, dsn: &Dsn) -> SinkResult<Arc<dyn ReportClient>> {
        self.created.fetch_add(1, Ordering::SeqCst);
        *self.seen_dsn.lock() = Some(dsn.clone());
        if self.fail_construction {
            return Err(SinkError::construction("stub factory refused"));
        }
        Ok(self.client.clone())
    }
}

/// Error sink recording every report as (message, rendered cause).
#[derive(Default)]
pub struct CountingErrorSink {
    reports: Mutex<Vec<(String, Option<String>)>>,
}

impl CountingErrorSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn error_count(&self) -> usize {
        self.reports.lock().len()
    }

    pub fn reports(&self) -> Vec<(String, Option<String>)> {
        self.reports.lock().clone()
    }
}

impl ErrorSink for CountingErrorSink {
    fn report_error(&self, message: &str, cause: Option<&(dyn std::error::Error + 'static)>) {
        self.reports
            .lock()
            .push((message.to_string(), cause.map(|c| c.to_string())));
    }
}
