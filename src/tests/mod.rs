//! Tests for the report sink core.
//!
//! - `harness.rs`     - counting stubs: lookup, factory, client, error sink
//! - `dsn.rs`         - parsing, validation, round-trip
//! - `locator.rs`     - resolution order and the environment hook
//! - `registry.rs`    - factory registration and lookup
//! - `appender.rs`    - lifecycle, forwarding, fault isolation
//! - `concurrency.rs` - construct-once under contention, multi-thread append

mod appender;
mod concurrency;
mod dsn;
pub(crate) mod harness;
mod locator;
mod registry;
