//! Shuffle-server metrics library entry.
//!
//! This crate wires the metric primitives, the server-scope catalog, the
//! fixed runtime/rpc/transport sources, storage write accounting, and the
//! JSON exposition endpoints. It is consumed by the binary (`main.rs`), by
//! producers on the shuffle write path, and by integration tests.

pub mod accounting;
pub mod app_state;
pub mod catalog;
pub mod config;
pub mod obs;
pub mod ops;
pub mod registry;
pub mod router;
pub mod sources;

pub use accounting::StorageWriteAccounting;
pub use registry::MetricsRegistry;
