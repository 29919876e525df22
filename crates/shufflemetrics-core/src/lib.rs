//! shufflemetrics core: label model, scopes, samples, and the error surface.
//!
//! This crate defines the data contracts shared by the metrics registry, the
//! exposition layer, and producers on the shuffle write path. It carries no
//! runtime or HTTP dependencies so it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `MetricsError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod label;
pub mod sample;
pub mod scope;

/// Shared result type.
pub use error::{MetricsError, Result};
pub use label::{LabelTuple, ServerTag, StorageHost, HOST_LABEL_ALL, LOCAL_STORAGE_HOST};
pub use sample::{MetricValue, Sample};
pub use scope::Scope;
