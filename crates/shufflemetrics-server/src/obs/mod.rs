//! In-process metric primitives.
//!
//! Families keep their series in a `DashMap` keyed by ordered label tuples.
//! Series are created lazily on first reference and remembered in creation
//! order so snapshots are deterministic. Cells are plain atomics.

pub mod counter;
pub mod gauge;
mod series;

pub use counter::{CounterHandle, LabeledCounter};
pub use gauge::{Gauge, GaugeVec};
