//! Top-level facade crate for shufflemetrics.
//!
//! Re-exports core types and the server library so users can depend on a single crate.

pub mod core {
    pub use shufflemetrics_core::*;
}

pub mod server {
    pub use shufflemetrics_server::*;
}
