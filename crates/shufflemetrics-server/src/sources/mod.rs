//! Fixed-catalog metric sources behind the `runtime`, `rpc`, and `transport`
//! scopes.
//!
//! Their series set is a constant of the build: every series exists from
//! `init` on, so entry counts only change when the catalog itself does.

pub mod call;
pub mod rpc;
pub mod runtime;
pub mod transport;

pub use call::{CallFamilyNames, CallKind, CallMetrics};
pub use rpc::RpcMethod;
pub use runtime::RuntimeMetrics;
pub use transport::TransportRequest;
