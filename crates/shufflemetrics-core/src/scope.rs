//! Exposition scopes.

use std::fmt;
use std::str::FromStr;

use crate::error::{MetricsError, Result};

/// One of the four independently addressable snapshot views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Shuffle-server counters and gauges; grows with write traffic.
    Server,
    /// Process runtime view (fixed catalog).
    Runtime,
    /// RPC server view (fixed catalog).
    Rpc,
    /// Data transport view (fixed catalog).
    Transport,
}

impl Scope {
    pub const ALL: [Scope; 4] = [Scope::Server, Scope::Runtime, Scope::Rpc, Scope::Transport];

    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Server => "server",
            Scope::Runtime => "runtime",
            Scope::Rpc => "rpc",
            Scope::Transport => "transport",
        }
    }
}

impl FromStr for Scope {
    type Err = MetricsError;

    /// Accepts the canonical names plus the legacy `jvm`/`grpc`/`netty` paths.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "server" => Ok(Scope::Server),
            "runtime" | "jvm" => Ok(Scope::Runtime),
            "rpc" | "grpc" => Ok(Scope::Rpc),
            "transport" | "netty" => Ok(Scope::Transport),
            other => Err(MetricsError::UnknownScope(other.to_string())),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
