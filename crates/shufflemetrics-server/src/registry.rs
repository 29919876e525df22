//! Process metrics registry.
//!
//! One instance per process (or per test), shared by reference with every
//! producer and with the exposition layer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use shufflemetrics_core::error::{MetricsError, Result};
use shufflemetrics_core::{Sample, Scope, ServerTag};

use crate::accounting::StorageWriteAccounting;
use crate::catalog::ServerMetrics;
use crate::sources::{CallMetrics, RpcMethod, RuntimeMetrics, TransportRequest};

#[derive(Default)]
pub struct MetricsRegistry {
    server: ServerMetrics,
    rpc: CallMetrics<RpcMethod>,
    transport: CallMetrics<TransportRequest>,
    runtime: RuntimeMetrics,
    server_tag: RwLock<Option<ServerTag>>,
    /// Bumped by every `init` and `clear`; accounting handles carry the value
    /// they were created in.
    epoch: AtomicU64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the registry to a server and pre-create the fixed series.
    ///
    /// A second `init` needs a `clear()` in between.
    pub fn init(&self, tag: ServerTag) -> Result<()> {
        let mut current = self.server_tag.write().unwrap_or_else(PoisonError::into_inner);
        if current.is_some() {
            return Err(MetricsError::AlreadyInitialized);
        }
        self.server.prepopulate();
        self.rpc.prepopulate()?;
        self.transport.prepopulate()?;
        tracing::info!(server_tag = %tag, "metrics registry initialized");
        *current = Some(tag);
        self.epoch.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    /// Drop every series and reset gauges. Safe before `init`.
    pub fn clear(&self) {
        let mut current = self.server_tag.write().unwrap_or_else(PoisonError::into_inner);
        self.epoch.fetch_add(1, Ordering::AcqRel);
        self.server.clear();
        self.rpc.clear();
        self.transport.clear();
        if current.take().is_some() {
            tracing::info!("metrics registry cleared");
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.server_tag
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn server_tag(&self) -> Option<ServerTag> {
        self.server_tag
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Write-outcome accounting bound to this registry's server tag.
    pub fn storage_accounting(&self) -> Result<StorageWriteAccounting<'_>> {
        let current = self.server_tag.read().unwrap_or_else(PoisonError::into_inner);
        let tag = current.clone().ok_or(MetricsError::NotInitialized)?;
        Ok(StorageWriteAccounting::new(self, tag, self.epoch()))
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    pub fn server(&self) -> &ServerMetrics {
        &self.server
    }

    pub fn rpc(&self) -> &CallMetrics<RpcMethod> {
        &self.rpc
    }

    pub fn transport(&self) -> &CallMetrics<TransportRequest> {
        &self.transport
    }

    /// Ordered `(name, labelValues, value)` triples of one scope.
    ///
    /// Each value is an atomic read of its cell; the list as a whole is not
    /// a cross-cell transaction.
    pub fn snapshot(&self, scope: Scope) -> Vec<Sample> {
        let mut out = Vec::new();
        match scope {
            Scope::Server => self.server.collect(&mut out),
            Scope::Runtime => self.runtime.collect(&self.server, &mut out),
            Scope::Rpc => self.rpc.collect(&mut out),
            Scope::Transport => self.transport.collect(&mut out),
        }
        out
    }

    /// `snapshot` by scope name; unknown names fail with `UnknownScope`.
    pub fn snapshot_named(&self, scope: &str) -> Result<Vec<Sample>> {
        Ok(self.snapshot(scope.parse()?))
    }
}
