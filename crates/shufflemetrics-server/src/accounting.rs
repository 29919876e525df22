//! Storage write accounting.
//!
//! Local writes land on unlabeled counters. Remote writes land on
//! `(tags, storage_host)` counters, each with its `ALL` rollup. Every outcome
//! event also bumps the matching total, outcome first, so
//! `total == retry + success + failed` holds once the call returns.
//!
//! A handle is bound to one registry epoch. Once the registry is cleared (or
//! re-initialized) every call on the old handle fails with `NotInitialized`.

use shufflemetrics_core::error::{MetricsError, Result};
use shufflemetrics_core::{ServerTag, StorageHost};

use crate::catalog::ServerMetrics;
use crate::obs::LabeledCounter;
use crate::registry::MetricsRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Retry,
    Success,
    Failed,
}

pub struct StorageWriteAccounting<'a> {
    registry: &'a MetricsRegistry,
    tag: ServerTag,
    epoch: u64,
}

impl<'a> StorageWriteAccounting<'a> {
    pub(crate) fn new(registry: &'a MetricsRegistry, tag: ServerTag, epoch: u64) -> Self {
        Self { registry, tag, epoch }
    }

    /// Server metrics, as long as the registry is still in this handle's epoch.
    fn metrics(&self) -> Result<&'a ServerMetrics> {
        if self.registry.epoch() != self.epoch {
            tracing::warn!(server_tag = %self.tag, "write on a stale accounting handle rejected");
            return Err(MetricsError::NotInitialized);
        }
        Ok(self.registry.server())
    }

    pub fn inc_storage_retry_counter(&self, host: &StorageHost) -> Result<()> {
        self.record(host, Outcome::Retry)
    }

    pub fn inc_storage_success_counter(&self, host: &StorageHost) -> Result<()> {
        self.record(host, Outcome::Success)
    }

    pub fn inc_storage_failed_counter(&self, host: &StorageHost) -> Result<()> {
        self.record(host, Outcome::Failed)
    }

    /// Cumulative bytes written to a remote (Hadoop-compatible) host.
    pub fn inc_hadoop_storage_write_data_size(&self, host: &str, bytes: u64) -> Result<()> {
        self.metrics()?
            .total_hadoop_write_data
            .add(&[self.tag.as_str(), host], bytes)
    }

    /// Make a remote storage visible in exposition before its first write.
    ///
    /// Local paths register nothing.
    pub fn register_remote_storage(&self, path: &str) -> Result<StorageHost> {
        let host = StorageHost::from_storage_path(path)?;
        let m = self.metrics()?;
        if let StorageHost::Remote(h) = &host {
            let labels = [self.tag.as_str(), h.as_str()];
            for c in [
                &m.storage_total_write_remote,
                &m.storage_success_write_remote,
                &m.storage_failed_write_remote,
                &m.storage_retry_write_remote,
                &m.total_hadoop_write_data,
            ] {
                c.add(&labels, 0)?;
            }
            tracing::info!(path, host = %h, "remote storage registered");
        }
        Ok(host)
    }

    pub fn inc_received_data_size(&self, bytes: u64) -> Result<()> {
        self.metrics()?.total_received_data.add(&[], bytes)
    }

    /// A flush of `blocks` blocks totalling `bytes` reached storage.
    pub fn record_flush(&self, bytes: u64, blocks: u64) -> Result<()> {
        let m = self.metrics()?;
        m.total_write_data.add(&[], bytes)?;
        m.total_write_block.add(&[], blocks)
    }

    pub fn inc_write_exception(&self) -> Result<()> {
        self.metrics()?.total_write_exception.add(&[], 1)
    }

    fn record(&self, host: &StorageHost, outcome: Outcome) -> Result<()> {
        let m = self.metrics()?;
        match host {
            StorageHost::Local => {
                let counter = match outcome {
                    Outcome::Retry => &m.storage_retry_write_local,
                    Outcome::Success => &m.storage_success_write_local,
                    Outcome::Failed => &m.storage_failed_write_local,
                };
                bump(counter, &m.storage_total_write_local, &[])
            }
            StorageHost::Remote(h) => {
                let counter = match outcome {
                    Outcome::Retry => &m.storage_retry_write_remote,
                    Outcome::Success => &m.storage_success_write_remote,
                    Outcome::Failed => &m.storage_failed_write_remote,
                };
                bump(counter, &m.storage_total_write_remote, &[self.tag.as_str(), h.as_str()])
            }
        }
    }
}

fn bump(outcome: &LabeledCounter, total: &LabeledCounter, labels: &[&str]) -> Result<()> {
    outcome.add(labels, 1)?;
    total.add(labels, 1)
}
