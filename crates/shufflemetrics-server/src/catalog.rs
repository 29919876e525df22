//! Server-scope metric families.
//!
//! The family set is fixed at construction; series inside the labeled
//! families appear as write traffic (or host registration) creates them.

use shufflemetrics_core::Sample;

use crate::obs::{Gauge, LabeledCounter};

pub const LABEL_TAGS: &str = "tags";
pub const LABEL_STORAGE_HOST: &str = "storage_host";

const REMOTE_LABELS: &[&str] = &[LABEL_TAGS, LABEL_STORAGE_HOST];

pub const STORAGE_TOTAL_WRITE_LOCAL: &str = "storage_total_write_local";
pub const STORAGE_RETRY_WRITE_LOCAL: &str = "storage_retry_write_local";
pub const STORAGE_SUCCESS_WRITE_LOCAL: &str = "storage_success_write_local";
pub const STORAGE_FAILED_WRITE_LOCAL: &str = "storage_failed_write_local";

pub const STORAGE_TOTAL_WRITE_REMOTE: &str = "storage_total_write_remote";
pub const STORAGE_RETRY_WRITE_REMOTE: &str = "storage_retry_write_remote";
pub const STORAGE_SUCCESS_WRITE_REMOTE: &str = "storage_success_write_remote";
pub const STORAGE_FAILED_WRITE_REMOTE: &str = "storage_failed_write_remote";

pub const TOTAL_HADOOP_WRITE_DATA: &str = "total_hadoop_write_data";

pub const TOTAL_RECEIVED_DATA: &str = "total_received_data";
pub const TOTAL_WRITE_DATA: &str = "total_write_data";
pub const TOTAL_WRITE_BLOCK: &str = "total_write_block";
pub const TOTAL_WRITE_EXCEPTION: &str = "total_write_exception";

pub const BUFFERED_DATA_SIZE: &str = "buffered_data_size";
pub const IN_FLUSH_BUFFER_SIZE: &str = "in_flush_buffer_size";
pub const USED_BUFFER_SIZE: &str = "used_buffer_size";

fn remote(name: &'static str) -> LabeledCounter {
    LabeledCounter::new(name, REMOTE_LABELS).with_host_rollup(LABEL_STORAGE_HOST)
}

pub struct ServerMetrics {
    pub storage_total_write_local: LabeledCounter,
    pub storage_retry_write_local: LabeledCounter,
    pub storage_success_write_local: LabeledCounter,
    pub storage_failed_write_local: LabeledCounter,

    pub storage_total_write_remote: LabeledCounter,
    pub storage_retry_write_remote: LabeledCounter,
    pub storage_success_write_remote: LabeledCounter,
    pub storage_failed_write_remote: LabeledCounter,

    pub total_hadoop_write_data: LabeledCounter,

    pub total_received_data: LabeledCounter,
    pub total_write_data: LabeledCounter,
    pub total_write_block: LabeledCounter,
    pub total_write_exception: LabeledCounter,

    pub buffered_data_size: Gauge,
    pub in_flush_buffer_size: Gauge,
    pub used_buffer_size: Gauge,
}

impl Default for ServerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerMetrics {
    pub fn new() -> Self {
        Self {
            storage_total_write_local: LabeledCounter::scalar(STORAGE_TOTAL_WRITE_LOCAL),
            storage_retry_write_local: LabeledCounter::scalar(STORAGE_RETRY_WRITE_LOCAL),
            storage_success_write_local: LabeledCounter::scalar(STORAGE_SUCCESS_WRITE_LOCAL),
            storage_failed_write_local: LabeledCounter::scalar(STORAGE_FAILED_WRITE_LOCAL),

            storage_total_write_remote: remote(STORAGE_TOTAL_WRITE_REMOTE),
            storage_retry_write_remote: remote(STORAGE_RETRY_WRITE_REMOTE),
            storage_success_write_remote: remote(STORAGE_SUCCESS_WRITE_REMOTE),
            storage_failed_write_remote: remote(STORAGE_FAILED_WRITE_REMOTE),

            total_hadoop_write_data: remote(TOTAL_HADOOP_WRITE_DATA),

            total_received_data: LabeledCounter::scalar(TOTAL_RECEIVED_DATA),
            total_write_data: LabeledCounter::scalar(TOTAL_WRITE_DATA),
            total_write_block: LabeledCounter::scalar(TOTAL_WRITE_BLOCK),
            total_write_exception: LabeledCounter::scalar(TOTAL_WRITE_EXCEPTION),

            buffered_data_size: Gauge::new(BUFFERED_DATA_SIZE),
            in_flush_buffer_size: Gauge::new(IN_FLUSH_BUFFER_SIZE),
            used_buffer_size: Gauge::new(USED_BUFFER_SIZE),
        }
    }

    /// Counter families in exposition order.
    pub fn counters(&self) -> [&LabeledCounter; 13] {
        [
            &self.storage_total_write_local,
            &self.storage_retry_write_local,
            &self.storage_success_write_local,
            &self.storage_failed_write_local,
            &self.storage_total_write_remote,
            &self.storage_retry_write_remote,
            &self.storage_success_write_remote,
            &self.storage_failed_write_remote,
            &self.total_hadoop_write_data,
            &self.total_received_data,
            &self.total_write_data,
            &self.total_write_block,
            &self.total_write_exception,
        ]
    }

    pub fn gauges(&self) -> [&Gauge; 3] {
        [
            &self.buffered_data_size,
            &self.in_flush_buffer_size,
            &self.used_buffer_size,
        ]
    }

    pub fn family_count(&self) -> usize {
        self.counters().len() + self.gauges().len()
    }

    pub fn series_count(&self) -> usize {
        self.counters().iter().map(|c| c.series_count()).sum::<usize>() + self.gauges().len()
    }

    /// Zero-valued series for every scalar family.
    pub(crate) fn prepopulate(&self) {
        for c in self.counters() {
            if c.label_names().is_empty() {
                // arity of a scalar family always matches
                let _ = c.add(&[], 0);
            }
        }
    }

    pub(crate) fn clear(&self) {
        for c in self.counters() {
            c.clear();
        }
        for g in self.gauges() {
            g.set(0);
        }
    }

    pub(crate) fn collect(&self, out: &mut Vec<Sample>) {
        for c in self.counters() {
            c.collect(out);
        }
        for g in self.gauges() {
            out.push(g.sample());
        }
    }
}
