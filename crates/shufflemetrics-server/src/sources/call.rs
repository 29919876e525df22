//! Call accounting shared by the RPC and data-transport servers.

use std::marker::PhantomData;
use std::time::Duration;

use shufflemetrics_core::error::Result;
use shufflemetrics_core::Sample;

use crate::obs::{Gauge, GaugeVec, LabeledCounter};

pub const LABEL_METHOD: &str = "method";

const METHOD_LABELS: &[&str] = &[LABEL_METHOD];

/// Family names of one call-accounting catalog.
pub struct CallFamilyNames {
    pub executor_active_threads: &'static str,
    pub executor_queue_size: &'static str,
    pub connection_number: &'static str,
    pub open: &'static str,
    pub total: &'static str,
    pub failed: &'static str,
    pub in_flight: &'static str,
    pub process_time_ms: &'static str,
    /// Only servers that measure client-to-server transport time carry it.
    pub transport_time_ms: Option<&'static str>,
}

/// A fixed set of call kinds (RPC methods, transport request types).
pub trait CallKind: Copy + Send + Sync + 'static {
    const KINDS: &'static [Self];
    const NAMES: CallFamilyNames;

    fn as_label(self) -> &'static str;
}

pub struct CallMetrics<K: CallKind> {
    executor_active_threads: Gauge,
    executor_queue_size: Gauge,
    connection_number: Gauge,
    open: Gauge,
    total: LabeledCounter,
    failed: LabeledCounter,
    in_flight: GaugeVec,
    process_time_ms: LabeledCounter,
    transport_time_ms: Option<LabeledCounter>,
    _kind: PhantomData<K>,
}

impl<K: CallKind> Default for CallMetrics<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: CallKind> CallMetrics<K> {
    pub fn new() -> Self {
        let n = &K::NAMES;
        Self {
            executor_active_threads: Gauge::new(n.executor_active_threads),
            executor_queue_size: Gauge::new(n.executor_queue_size),
            connection_number: Gauge::new(n.connection_number),
            open: Gauge::new(n.open),
            total: LabeledCounter::new(n.total, METHOD_LABELS),
            failed: LabeledCounter::new(n.failed, METHOD_LABELS),
            in_flight: GaugeVec::new(n.in_flight, METHOD_LABELS),
            process_time_ms: LabeledCounter::new(n.process_time_ms, METHOD_LABELS),
            transport_time_ms: n
                .transport_time_ms
                .map(|name| LabeledCounter::new(name, METHOD_LABELS)),
            _kind: PhantomData,
        }
    }

    /// Number of series the catalog exposes once initialized.
    pub fn catalog_size() -> usize {
        let per_kind = if K::NAMES.transport_time_ms.is_some() { 5 } else { 4 };
        4 + per_kind * K::KINDS.len()
    }

    fn counters(&self) -> impl Iterator<Item = &LabeledCounter> {
        [&self.total, &self.failed, &self.process_time_ms]
            .into_iter()
            .chain(self.transport_time_ms.as_ref())
    }

    fn gauges(&self) -> [&Gauge; 4] {
        [
            &self.executor_active_threads,
            &self.executor_queue_size,
            &self.connection_number,
            &self.open,
        ]
    }

    pub(crate) fn prepopulate(&self) -> Result<()> {
        for kind in K::KINDS {
            let labels = [kind.as_label()];
            for c in self.counters() {
                c.add(&labels, 0)?;
            }
            self.in_flight.inc(&labels, 0)?;
        }
        Ok(())
    }

    pub fn call_started(&self, kind: K) -> Result<()> {
        self.open.inc(1);
        self.in_flight.inc(&[kind.as_label()], 1)
    }

    pub fn call_finished(
        &self,
        kind: K,
        process_time: Duration,
        transport_time: Option<Duration>,
        ok: bool,
    ) -> Result<()> {
        let labels = [kind.as_label()];
        self.open.dec(1);
        self.in_flight.dec(&labels, 1)?;
        self.total.add(&labels, 1)?;
        if !ok {
            self.failed.add(&labels, 1)?;
        }
        self.process_time_ms.add(&labels, millis(process_time))?;
        if let (Some(c), Some(t)) = (&self.transport_time_ms, transport_time) {
            c.add(&labels, millis(t))?;
        }
        Ok(())
    }

    pub fn connection_opened(&self) {
        self.connection_number.inc(1);
    }

    pub fn connection_closed(&self) {
        self.connection_number.dec(1);
    }

    pub fn set_executor_stats(&self, active_threads: i64, queued: i64) {
        self.executor_active_threads.set(active_threads);
        self.executor_queue_size.set(queued);
    }

    pub fn total(&self, kind: K) -> Result<u64> {
        self.total.get(&[kind.as_label()])
    }

    pub fn failed(&self, kind: K) -> Result<u64> {
        self.failed.get(&[kind.as_label()])
    }

    pub fn in_flight(&self, kind: K) -> Result<i64> {
        self.in_flight.get(&[kind.as_label()])
    }

    pub fn open_calls(&self) -> i64 {
        self.open.get()
    }

    pub(crate) fn clear(&self) {
        for c in self.counters() {
            c.clear();
        }
        self.in_flight.clear();
        for g in self.gauges() {
            g.set(0);
        }
    }

    pub(crate) fn collect(&self, out: &mut Vec<Sample>) {
        for g in self.gauges() {
            out.push(g.sample());
        }
        self.total.collect(out);
        self.failed.collect(out);
        self.in_flight.collect(out);
        self.process_time_ms.collect(out);
        if let Some(c) = &self.transport_time_ms {
            c.collect(out);
        }
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
