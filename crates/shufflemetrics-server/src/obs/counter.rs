//! Monotonic counters keyed by ordered label tuples.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use shufflemetrics_core::error::{MetricsError, Result};
use shufflemetrics_core::{LabelTuple, MetricValue, Sample, HOST_LABEL_ALL};

use super::series::{Series, SeriesMap};

/// Accumulator bound to one label tuple. Never decreases; saturates at
/// `u64::MAX` instead of wrapping.
#[derive(Debug, Default)]
pub struct CounterCell {
    value: AtomicU64,
}

impl CounterCell {
    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }

    fn add(&self, v: u64) {
        let _ = self
            .value
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |cur| {
                Some(cur.saturating_add(v))
            });
    }
}

/// Handle to a resolved series; stays valid until the family is cleared.
#[derive(Clone)]
pub struct CounterHandle(Arc<Series<CounterCell>>);

impl CounterHandle {
    pub fn get(&self) -> u64 {
        self.0.cell.get()
    }
}

/// Counter family with lazily created series.
///
/// A family may carry a host dimension. Every update to a per-host tuple also
/// lands on the same tuple with the host replaced by `ALL`, inside the same
/// call, so `ALL` equals the per-host sum once the call returns.
pub struct LabeledCounter {
    series: SeriesMap<CounterCell>,
    host_index: Option<usize>,
}

impl LabeledCounter {
    pub fn new(name: &'static str, label_names: &'static [&'static str]) -> Self {
        Self {
            series: SeriesMap::new(name, label_names),
            host_index: None,
        }
    }

    /// Scalar family: no labels, a single series.
    pub fn scalar(name: &'static str) -> Self {
        Self::new(name, &[])
    }

    /// Roll updates up into the `ALL` series along `host_label`.
    pub fn with_host_rollup(mut self, host_label: &str) -> Self {
        self.host_index = self
            .series
            .label_names()
            .iter()
            .position(|l| *l == host_label);
        self
    }

    pub fn name(&self) -> &'static str {
        self.series.name()
    }

    pub fn label_names(&self) -> &'static [&'static str] {
        self.series.label_names()
    }

    /// Look up or create the series for `values`.
    pub fn resolve(&self, values: &[&str]) -> Result<CounterHandle> {
        self.series.check_arity(values)?;
        Ok(CounterHandle(self.series.resolve(LabelTuple::new(values))))
    }

    /// Add a signed delta. Negative deltas are a contract violation and are
    /// rejected before any cell is touched.
    pub fn inc(&self, values: &[&str], delta: i64) -> Result<()> {
        let delta = u64::try_from(delta).map_err(|_| {
            tracing::warn!(family = self.name(), delta, "negative delta rejected");
            MetricsError::NegativeDelta {
                family: self.name(),
                delta,
            }
        })?;
        self.add(values, delta)
    }

    /// Add `delta` to the series and its `ALL` rollup.
    ///
    /// `delta == 0` only forces creation of both series.
    pub fn add(&self, values: &[&str], delta: u64) -> Result<()> {
        self.series.check_arity(values)?;
        let Some(idx) = self.host_index else {
            self.series.resolve(LabelTuple::new(values)).cell.add(delta);
            return Ok(());
        };

        if values.get(idx).is_some_and(|h| *h == HOST_LABEL_ALL) {
            return Err(MetricsError::ReservedLabel {
                family: self.name(),
                value: HOST_LABEL_ALL,
            });
        }
        let specific = self.series.resolve(LabelTuple::new(values));
        let aggregate = self
            .series
            .resolve(LabelTuple::with_replaced(values, idx, HOST_LABEL_ALL));
        specific.cell.add(delta);
        aggregate.cell.add(delta);
        Ok(())
    }

    /// Current value; creates a zero series if absent.
    pub fn get(&self, values: &[&str]) -> Result<u64> {
        Ok(self.resolve(values)?.get())
    }

    /// Number of live series, `ALL` rollups included.
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    pub fn clear(&self) {
        self.series.clear();
    }

    pub(crate) fn collect(&self, out: &mut Vec<Sample>) {
        for (tuple, s) in self.series.ordered() {
            out.push(Sample::new(
                self.name(),
                tuple.to_vec(),
                MetricValue::Counter(s.cell.get()),
            ));
        }
    }
}
