//! Signed gauges: a scalar `Gauge` and the labeled `GaugeVec`.

use std::sync::atomic::{AtomicI64, Ordering};

use shufflemetrics_core::error::Result;
use shufflemetrics_core::{LabelTuple, MetricValue, Sample};

use super::series::SeriesMap;

#[derive(Debug, Default)]
pub struct GaugeCell {
    value: AtomicI64,
}

impl GaugeCell {
    fn get(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }

    fn set(&self, v: i64) {
        self.value.store(v, Ordering::Relaxed);
    }

    fn add(&self, delta: i64) {
        self.value.fetch_add(delta, Ordering::Relaxed);
    }
}

/// Single named gauge. Concurrent deltas compose as exact sums.
#[derive(Debug)]
pub struct Gauge {
    name: &'static str,
    cell: GaugeCell,
}

impl Gauge {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            cell: GaugeCell::default(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn set(&self, v: i64) {
        self.cell.set(v);
    }

    pub fn inc(&self, delta: i64) {
        self.cell.add(delta);
    }

    pub fn dec(&self, delta: i64) {
        self.cell.add(delta.wrapping_neg());
    }

    pub fn get(&self) -> i64 {
        self.cell.get()
    }

    pub(crate) fn sample(&self) -> Sample {
        Sample::scalar(self.name, MetricValue::Gauge(self.get()))
    }
}

/// Gauge family with lazily created series.
pub struct GaugeVec {
    series: SeriesMap<GaugeCell>,
}

impl GaugeVec {
    pub fn new(name: &'static str, label_names: &'static [&'static str]) -> Self {
        Self {
            series: SeriesMap::new(name, label_names),
        }
    }

    pub fn name(&self) -> &'static str {
        self.series.name()
    }

    pub fn set(&self, values: &[&str], v: i64) -> Result<()> {
        self.series.check_arity(values)?;
        self.series.resolve(LabelTuple::new(values)).cell.set(v);
        Ok(())
    }

    pub fn inc(&self, values: &[&str], delta: i64) -> Result<()> {
        self.series.check_arity(values)?;
        self.series.resolve(LabelTuple::new(values)).cell.add(delta);
        Ok(())
    }

    pub fn dec(&self, values: &[&str], delta: i64) -> Result<()> {
        self.inc(values, delta.wrapping_neg())
    }

    /// Current value; creates a zero series if absent.
    pub fn get(&self, values: &[&str]) -> Result<i64> {
        self.series.check_arity(values)?;
        Ok(self.series.resolve(LabelTuple::new(values)).cell.get())
    }

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
                MetricValue::Gauge(s.cell.get()),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn set_inc_dec() {
        let g = Gauge::new("in_flush_buffer_size");
        g.set(10);
        g.inc(5);
        g.dec(20);
        assert_eq!(g.get(), -5);
    }

    #[test]
    fn concurrent_deltas_are_not_lost() {
        let g = Arc::new(Gauge::new("buffered_data_size"));
        g.set(100);
        let handles: Vec<_> = (1..=8i64)
            .map(|i| {
                let g = Arc::clone(&g);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        if i % 2 == 0 {
                            g.inc(i);
                        } else {
                            g.dec(i);
                        }
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        // (2+4+6+8 - 1-3-5-7) * 1000
        assert_eq!(g.get(), 100 + 4000);
    }

    #[test]
    fn labeled_gauge_keeps_series_apart() {
        let g = GaugeVec::new("grpc_in_flight", &["method"]);
        g.inc(&["sendShuffleData"], 3).unwrap();
        g.dec(&["sendShuffleData"], 1).unwrap();
        g.set(&["finishShuffle"], 9).unwrap();
        assert_eq!(g.get(&["sendShuffleData"]).unwrap(), 2);
        assert_eq!(g.get(&["finishShuffle"]).unwrap(), 9);
        assert!(g.inc(&[], 1).is_err());
    }
}
