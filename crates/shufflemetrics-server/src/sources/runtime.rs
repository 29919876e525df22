use std::time::{Instant, SystemTime, UNIX_EPOCH};

use shufflemetrics_core::{MetricValue, Sample};

use crate::catalog::ServerMetrics;

/// Process runtime view. Values are read at snapshot time.
pub struct RuntimeMetrics {
    started_at: SystemTime,
    started: Instant,
}

impl Default for RuntimeMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeMetrics {
    pub const CATALOG_SIZE: usize = 6;

    pub fn new() -> Self {
        Self {
            started_at: SystemTime::now(),
            started: Instant::now(),
        }
    }

    pub(crate) fn collect(&self, server: &ServerMetrics, out: &mut Vec<Sample>) {
        let start_secs = self
            .started_at
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let parallelism = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        out.push(Sample::scalar("process_start_time_seconds", gauge(start_secs)));
        out.push(Sample::scalar(
            "process_uptime_seconds",
            gauge(self.started.elapsed().as_secs()),
        ));
        out.push(Sample::scalar("runtime_available_parallelism", gauge(parallelism)));
        out.push(Sample::scalar("runtime_server_families", gauge(server.family_count())));
        out.push(Sample::scalar("runtime_server_series", gauge(server.series_count())));
        out.push(Sample::new(
            "runtime_build_info",
            vec![env!("CARGO_PKG_VERSION").to_string()],
            MetricValue::Gauge(1),
        ));
    }
}

fn gauge<T: TryInto<i64>>(v: T) -> MetricValue {
    MetricValue::Gauge(v.try_into().unwrap_or(i64::MAX))
}
