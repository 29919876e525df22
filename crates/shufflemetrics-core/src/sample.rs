//! Snapshot entries as served by the exposition endpoints.

use serde::Serialize;

/// Numeric value of one series. Serialized as a bare JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Counter(u64),
    Gauge(i64),
}

impl MetricValue {
    pub fn as_f64(self) -> f64 {
        match self {
            MetricValue::Counter(v) => v as f64,
            MetricValue::Gauge(v) => v as f64,
        }
    }
}

/// One `(name, labelValues, value)` triple.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub name: String,
    pub label_values: Vec<String>,
    pub value: MetricValue,
}

impl Sample {
    pub fn new(name: impl Into<String>, label_values: Vec<String>, value: MetricValue) -> Self {
        Self {
            name: name.into(),
            label_values,
            value,
        }
    }

    /// Scalar series (no labels).
    pub fn scalar(name: impl Into<String>, value: MetricValue) -> Self {
        Self::new(name, Vec::new(), value)
    }
}
