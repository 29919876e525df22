use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use shufflemetrics_core::error::{MetricsError, Result};
use shufflemetrics_core::LabelTuple;

/// Lazily populated series of one family.
pub(crate) struct SeriesMap<C> {
    name: &'static str,
    label_names: &'static [&'static str],
    cells: DashMap<LabelTuple, Arc<Series<C>>>,
    seq: AtomicU64,
}

pub(crate) struct Series<C> {
    pub cell: C,
    created_seq: u64,
}

impl<C: Default> SeriesMap<C> {
    pub fn new(name: &'static str, label_names: &'static [&'static str]) -> Self {
        Self {
            name,
            label_names,
            cells: DashMap::new(),
            seq: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn label_names(&self) -> &'static [&'static str] {
        self.label_names
    }

    pub fn check_arity(&self, values: &[&str]) -> Result<()> {
        if values.len() != self.label_names.len() {
            return Err(MetricsError::LabelArity {
                family: self.name,
                expected: self.label_names.len(),
                got: values.len(),
            });
        }
        Ok(())
    }

    /// Look up or create the series for `tuple`.
    ///
    /// Creation goes through `entry().or_insert_with`, which holds the shard
    /// lock, so racing first uses of an equal tuple observe a single cell.
    pub fn resolve(&self, tuple: LabelTuple) -> Arc<Series<C>> {
        if let Some(s) = self.cells.get(&tuple) {
            return Arc::clone(s.value());
        }
        let mut created = false;
        let entry = self.cells.entry(tuple).or_insert_with(|| {
            created = true;
            Arc::new(Series {
                cell: C::default(),
                created_seq: self.seq.fetch_add(1, Ordering::Relaxed),
            })
        });
        if created {
            tracing::debug!(family = self.name, labels = ?entry.key().values(), "series created");
        }
        Arc::clone(entry.value())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn clear(&self) {
        self.cells.clear();
    }

    /// Series in creation order.
    pub fn ordered(&self) -> Vec<(LabelTuple, Arc<Series<C>>)> {
        let mut all: Vec<_> = self
            .cells
            .iter()
            .map(|r| (r.key().clone(), Arc::clone(r.value())))
            .collect();
        all.sort_by_key(|(_, s)| s.created_seq);
        all
    }
}
