//! Shared application state for the metrics server.

use std::sync::Arc;

use shufflemetrics_core::error::Result;

use crate::config::MetricsConfig;
use crate::registry::MetricsRegistry;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    registry: Arc<MetricsRegistry>,
}

struct AppStateInner {
    cfg: MetricsConfig,
}

impl AppState {
    /// Build state with a fresh registry.
    pub fn new(cfg: MetricsConfig) -> Result<Self> {
        Self::with_registry(cfg, Arc::new(MetricsRegistry::new()))
    }

    /// Initialize `registry` for this server and register configured remote
    /// storages so their series are visible before any write.
    pub fn with_registry(cfg: MetricsConfig, registry: Arc<MetricsRegistry>) -> Result<Self> {
        registry.init(cfg.server.encoded_tag())?;
        {
            let accounting = registry.storage_accounting()?;
            for path in &cfg.storage.remote_paths {
                accounting.register_remote_storage(path)?;
            }
        }

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg }),
            registry,
        })
    }

    pub fn cfg(&self) -> &MetricsConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> Arc<MetricsRegistry> {
        Arc::clone(&self.registry)
    }
}
