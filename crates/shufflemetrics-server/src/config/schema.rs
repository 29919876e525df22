use std::net::SocketAddr;

use serde::Deserialize;
use shufflemetrics_core::error::{MetricsError, Result};
use shufflemetrics_core::{ServerTag, StorageHost};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub storage: StorageSection,
}

impl MetricsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetricsError::UnsupportedVersion);
        }
        self.server.validate()?;
        self.storage.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Server tags; encoded into the first label of remote families.
    #[serde(default = "default_tags")]
    pub tags: Vec<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            tags: default_tags(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if self.tags.iter().any(|t| t.contains(',')) {
            return Err(MetricsError::BadRequest(
                "server.tags entries must not contain ','".into(),
            ));
        }
        if self.encoded_tag().as_str().is_empty() {
            return Err(MetricsError::BadRequest("server.tags must not be empty".into()));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            MetricsError::BadRequest(format!("server.listen must be a valid SocketAddr: {e}"))
        })
    }

    pub fn encoded_tag(&self) -> ServerTag {
        ServerTag::encode(&self.tags)
    }
}

fn default_listen() -> String {
    "0.0.0.0:19998".into()
}
fn default_tags() -> Vec<String> {
    vec!["ss_v5".into()]
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct StorageSection {
    /// Remote storage base paths registered at startup.
    #[serde(default)]
    pub remote_paths: Vec<String>,
}

impl StorageSection {
    pub fn validate(&self) -> Result<()> {
        for p in &self.remote_paths {
            StorageHost::from_storage_path(p)?;
        }
        Ok(())
    }
}
