//! Label model: ordered label tuples, the encoded server tag, and storage
//! locality.

use std::fmt;
use std::str::FromStr;

use crate::error::{MetricsError, Result};

/// Reserved host label value for the cross-host aggregate series.
pub const HOST_LABEL_ALL: &str = "ALL";

/// Textual marker for the node-local storage backend.
pub const LOCAL_STORAGE_HOST: &str = "LOCALFILE";

/// Ordered label values identifying one series within a family.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelTuple(Box<[String]>);

impl LabelTuple {
    pub fn new(values: &[&str]) -> Self {
        Self(values.iter().map(|v| (*v).to_string()).collect())
    }

    /// Tuple of a scalar (label-less) family.
    pub fn empty() -> Self {
        Self(Box::default())
    }

    /// Copy of `values` with the component at `index` swapped for `value`.
    /// An out of range index leaves the values untouched.
    pub fn with_replaced(values: &[&str], index: usize, value: &str) -> Self {
        Self(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| if i == index { value } else { *v })
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.to_vec()
    }
}

/// Encoded identifier of the owning server instance.
///
/// Used as the first label of families that are aggregated across servers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerTag(String);

impl ServerTag {
    /// Wrap an already encoded tag.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encode a set of server tags: sorted, de-duplicated, comma joined.
    pub fn encode<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tags: Vec<String> = tags
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        tags.sort();
        tags.dedup();
        Self(tags.join(","))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storage locality of a write.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StorageHost {
    /// Node-local backend, accounted with unlabeled counters.
    Local,
    /// Remote backend (e.g. an HDFS namenode host), accounted per host.
    Remote(String),
}

impl StorageHost {
    pub fn remote(host: impl Into<String>) -> Self {
        StorageHost::Remote(host.into())
    }

    /// Derive locality from a storage base path.
    ///
    /// `hdfs://hdfs1:9000/rss` is `Remote("hdfs1")`; scheme-less paths and
    /// `file://` URIs are `Local`.
    pub fn from_storage_path(path: &str) -> Result<Self> {
        let path = path.trim();
        if path.is_empty() {
            return Err(MetricsError::BadRequest("storage path must not be empty".into()));
        }
        let Some((scheme, rest)) = path.split_once("://") else {
            return Ok(StorageHost::Local);
        };
        if scheme.eq_ignore_ascii_case("file") {
            return Ok(StorageHost::Local);
        }

        let authority = rest.split('/').next().unwrap_or_default();
        let authority = authority
            .rsplit_once('@')
            .map(|(_, hostport)| hostport)
            .unwrap_or(authority);
        let host = match authority.strip_prefix('[') {
            Some(v6) => v6.split(']').next().unwrap_or_default(),
            None => authority.split(':').next().unwrap_or_default(),
        };
        if host.is_empty() {
            return Err(MetricsError::BadRequest(format!(
                "storage path has no host: {path}"
            )));
        }
        Ok(StorageHost::Remote(host.to_string()))
    }

    pub fn is_local(&self) -> bool {
        matches!(self, StorageHost::Local)
    }

    /// Host label value (the local marker for `Local`).
    pub fn label(&self) -> &str {
        match self {
            StorageHost::Local => LOCAL_STORAGE_HOST,
            StorageHost::Remote(h) => h,
        }
    }
}

impl FromStr for StorageHost {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" => Err(MetricsError::BadRequest("storage host must not be empty".into())),
            LOCAL_STORAGE_HOST => Ok(StorageHost::Local),
            host => Ok(StorageHost::Remote(host.to_string())),
        }
    }
}

impl fmt::Display for StorageHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
