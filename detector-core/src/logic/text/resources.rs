//! Language Resource Store
//!
//! Files live under a local cache directory. A missing file is downloaded
//! once from the configured base URL, then always served from the cache.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::ResourceConfig;
use crate::constants::RESOURCE_DOWNLOAD_TIMEOUT_SECS;
use crate::error::{DetectorError, DetectorResult};

/// Cache-first access to language resource files.
#[derive(Debug, Clone)]
pub struct ResourceStore {
    data_dir: PathBuf,
    remote_url: Option<String>,
    timeout: Duration,
}

impl ResourceStore {
    pub fn new(data_dir: impl Into<PathBuf>, remote_url: Option<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            remote_url,
            timeout: Duration::from_secs(RESOURCE_DOWNLOAD_TIMEOUT_SECS),
        }
    }

    pub fn from_config(config: &ResourceConfig) -> Self {
        Self::new(config.data_dir.clone(), config.remote_url.clone())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path a resource has (or would have) in the cache.
    pub fn local_path(&self, relative: &str) -> PathBuf {
        self.data_dir.join(relative)
    }

    pub fn is_cached(&self, relative: &str) -> bool {
        self.local_path(relative).is_file()
    }

    /// Return the cached path of `relative`, downloading it first if needed.
    pub fn ensure(&self, relative: &str) -> DetectorResult<PathBuf> {
        let path = self.local_path(relative);
        if path.is_file() {
            log::debug!("Resource cache hit: {}", path.display());
            return Ok(path);
        }

        let base = self.remote_url.as_deref().ok_or_else(|| {
            DetectorError::Resource(format!(
                "{} is not cached in {} and no download URL is configured",
                relative,
                self.data_dir.display()
            ))
        })?;

        let url = format!("{}/{}", base.trim_end_matches('/'), relative);
        log::info!("Downloading language resource {} from {}", relative, url);
        let body = self.download(&url)?;
        write_atomic(&path, body.as_bytes())?;
        log::info!("Cached {} ({} bytes)", path.display(), body.len());

        Ok(path)
    }

    /// Read a resource as text, fetching it first if the cache is cold.
    pub fn read_to_string(&self, relative: &str) -> DetectorResult<String> {
        let path = self.ensure(relative)?;
        fs::read_to_string(&path)
            .map_err(|e| DetectorError::Resource(format!("read {}: {}", path.display(), e)))
    }

    fn download(&self, url: &str) -> DetectorResult<String> {
        let response = ureq::get(url)
            .timeout(self.timeout)
            .call()
            .map_err(|e| DetectorError::Resource(format!("download {} failed: {}", url, e)))?;

        response
            .into_string()
            .map_err(|e| DetectorError::Resource(format!("download {} unreadable: {}", url, e)))
    }
}

/// Write through a temp file so a concurrent reader never sees half a file.
fn write_atomic(path: &Path, bytes: &[u8]) -> DetectorResult<()> {
    let io_err = |e: std::io::Error| DetectorError::Resource(format!("write {}: {}", path.display(), e));

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let tmp = path.with_extension(format!("tmp{}", std::process::id()));
    {
        let mut file = fs::File::create(&tmp).map_err(io_err)?;
        file.write_all(bytes).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
    }
    fs::rename(&tmp, path).map_err(io_err)
}
