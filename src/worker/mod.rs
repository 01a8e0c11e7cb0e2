//! Offline-capable asset cache worker.
//!
//! A state-machined component that precaches a fixed manifest, keeps exactly
//! one named cache generation alive, and answers GET fetches network-first
//! with cache fallback. It runs beside the editor with no shared state; the
//! environment drives it through [`CacheWorker::handle_install`],
//! [`CacheWorker::handle_activate`] and [`CacheWorker::handle_fetch`], and
//! supplies the network and the store through the [`NetworkFetch`] and
//! [`AssetStore`] seams.

pub mod assets;
pub mod store;

pub use assets::{AssetRequest, AssetResponse, RequestMethod, RequestMode};
pub use store::{AssetStore, DirStore, MemoryStore, StoreError};

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use assets::origin_of;

/// Cache generation tag for the current shell version. Bump it to supersede
/// every previously cached generation on the next activation.
pub const DEFAULT_CACHE_NAME: &str = "linekeys-shell-v1";

/// Fallback document served for offline navigations.
const SHELL_DOCUMENT: &str = "/index.html";

/// Worker configuration: one value passed in at construction, never an
/// ambient global.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Version tag naming the active cache generation.
    pub cache_name: String,
    /// `scheme://authority` this worker serves, without a trailing slash.
    /// Requests to any other origin pass through untouched.
    pub origin: String,
    /// Root-relative paths cached during install.
    pub precache: Vec<String>,
}

impl WorkerConfig {
    /// Config with the default cache name and shell manifest.
    pub fn shell(origin: impl Into<String>) -> Self {
        Self {
            cache_name: DEFAULT_CACHE_NAME.to_string(),
            origin: origin.into(),
            precache: ["/", "/index.html", "/manifest.json", "/favicon.svg"]
                .map(String::from)
                .to_vec(),
        }
    }

    /// Load a config from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the config to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let encoded =
            serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        fs::write(path, encoded).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn asset_url(&self, path: &str) -> String {
        format!("{}{}", self.origin, path)
    }
}

/// Failure to load or save a [`WorkerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("worker config I/O failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("worker config {} is not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Lifecycle of one worker version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Created; the precache manifest has not been stored yet.
    Installing,
    /// Install succeeded; waiting to take control.
    Waiting,
    /// In control; eligible fetches are intercepted.
    Active,
}

/// The environment's network fetch primitive.
pub trait NetworkFetch {
    /// Perform a live fetch of `request`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the network is unreachable; an HTTP error
    /// status is a successful fetch carrying that status.
    fn fetch(&mut self, request: &AssetRequest) -> Result<AssetResponse, FetchError>;
}

/// The network could not be reached at all.
#[derive(Debug, Error)]
#[error("network fetch failed: {reason}")]
pub struct FetchError {
    reason: String,
}

impl FetchError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Failure in the worker lifecycle.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// Install was already completed for this worker version.
    #[error("install already completed")]
    AlreadyInstalled,
    /// Activation attempted before a successful install.
    #[error("cannot activate before a successful install")]
    NotInstalled,
    /// A manifest asset could not be fetched during install.
    #[error("failed to precache {url}")]
    InstallFetch {
        url: String,
        #[source]
        source: FetchError,
    },
    /// A manifest asset fetched with a non-success status during install.
    #[error("precache of {url} answered status {status}")]
    InstallStatus { url: String, status: u16 },
    /// The underlying store failed.
    #[error("cache store failure")]
    Store(#[from] StoreError),
}

/// Decision for one intercepted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchDecision {
    /// The worker does not handle this request; the environment's default
    /// network path applies.
    PassThrough,
    /// The worker answers the request with this response.
    Respond(AssetResponse),
}

/// The asset cache worker.
///
/// Owns its store and network seams; the editor never touches it.
#[derive(Debug)]
pub struct CacheWorker<S, N> {
    config: WorkerConfig,
    state: WorkerState,
    store: S,
    net: N,
}

impl<S: AssetStore, N: NetworkFetch> CacheWorker<S, N> {
    pub const fn new(config: WorkerConfig, store: S, net: N) -> Self {
        Self {
            config,
            state: WorkerState::Installing,
            store,
            net,
        }
    }

    /// Re-attach a worker version that already installed and activated in an
    /// earlier host session. The environment keeps an activated worker in
    /// control across reloads without reinstalling it; pair this with a
    /// persistent store such as [`DirStore`].
    pub const fn resume_active(config: WorkerConfig, store: S, net: N) -> Self {
        Self {
            config,
            state: WorkerState::Active,
            store,
            net,
        }
    }

    pub const fn state(&self) -> WorkerState {
        self.state
    }

    pub const fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Populate the current generation with the precache manifest.
    ///
    /// Every manifest asset must fetch with a success status and store
    /// cleanly; on any failure the whole install fails, the state stays
    /// [`WorkerState::Installing`] and this worker version never activates
    /// (whatever was previously in control stays in control).
    ///
    /// # Errors
    ///
    /// Returns the first install failure encountered.
    pub fn handle_install(&mut self) -> Result<(), WorkerError> {
        if self.state != WorkerState::Installing {
            return Err(WorkerError::AlreadyInstalled);
        }

        for path in &self.config.precache {
            let url = self.config.asset_url(path);
            let request = AssetRequest::get(&url);
            let response = self
                .net
                .fetch(&request)
                .map_err(|source| WorkerError::InstallFetch {
                    url: url.clone(),
                    source,
                })?;
            if !response.is_success() {
                return Err(WorkerError::InstallStatus {
                    url,
                    status: response.status,
                });
            }
            self.store.put(&self.config.cache_name, &url, response)?;
        }

        debug!(
            cache = %self.config.cache_name,
            assets = self.config.precache.len(),
            "precached initial assets"
        );
        self.state = WorkerState::Waiting;
        Ok(())
    }

    /// Take control: delete every cache generation whose name differs from
    /// the current version tag.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::NotInstalled`] before a successful install,
    /// or a store failure from the purge.
    pub fn handle_activate(&mut self) -> Result<(), WorkerError> {
        if self.state != WorkerState::Waiting {
            return Err(WorkerError::NotInstalled);
        }

        for generation in self.store.generations()? {
            if generation != self.config.cache_name {
                debug!(%generation, "clearing stale cache generation");
                self.store.delete_generation(&generation)?;
            }
        }
        self.state = WorkerState::Active;
        Ok(())
    }

    /// Answer one outgoing request, network-first.
    ///
    /// Non-GET and cross-origin requests are never intercepted, and a
    /// worker that is not active leaves every request to whatever is
    /// currently in control. On a live response with a success status a
    /// copy is stored best-effort; a failed cache write never fails the
    /// response. With the network unreachable the order is: cached entry,
    /// then (for navigations) the cached shell document, then a synthetic
    /// 503.
    pub fn handle_fetch(&mut self, request: &AssetRequest) -> FetchDecision {
        if self.state != WorkerState::Active
            || !request.method.is_get()
            || origin_of(&request.url) != Some(self.config.origin.as_str())
        {
            return FetchDecision::PassThrough;
        }

        match self.net.fetch(request) {
            Ok(response) => {
                if response.is_success() {
                    match self
                        .store
                        .put(&self.config.cache_name, &request.url, response.clone())
                    {
                        Ok(()) => debug!(url = %request.url, "cached new asset"),
                        Err(err) => warn!(url = %request.url, "failed to cache asset: {err}"),
                    }
                }
                FetchDecision::Respond(response)
            }
            Err(err) => {
                debug!(url = %request.url, "network failed, serving from cache: {err}");
                FetchDecision::Respond(self.serve_from_cache(request))
            }
        }
    }

    fn serve_from_cache(&self, request: &AssetRequest) -> AssetResponse {
        if let Some(cached) = self.lookup(&request.url) {
            return cached;
        }
        if request.mode == RequestMode::Navigate {
            if let Some(shell) = self.lookup(&self.config.asset_url(SHELL_DOCUMENT)) {
                return shell;
            }
        }
        AssetResponse::service_unavailable()
    }

    fn lookup(&self, url: &str) -> Option<AssetResponse> {
        match self.store.get(&self.config.cache_name, url) {
            Ok(entry) => entry,
            Err(err) => {
                warn!(%url, "cache lookup failed: {err}");
                None
            }
        }
    }
}
