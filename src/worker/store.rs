//! Generation-grouped asset store.
//!
//! Entries are captured responses keyed by request URL, grouped under a
//! named cache generation (the worker's version tag). [`MemoryStore`] is
//! ephemeral; [`DirStore`] persists each generation as one JSON file so a
//! cached shell survives process restarts.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use crate::worker::assets::AssetResponse;

/// Failure in the underlying store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cache store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache store entry is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A key-value asset store keyed by generation name, each generation keyed
/// by request URL.
pub trait AssetStore {
    /// Store `response` for `url`, creating the generation if needed.
    /// Overwrites any previous entry for the same URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be written.
    fn put(&mut self, generation: &str, url: &str, response: AssetResponse)
    -> Result<(), StoreError>;

    /// Look up the entry for `url` in `generation`.
    ///
    /// # Errors
    ///
    /// Returns an error if the generation exists but cannot be read.
    fn get(&self, generation: &str, url: &str) -> Result<Option<AssetResponse>, StoreError>;

    /// Names of every generation currently present.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be enumerated.
    fn generations(&self) -> Result<Vec<String>, StoreError>;

    /// Remove a whole generation. Removing an absent generation is fine.
    ///
    /// # Errors
    ///
    /// Returns an error if the generation cannot be deleted.
    fn delete_generation(&mut self, generation: &str) -> Result<(), StoreError>;
}

/// Ephemeral store for tests and in-process hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    generations: HashMap<String, BTreeMap<String, AssetResponse>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AssetStore for MemoryStore {
    fn put(
        &mut self,
        generation: &str,
        url: &str,
        response: AssetResponse,
    ) -> Result<(), StoreError> {
        self.generations
            .entry(generation.to_string())
            .or_default()
            .insert(url.to_string(), response);
        Ok(())
    }

    fn get(&self, generation: &str, url: &str) -> Result<Option<AssetResponse>, StoreError> {
        Ok(self
            .generations
            .get(generation)
            .and_then(|entries| entries.get(url))
            .cloned())
    }

    fn generations(&self) -> Result<Vec<String>, StoreError> {
        let mut names: Vec<String> = self.generations.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn delete_generation(&mut self, generation: &str) -> Result<(), StoreError> {
        self.generations.remove(generation);
        Ok(())
    }
}

/// Store persisted under a root directory, one `<generation>.json` file per
/// generation holding a URL-to-entry map.
///
/// Generation names double as file stems, so they must be valid file names;
/// version tags like `app-shell-v2` are.
#[derive(Debug)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Open (and create if needed) a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn generation_path(&self, generation: &str) -> PathBuf {
        self.root.join(format!("{generation}.json"))
    }

    fn load_generation(&self, generation: &str) -> Result<BTreeMap<String, AssetResponse>, StoreError> {
        let path = self.generation_path(generation);
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save_generation(
        &self,
        generation: &str,
        entries: &BTreeMap<String, AssetResponse>,
    ) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(entries)?;
        fs::write(self.generation_path(generation), encoded)?;
        Ok(())
    }
}

impl AssetStore for DirStore {
    fn put(
        &mut self,
        generation: &str,
        url: &str,
        response: AssetResponse,
    ) -> Result<(), StoreError> {
        let mut entries = self.load_generation(generation)?;
        entries.insert(url.to_string(), response);
        self.save_generation(generation, &entries)
    }

    fn get(&self, generation: &str, url: &str) -> Result<Option<AssetResponse>, StoreError> {
        Ok(self.load_generation(generation)?.remove(url))
    }

    fn generations(&self) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem() {
                    names.push(stem.to_string_lossy().into_owned());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete_generation(&mut self, generation: &str) -> Result<(), StoreError> {
        let path = self.generation_path(generation);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
