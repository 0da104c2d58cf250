//! FILENAME: dataset/src/cache.rs
//! Process-scoped memoization of dataset loads.
//!
//! The cache is explicit: entries are keyed by file path and validated by
//! a content hash of the raw bytes, so editing the source file causes a
//! re-parse on the next load and `invalidate` gives callers a manual
//! escape hatch. There is no implicit global cache without an
//! invalidation path.

use crate::error::LoadError;
use crate::loader::parse_dataset;
use crate::record::Dataset;
use once_cell::sync::Lazy;
use rustc_hash::{FxHashMap, FxHasher};
use std::fs;
use std::hash::Hasher;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Hash of the raw file bytes, used to detect source changes.
fn content_hash(bytes: &[u8]) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(bytes);
    hasher.finish()
}

struct CacheEntry {
    content_hash: u64,
    dataset: Arc<Dataset>,
}

/// Memoizes `load_dataset` results per source file.
#[derive(Default)]
pub struct DatasetCache {
    entries: FxHashMap<PathBuf, CacheEntry>,
}

impl DatasetCache {
    pub fn new() -> Self {
        DatasetCache::default()
    }

    /// Loads the dataset at `path`, reusing the cached parse when the file
    /// content is unchanged. The file is read (and hashed) on every call;
    /// only the parse is memoized.
    pub fn load(&mut self, path: &Path) -> Result<Arc<Dataset>, LoadError> {
        let bytes = fs::read(path)?;
        let hash = content_hash(&bytes);

        if let Some(entry) = self.entries.get(path) {
            if entry.content_hash == hash {
                log::debug!("dataset cache hit for {}", path.display());
                return Ok(Arc::clone(&entry.dataset));
            }
            log::debug!(
                "dataset cache stale for {}, re-parsing",
                path.display()
            );
        }

        let dataset = Arc::new(parse_dataset(&bytes, path)?);
        self.entries.insert(
            path.to_path_buf(),
            CacheEntry {
                content_hash: hash,
                dataset: Arc::clone(&dataset),
            },
        );
        Ok(dataset)
    }

    /// Drops the cached entry for `path`. Returns whether one existed.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The shared process-wide cache instance. One logical request is in
/// flight at a time, so a mutex is coordination enough.
static GLOBAL_CACHE: Lazy<Mutex<DatasetCache>> = Lazy::new(|| Mutex::new(DatasetCache::new()));

/// Access to the process-wide cache.
pub fn global_cache() -> &'static Mutex<DatasetCache> {
    &GLOBAL_CACHE
}
