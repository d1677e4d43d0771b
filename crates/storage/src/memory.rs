//! In-memory reference store
//!
//! DashMap-backed implementation of the `Store` contract.
//!
//! # Design
//!
//! - DashMap: sharded by default, reads and writes only lock the target shard
//! - FxHasher: fast non-crypto hash for byte keys
//! - Write counter: monotonically increasing, used by tests and benches to
//!   check how many saves a persist issued
//!
//! List fan-out writes disjoint keys from many worker threads at once; the
//! shard-level locking keeps those writes independent.

use dashmap::DashMap;
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;
use typedkv_core::{display_key, Error, Result, Store};

type FxBuildHasher = BuildHasherDefault<FxHasher>;

/// Concurrent in-memory byte store
///
/// # Example
///
/// ```
/// use typedkv_core::Store;
/// use typedkv_storage::MemoryStore;
///
/// let store = MemoryStore::new();
/// store.save(b"k", b"v").unwrap();
/// assert_eq!(store.load(b"k").unwrap(), b"v".to_vec());
/// assert!(store.load(b"missing").unwrap_err().is_not_found());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: DashMap<Vec<u8>, Vec<u8>, FxBuildHasher>,
    writes: AtomicU64,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with expected number of keys
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: DashMap::with_capacity_and_hasher(capacity, FxBuildHasher::default()),
            writes: AtomicU64::new(0),
        }
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if no key is stored
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check if a composed key exists
    pub fn contains(&self, key: &[u8]) -> bool {
        self.data.contains_key(key)
    }

    /// Read raw bytes without going through the `Store` contract
    pub fn raw_get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.data.get(key).map(|entry| entry.value().clone())
    }

    /// All stored keys, sorted
    pub fn keys(&self) -> Vec<Vec<u8>> {
        let mut keys: Vec<Vec<u8>> = self.data.iter().map(|entry| entry.key().clone()).collect();
        keys.sort();
        keys
    }

    /// Remove a key, returning its value
    pub fn remove(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.data.remove(key).map(|(_, v)| v)
    }

    /// Drop every key
    pub fn clear(&self) {
        self.data.clear();
    }

    /// Total number of successful saves since creation
    #[inline]
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Acquire)
    }
}

impl Store for MemoryStore {
    fn save(&self, key: &[u8], value: &[u8]) -> Result<()> {
        trace!(target: "typedkv::store", key = %display_key(key), len = value.len(), "save");
        self.data.insert(key.to_vec(), value.to_vec());
        self.writes.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    fn load(&self, key: &[u8]) -> Result<Vec<u8>> {
        match self.data.get(key) {
            Some(entry) => {
                trace!(target: "typedkv::store", key = %display_key(key), len = entry.len(), "load");
                Ok(entry.value().clone())
            }
            None => Err(Error::not_found(key)),
        }
    }
}
