//! Core traits for storage abstraction
//!
//! This module defines the `Store` trait, the only contract the codecs need
//! from the byte-keyed backend. Swapping implementations never touches the
//! codecs.

use crate::error::Result;
use std::sync::Arc;

/// Byte-keyed get/put abstraction
///
/// The store is the sole owner of persisted bytes. Values have no identity
/// beyond their key.
///
/// Thread safety: list fan-out calls `save`/`load` concurrently for disjoint
/// keys from several worker threads, so implementations must be `Send + Sync`
/// and tolerate that without external locking.
pub trait Store: Send + Sync {
    /// Write `value` under `key`, replacing any previous value
    ///
    /// A subsequent `load` of the same key in the same process must observe
    /// this write.
    ///
    /// # Errors
    ///
    /// Returns `Io` or `Storage` if the write fails.
    fn save(&self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Read the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the key was never written, `Io` or `Storage`
    /// for any other failure.
    fn load(&self, key: &[u8]) -> Result<Vec<u8>>;
}

impl<S: Store + ?Sized> Store for &S {
    fn save(&self, key: &[u8], value: &[u8]) -> Result<()> {
        (**self).save(key, value)
    }

    fn load(&self, key: &[u8]) -> Result<Vec<u8>> {
        (**self).load(key)
    }
}

impl<S: Store + ?Sized> Store for Arc<S> {
    fn save(&self, key: &[u8], value: &[u8]) -> Result<()> {
        (**self).save(key, value)
    }

    fn load(&self, key: &[u8]) -> Result<Vec<u8>> {
        (**self).load(key)
    }
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn save(&self, key: &[u8], value: &[u8]) -> Result<()> {
        (**self).save(key, value)
    }

    fn load(&self, key: &[u8]) -> Result<Vec<u8>> {
        (**self).load(key)
    }
}
