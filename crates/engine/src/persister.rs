//! Persister: codecs bound to a dedicated worker pool
//!
//! Calling the codecs directly runs list fan-out on rayon's global pool.
//! A `Persister` owns its own pool, built from [`PersistConfig`], and runs
//! every operation inside it so nested fan-out stays on those threads.

use crate::aggregate::{deliver, persist_record, restore_record, FieldOutcome, Record};
use crate::config::{PersistConfig, CONFIG_FILE_NAME};
use crate::persistent::Persistent;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use typedkv_core::{Error, Result, Store};

/// Handle owning the fan-out worker pool
///
/// Cheap to clone; clones share the pool.
#[derive(Clone)]
pub struct Persister {
    pool: Arc<ThreadPool>,
    config: PersistConfig,
}

impl std::fmt::Debug for Persister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persister")
            .field("threads", &self.pool.current_num_threads())
            .field("config", &self.config)
            .finish()
    }
}

impl Persister {
    /// Build a persister and its worker pool
    ///
    /// # Errors
    ///
    /// Returns `Config` if the config is invalid or the pool cannot start.
    pub fn new(config: PersistConfig) -> Result<Self> {
        config.validate()?;
        let prefix = config.thread_name_prefix.clone();
        let mut builder = ThreadPoolBuilder::new().thread_name(move |i| format!("{}-{}", prefix, i));
        if let Some(threads) = config.worker_threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to start worker pool: {}", e)))?;
        info!(target: "typedkv::persister", threads = pool.current_num_threads(), "Worker pool started");
        Ok(Self {
            pool: Arc::new(pool),
            config,
        })
    }

    /// Build a persister with the default config
    pub fn with_defaults() -> Result<Self> {
        Self::new(PersistConfig::default())
    }

    /// Build a persister from `dir/typedkv.toml`, creating a default file
    /// if none exists
    pub fn open(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        PersistConfig::write_default_if_missing(&path)?;
        Self::new(PersistConfig::from_file(&path)?)
    }

    /// Active configuration
    pub fn config(&self) -> &PersistConfig {
        &self.config
    }

    /// Number of worker threads
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Persist `value` under `key`
    pub fn persist<P>(&self, value: &P, store: &dyn Store, key: &[u8]) -> Result<()>
    where
        P: Persistent + ?Sized,
    {
        self.pool.install(|| value.persist(store, key))
    }

    /// Restore `value` in place from `key`
    pub fn restore<P>(&self, value: &mut P, store: &dyn Store, key: &[u8]) -> Result<()>
    where
        P: Persistent + ?Sized,
    {
        self.pool.install(|| value.restore(store, key))
    }

    /// Restore a fresh `T` from `key`
    pub fn load<T: Persistent + Default>(&self, store: &dyn Store, key: &[u8]) -> Result<T> {
        self.pool.install(|| crate::persistent::load(store, key))
    }

    /// Persist every present field of `record`, one outcome per field
    pub fn persist_record<R>(&self, id: &str, record: &R, store: &dyn Store) -> Vec<FieldOutcome>
    where
        R: Record + Sync,
    {
        self.pool.install(|| persist_record(id, record, store))
    }

    /// Restore every field of `record`, one outcome per field
    pub fn restore_record<R>(&self, id: &str, record: &mut R, store: &dyn Store) -> Vec<FieldOutcome>
    where
        R: Record + Send,
    {
        self.pool.install(|| restore_record(id, record, store))
    }

    /// Persist `record`, delivering each failing field to `on_error`
    pub fn persist_aggregate<R, F>(&self, id: &str, record: &R, store: &dyn Store, on_error: F)
    where
        R: Record + Sync,
        F: FnMut(&'static str, Error),
    {
        deliver(self.persist_record(id, record, store), on_error);
    }

    /// Restore `record`, delivering each failing field to `on_error`
    pub fn restore_aggregate<R, F>(&self, id: &str, record: &mut R, store: &dyn Store, on_error: F)
    where
        R: Record + Send,
        F: FnMut(&'static str, Error),
    {
        deliver(self.restore_record(id, record, store), on_error);
    }
}
