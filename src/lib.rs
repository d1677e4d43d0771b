//! typedkv - tag-prefixed typed value persistence
//!
//! typedkv writes scalars, lists and records into any byte-keyed store and
//! reads them back. Every key carries a one-byte type tag, so a reader always
//! knows what it is decoding.
//!
//! # Quick Start
//!
//! ```
//! use typedkv::{load, MemoryStore, Persistent};
//!
//! let store = MemoryStore::new();
//!
//! (-388i32).persist(&store, b"test")?;
//! assert_eq!(load::<i32>(&store, b"test")?, -388);
//!
//! vec![-44i64, 33, 33].persist(&store, b"list")?;
//! assert_eq!(load::<Vec<i64>>(&store, b"list")?, vec![-44, 33, 33]);
//! # Ok::<(), typedkv::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `typedkv-core`: type tags, key composition, errors, the `Store` trait
//! - `typedkv-storage`: the in-memory reference store
//! - `typedkv-engine`: scalar and list codecs, `PersistentValue`, the record
//!   binder and the pooled `Persister`

pub use typedkv_core::{
    compose_key, display_key, element_key, field_key, list_key, list_length_key, list_tag_key,
    Error, Result, Store, TypeTag,
};
pub use typedkv_engine::{
    aggregate, fields, first_error, impl_persistent_record, load, persist_aggregate, persist_list,
    persist_record, persist_scalar, restore_aggregate, restore_list, restore_record,
    restore_scalar, Byte, Field, FieldOutcome, PersistConfig, Persistent, PersistentValue,
    Persister, Record, Scalar, CONFIG_FILE_NAME,
};
pub use typedkv_storage::MemoryStore;
