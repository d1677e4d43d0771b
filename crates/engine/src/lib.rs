//! Persistence engine for typedkv
//!
//! This crate turns values into tagged keys and back:
//! - Scalar codec: fixed-width little-endian numerics, bools, bytes, strings
//! - List codec: element fan-out on a rayon pool, length/tag metadata keys
//! - PersistentValue: runtime-typed sum over every kind
//! - Aggregate binder: record field tables, per-field outcomes
//! - Persister: codecs bound to a configured worker pool
//!
//! The engine only knows the `Store` contract from `typedkv-core`; any
//! byte-keyed backend that honours it works.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregate;
pub mod config;
pub mod list;
pub mod persistent;
pub mod persister;
pub mod scalar;
pub mod value;

pub use aggregate::{
    first_error, persist_aggregate, persist_record, restore_aggregate, restore_record, Field,
    FieldOutcome, Record,
};
pub use config::{PersistConfig, CONFIG_FILE_NAME};
pub use list::{persist_list, restore_list};
pub use persistent::{load, Persistent};
pub use persister::Persister;
pub use scalar::{persist_scalar, restore_scalar, Byte, Scalar};
pub use value::PersistentValue;

// Used by the exported macros.
pub use typedkv_core::{Error, Result, Store, TypeTag};
