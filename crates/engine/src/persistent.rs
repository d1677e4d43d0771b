//! The persistable capability
//!
//! Anything that can write itself under a raw key and read itself back
//! implements [`Persistent`]. The scalar codec, the list codec, the dynamic
//! [`PersistentValue`](crate::PersistentValue) and opted-in records all meet
//! here, which is what lets lists nest and records hold lists.

use typedkv_core::{Result, Store, TypeTag};

/// A value capable of self-encoding into, and self-decoding from, a key
///
/// `key` is always the *raw* key: implementations compose their own tag
/// prefix (see [`typedkv_core::compose_key`]).
///
/// Implementations must be `Send + Sync` because list elements are persisted
/// and restored from worker threads.
pub trait Persistent: Send + Sync {
    /// Tag recorded for this value
    ///
    /// For lists this is the tag of the list itself (`List`), not of its
    /// elements. Records report `Undefined`.
    fn tag(&self) -> TypeTag;

    /// Write this value under `key`
    ///
    /// # Errors
    ///
    /// Propagates store failures; lists may also return `Codec` (mixed
    /// element tags) or `PartialFailure`.
    fn persist(&self, store: &dyn Store, key: &[u8]) -> Result<()>;

    /// Replace this value with the one stored under `key`
    ///
    /// On error the value is left in an unspecified but valid state.
    ///
    /// # Errors
    ///
    /// `NotFound` if nothing was persisted under `key`, `Codec` if the
    /// stored bytes do not decode.
    fn restore(&mut self, store: &dyn Store, key: &[u8]) -> Result<()>;

    /// Allocate an empty placeholder able to restore a value persisted with
    /// `tag`
    ///
    /// Returns `None` when this type cannot hold values of that tag. Lists
    /// call this once per element before restoring it.
    fn placeholder(tag: TypeTag) -> Option<Self>
    where
        Self: Sized;
}

/// Restore a fresh value of type `T` from `key`
///
/// Convenience wrapper over a default placeholder plus [`Persistent::restore`].
pub fn load<T: Persistent + Default>(store: &dyn Store, key: &[u8]) -> Result<T> {
    let mut value = T::default();
    value.restore(store, key)?;
    Ok(value)
}
