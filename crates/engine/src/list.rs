//! Composite codec for lists
//!
//! A list under raw key `k` occupies:
//!
//! ```text
//! [Uint64] "l" [List] k            length
//! [Byte]   "t" [List] k            element tag
//! <elem>   [List] k ":" [tag] i    element i, for i in 0..length
//! ```
//!
//! Elements are written and read with a rayon parallel map over indices.
//! Each task touches a disjoint key, so completion order does not matter and
//! restore rebuilds the original order from the indices alone.
//!
//! Persisting is NOT atomic across these keys. A failed persist may leave
//! some elements (and the metadata) written; a reader racing a persist may see
//! metadata that does not match the elements.

use crate::persistent::Persistent;
use crate::scalar::{persist_scalar, restore_scalar, Byte};
use rayon::prelude::*;
use tracing::{debug, warn};
use typedkv_core::{
    display_key, element_key, list_key, list_length_key, list_tag_key, Error, Result, Store,
    TypeTag,
};

/// Tag shared by every element, taken from element 0
///
/// Empty lists record `Undefined`. Lists mixing tags are rejected with a
/// `Codec` error naming the first offending index.
pub fn element_tag<T: Persistent>(items: &[T], list_key: &[u8]) -> Result<TypeTag> {
    let Some(first) = items.first() else {
        return Ok(TypeTag::Undefined);
    };
    let tag = first.tag();
    if let Some((index, other)) = items
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, item)| item.tag() != tag)
    {
        return Err(Error::codec(
            list_key,
            format!(
                "mixed element tags: element 0 is {}, element {} is {}",
                tag,
                index,
                other.tag()
            ),
        ));
    }
    Ok(tag)
}

/// Persist `items` under raw key `key`
///
/// The element fan-out and the two metadata writes run concurrently; the call
/// returns once all of them have finished.
///
/// # Errors
///
/// - `Codec` if elements do not share one tag (nothing is written)
/// - `PartialFailure` if one or more elements failed; the lowest failing
///   index is the representative error
/// - the metadata write error otherwise
pub fn persist_list<T: Persistent>(items: &[T], store: &dyn Store, key: &[u8]) -> Result<()> {
    let lk = list_key(key);
    let tag = element_tag(items, &lk)?;

    let (element_results, metadata) = rayon::join(
        || {
            items
                .par_iter()
                .enumerate()
                .map(|(index, item)| item.persist(store, &element_key(&lk, tag, index)))
                .collect::<Vec<Result<()>>>()
        },
        || {
            let length = persist_scalar(&(items.len() as u64), store, &list_length_key(&lk));
            let elem_tag = persist_scalar(&Byte(tag.as_byte()), store, &list_tag_key(&lk));
            length.and(elem_tag)
        },
    );

    let total = element_results.len();
    let mut failed = 0;
    let mut representative = None;
    for result in element_results {
        if let Err(e) = result {
            failed += 1;
            representative.get_or_insert(e);
        }
    }

    if let Some(source) = representative {
        warn!(
            target: "typedkv::list",
            key = %display_key(&lk),
            failed,
            total,
            error = %source,
            "List persist failed for some elements"
        );
        return Err(Error::PartialFailure {
            failed,
            total,
            source: Box::new(source),
        });
    }
    metadata?;

    debug!(target: "typedkv::list", key = %display_key(&lk), len = total, tag = %tag, "List persisted");
    Ok(())
}

/// Restore the list stored under raw key `key`
///
/// Length and element tag are read first, sequentially; then every element
/// is restored in parallel into a placeholder obtained from
/// [`Persistent::placeholder`].
///
/// # Errors
///
/// - `NotFound` if the list metadata is missing
/// - `Codec` if the stored element tag is unknown, or `T` cannot hold it
/// - the first element error encountered; no partial list is returned
pub fn restore_list<T: Persistent>(store: &dyn Store, key: &[u8]) -> Result<Vec<T>> {
    let lk = list_key(key);
    let length: u64 = restore_scalar(store, &list_length_key(&lk))?;
    let Byte(raw_tag) = restore_scalar(store, &list_tag_key(&lk))?;

    let tag = TypeTag::from_byte(raw_tag)
        .ok_or_else(|| Error::codec(lk.as_slice(), format!("unknown element tag 0x{:02x}", raw_tag)))?;
    let length = usize::try_from(length)
        .map_err(|_| Error::codec(lk.as_slice(), format!("list length {} overflows usize", length)))?;

    if length == 0 {
        debug!(target: "typedkv::list", key = %display_key(&lk), len = 0, "List restored");
        return Ok(Vec::new());
    }

    // Check once up front so the fan-out below cannot start a task for a tag
    // the element type cannot represent.
    if T::placeholder(tag).is_none() {
        return Err(unsupported(&lk, tag));
    }

    let items = (0..length)
        .into_par_iter()
        .map(|index| {
            let mut item = T::placeholder(tag).ok_or_else(|| unsupported(&lk, tag))?;
            item.restore(store, &element_key(&lk, tag, index))?;
            Ok(item)
        })
        .collect::<Result<Vec<T>>>()?;

    debug!(target: "typedkv::list", key = %display_key(&lk), len = length, tag = %tag, "List restored");
    Ok(items)
}

fn unsupported(lk: &[u8], tag: TypeTag) -> Error {
    Error::codec(lk, format!("cannot restore {} elements into this list type", tag))
}

impl<T: Persistent> Persistent for Vec<T> {
    fn tag(&self) -> TypeTag {
        TypeTag::List
    }

    fn persist(&self, store: &dyn Store, key: &[u8]) -> Result<()> {
        persist_list(self, store, key)
    }

    fn restore(&mut self, store: &dyn Store, key: &[u8]) -> Result<()> {
        *self = restore_list(store, key)?;
        Ok(())
    }

    fn placeholder(tag: TypeTag) -> Option<Self> {
        (tag == TypeTag::List).then(Vec::new)
    }
}
