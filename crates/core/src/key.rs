//! Key composition for typedkv
//!
//! Keys are opaque byte strings. Every helper here is a pure concatenation;
//! the layout below is the persisted format and MUST NOT change:
//!
//! ```text
//! scalar        [tag] ++ raw
//! list          [List] ++ raw                       (= list_key)
//! list length   [Uint64] ++ "l" ++ list_key
//! list tag      [Byte]   ++ "t" ++ list_key
//! list element  list_key ++ ":" ++ [elem_tag] ++ decimal(index)   (raw key of the element)
//! record field  id ++ "/" ++ field_name                            (raw key of the field)
//! ```
//!
//! The element suffix uses the raw tag byte as its "tag char". All tags are
//! below 0x80, so the suffix is a single byte.

use crate::types::TypeTag;
use std::fmt::Write as _;

/// Prefix of the raw key holding a list's length
pub const LIST_LENGTH_PREFIX: u8 = b'l';
/// Prefix of the raw key holding a list's element tag
pub const LIST_TAG_PREFIX: u8 = b't';
/// Separator between a list key and an element suffix
pub const ELEMENT_SEPARATOR: u8 = b':';
/// Separator between a record id and a field name
pub const FIELD_SEPARATOR: u8 = b'/';

/// Prepend a tag byte to a raw key
pub fn compose_key(tag: TypeTag, raw: &[u8]) -> Vec<u8> {
    let mut key = Vec::with_capacity(raw.len() + 1);
    key.push(tag.as_byte());
    key.extend_from_slice(raw);
    key
}

/// Composed key of a list: `[List] ++ raw`
pub fn list_key(raw: &[u8]) -> Vec<u8> {
    compose_key(TypeTag::List, raw)
}

/// Raw key under which a list's length is persisted as Uint64
pub fn list_length_key(list_key: &[u8]) -> Vec<u8> {
    prefixed(LIST_LENGTH_PREFIX, list_key)
}

/// Raw key under which a list's element tag is persisted as Byte
pub fn list_tag_key(list_key: &[u8]) -> Vec<u8> {
    prefixed(LIST_TAG_PREFIX, list_key)
}

/// Raw key of list element `index`
pub fn element_key(list_key: &[u8], elem_tag: TypeTag, index: usize) -> Vec<u8> {
    let mut key = Vec::with_capacity(list_key.len() + 2 + 20);
    key.extend_from_slice(list_key);
    key.push(ELEMENT_SEPARATOR);
    key.push(elem_tag.as_byte());
    key.extend_from_slice(index.to_string().as_bytes());
    key
}

/// Raw key of a record field: `id ++ "/" ++ field`
pub fn field_key(id: &[u8], field: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(id.len() + 1 + field.len());
    key.extend_from_slice(id);
    key.push(FIELD_SEPARATOR);
    key.extend_from_slice(field.as_bytes());
    key
}

fn prefixed(prefix: u8, key: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(key.len() + 1);
    out.push(prefix);
    out.extend_from_slice(key);
    out
}

/// Render a key for logs and error messages
///
/// Printable ASCII is kept, everything else is escaped as `\xNN`.
pub fn display_key(key: &[u8]) -> String {
    let mut out = String::with_capacity(key.len());
    for &b in key {
        if b.is_ascii_graphic() || b == b' ' {
            out.push(b as char);
        } else {
            let _ = write!(out, "\\x{:02x}", b);
        }
    }
    out
}
