//! Dynamic persistable value
//!
//! `PersistentValue` is the closed sum of every kind the codecs understand.
//! It is what you reach for when the kind is only known at runtime, for
//! example when restoring a list whose element tag is read from the store.
//! [`PersistentValue::empty`] is the total factory from tag to variant.

use crate::list::{persist_list, restore_list};
use crate::persistent::Persistent;
use crate::scalar::{persist_scalar, restore_scalar, Byte};
use typedkv_core::{compose_key, Error, Result, Store, TypeTag};

const UNDEFINED_REASON: &str = "undefined tag has no value representation";

/// Tagged value capable of self-encoding
///
/// Lists hold further `PersistentValue`s and must share one element tag.
#[derive(Debug, Clone, PartialEq)]
pub enum PersistentValue {
    /// Boolean
    Bool(bool),
    /// Signed 8-bit integer
    Int8(i8),
    /// Signed 16-bit integer
    Int16(i16),
    /// Signed 32-bit integer
    Int32(i32),
    /// Signed 64-bit integer
    Int64(i64),
    /// Unsigned 8-bit integer
    Uint8(u8),
    /// Unsigned 16-bit integer
    Uint16(u16),
    /// Unsigned 32-bit integer
    Uint32(u32),
    /// Unsigned 64-bit integer
    Uint64(u64),
    /// Single precision float
    Float32(f32),
    /// Double precision float
    Float64(f64),
    /// UTF-8 string
    String(String),
    /// Ordered list of values sharing one tag
    List(Vec<PersistentValue>),
    /// Raw byte
    Byte(u8),
}

impl PersistentValue {
    /// Empty placeholder for `tag`
    ///
    /// Zero for numerics, `false`, the empty string, or the empty list.
    ///
    /// # Errors
    ///
    /// `Undefined` has no value representation and yields a `Codec` error.
    pub fn empty(tag: TypeTag) -> Result<Self> {
        Ok(match tag {
            TypeTag::Bool => PersistentValue::Bool(false),
            TypeTag::Int8 => PersistentValue::Int8(0),
            TypeTag::Int16 => PersistentValue::Int16(0),
            TypeTag::Int32 => PersistentValue::Int32(0),
            TypeTag::Int64 => PersistentValue::Int64(0),
            TypeTag::Uint8 => PersistentValue::Uint8(0),
            TypeTag::Uint16 => PersistentValue::Uint16(0),
            TypeTag::Uint32 => PersistentValue::Uint32(0),
            TypeTag::Uint64 => PersistentValue::Uint64(0),
            TypeTag::Float32 => PersistentValue::Float32(0.0),
            TypeTag::Float64 => PersistentValue::Float64(0.0),
            TypeTag::String => PersistentValue::String(String::new()),
            TypeTag::List => PersistentValue::List(Vec::new()),
            TypeTag::Byte => PersistentValue::Byte(0),
            TypeTag::Undefined => {
                return Err(Error::codec(Vec::<u8>::new(), UNDEFINED_REASON))
            }
        })
    }

    /// Restore a fresh value of kind `tag` from raw key `key`
    ///
    /// # Errors
    ///
    /// `Undefined` yields a `Codec` error naming the composed key; otherwise
    /// any restore error.
    pub fn load(tag: TypeTag, store: &dyn Store, key: &[u8]) -> Result<Self> {
        let mut value = Self::placeholder(tag)
            .ok_or_else(|| Error::codec(compose_key(tag, key), UNDEFINED_REASON))?;
        value.restore(store, key)?;
        Ok(value)
    }

    /// Elements if this is a list
    pub fn as_list(&self) -> Option<&[PersistentValue]> {
        match self {
            PersistentValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Widened signed value for any integer kind that fits in `i64`
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            PersistentValue::Int8(v) => Some(v.into()),
            PersistentValue::Int16(v) => Some(v.into()),
            PersistentValue::Int32(v) => Some(v.into()),
            PersistentValue::Int64(v) => Some(v),
            PersistentValue::Uint8(v) | PersistentValue::Byte(v) => Some(v.into()),
            PersistentValue::Uint16(v) => Some(v.into()),
            PersistentValue::Uint32(v) => Some(v.into()),
            PersistentValue::Uint64(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    /// String slice if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PersistentValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Persistent for PersistentValue {
    fn tag(&self) -> TypeTag {
        match self {
            PersistentValue::Bool(_) => TypeTag::Bool,
            PersistentValue::Int8(_) => TypeTag::Int8,
            PersistentValue::Int16(_) => TypeTag::Int16,
            PersistentValue::Int32(_) => TypeTag::Int32,
            PersistentValue::Int64(_) => TypeTag::Int64,
            PersistentValue::Uint8(_) => TypeTag::Uint8,
            PersistentValue::Uint16(_) => TypeTag::Uint16,
            PersistentValue::Uint32(_) => TypeTag::Uint32,
            PersistentValue::Uint64(_) => TypeTag::Uint64,
            PersistentValue::Float32(_) => TypeTag::Float32,
            PersistentValue::Float64(_) => TypeTag::Float64,
            PersistentValue::String(_) => TypeTag::String,
            PersistentValue::List(_) => TypeTag::List,
            PersistentValue::Byte(_) => TypeTag::Byte,
        }
    }

    fn persist(&self, store: &dyn Store, key: &[u8]) -> Result<()> {
        match self {
            PersistentValue::Bool(v) => persist_scalar(v, store, key),
            PersistentValue::Int8(v) => persist_scalar(v, store, key),
            PersistentValue::Int16(v) => persist_scalar(v, store, key),
            PersistentValue::Int32(v) => persist_scalar(v, store, key),
            PersistentValue::Int64(v) => persist_scalar(v, store, key),
            PersistentValue::Uint8(v) => persist_scalar(v, store, key),
            PersistentValue::Uint16(v) => persist_scalar(v, store, key),
            PersistentValue::Uint32(v) => persist_scalar(v, store, key),
            PersistentValue::Uint64(v) => persist_scalar(v, store, key),
            PersistentValue::Float32(v) => persist_scalar(v, store, key),
            PersistentValue::Float64(v) => persist_scalar(v, store, key),
            PersistentValue::String(v) => persist_scalar(v, store, key),
            PersistentValue::List(items) => persist_list(items, store, key),
            PersistentValue::Byte(v) => persist_scalar(&Byte(*v), store, key),
        }
    }

    /// Restores a value of the kind this placeholder currently holds
    fn restore(&mut self, store: &dyn Store, key: &[u8]) -> Result<()> {
        match self {
            PersistentValue::Bool(v) => *v = restore_scalar(store, key)?,
            PersistentValue::Int8(v) => *v = restore_scalar(store, key)?,
            PersistentValue::Int16(v) => *v = restore_scalar(store, key)?,
            PersistentValue::Int32(v) => *v = restore_scalar(store, key)?,
            PersistentValue::Int64(v) => *v = restore_scalar(store, key)?,
            PersistentValue::Uint8(v) => *v = restore_scalar(store, key)?,
            PersistentValue::Uint16(v) => *v = restore_scalar(store, key)?,
            PersistentValue::Uint32(v) => *v = restore_scalar(store, key)?,
            PersistentValue::Uint64(v) => *v = restore_scalar(store, key)?,
            PersistentValue::Float32(v) => *v = restore_scalar(store, key)?,
            PersistentValue::Float64(v) => *v = restore_scalar(store, key)?,
            PersistentValue::String(v) => *v = restore_scalar(store, key)?,
            PersistentValue::List(items) => *items = restore_list(store, key)?,
            PersistentValue::Byte(v) => *v = restore_scalar::<Byte>(store, key)?.0,
        }
        Ok(())
    }

    fn placeholder(tag: TypeTag) -> Option<Self> {
        Self::empty(tag).ok()
    }
}

macro_rules! from_native {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for PersistentValue {
                fn from(v: $ty) -> Self {
                    PersistentValue::$variant(v)
                }
            }
        )*
    };
}

from_native! {
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    f32 => Float32,
    f64 => Float64,
    String => String,
}

impl From<&str> for PersistentValue {
    fn from(v: &str) -> Self {
        PersistentValue::String(v.to_string())
    }
}

impl From<Byte> for PersistentValue {
    fn from(v: Byte) -> Self {
        PersistentValue::Byte(v.0)
    }
}

impl<T: Into<PersistentValue>> From<Vec<T>> for PersistentValue {
    fn from(items: Vec<T>) -> Self {
        PersistentValue::List(items.into_iter().map(Into::into).collect())
    }
}
