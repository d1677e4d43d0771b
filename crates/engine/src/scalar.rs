//! Scalar codec
//!
//! ## Value Format
//!
//! ```text
//! Bool      1 byte, 0x01 = true, 0x00 = false
//! Byte      1 raw byte
//! Int8..64  1/2/4/8 bytes, little-endian two's complement
//! Uint8..64 1/2/4/8 bytes, little-endian
//! Float32   4 bytes, little-endian IEEE-754
//! Float64   8 bytes, little-endian IEEE-754
//! String    raw UTF-8, no length prefix (the store delimits values)
//! ```
//!
//! Every value is saved under `[tag] ++ raw_key`. Decode insists on the exact
//! width: a short or long value is a `Codec` error, never a silent truncation.

use crate::persistent::Persistent;
use byteorder::{ByteOrder, LittleEndian};
use typedkv_core::{compose_key, Error, Result, Store, TypeTag};

/// A raw byte, persisted under the `Byte` tag
///
/// Distinct from `u8`, which persists under `Uint8`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Byte(pub u8);

impl From<u8> for Byte {
    fn from(b: u8) -> Self {
        Byte(b)
    }
}

impl From<Byte> for u8 {
    fn from(b: Byte) -> Self {
        b.0
    }
}

/// Fixed encoding of one primitive kind
pub trait Scalar: Sized {
    /// Tag prefixed onto every key holding this kind
    const TAG: TypeTag;

    /// Canonical byte representation
    fn encode(&self) -> Vec<u8>;

    /// Decode bytes loaded from `key` (the composed key, for error reporting)
    fn decode(key: &[u8], bytes: &[u8]) -> Result<Self>;
}

/// Encode `value` and save it under `[T::TAG] ++ key`
pub fn persist_scalar<T: Scalar>(value: &T, store: &dyn Store, key: &[u8]) -> Result<()> {
    store.save(&compose_key(T::TAG, key), &value.encode())
}

/// Load `[T::TAG] ++ key` and decode it
pub fn restore_scalar<T: Scalar>(store: &dyn Store, key: &[u8]) -> Result<T> {
    let full = compose_key(T::TAG, key);
    let bytes = store.load(&full)?;
    T::decode(&full, &bytes)
}

fn check_width(tag: TypeTag, key: &[u8], bytes: &[u8]) -> Result<()> {
    match tag.width() {
        Some(width) if bytes.len() != width => Err(Error::codec(
            key,
            format!("{} expects {} bytes, found {}", tag, width, bytes.len()),
        )),
        _ => Ok(()),
    }
}

impl Scalar for bool {
    const TAG: TypeTag = TypeTag::Bool;

    fn encode(&self) -> Vec<u8> {
        vec![u8::from(*self)]
    }

    fn decode(key: &[u8], bytes: &[u8]) -> Result<Self> {
        check_width(Self::TAG, key, bytes)?;
        Ok(bytes[0] == 1)
    }
}

impl Scalar for Byte {
    const TAG: TypeTag = TypeTag::Byte;

    fn encode(&self) -> Vec<u8> {
        vec![self.0]
    }

    fn decode(key: &[u8], bytes: &[u8]) -> Result<Self> {
        check_width(Self::TAG, key, bytes)?;
        Ok(Byte(bytes[0]))
    }
}

impl Scalar for i8 {
    const TAG: TypeTag = TypeTag::Int8;

    fn encode(&self) -> Vec<u8> {
        self.to_le_bytes().to_vec()
    }

    fn decode(key: &[u8], bytes: &[u8]) -> Result<Self> {
        check_width(Self::TAG, key, bytes)?;
        Ok(bytes[0] as i8)
    }
}

impl Scalar for u8 {
    const TAG: TypeTag = TypeTag::Uint8;

    fn encode(&self) -> Vec<u8> {
        vec![*self]
    }

    fn decode(key: &[u8], bytes: &[u8]) -> Result<Self> {
        check_width(Self::TAG, key, bytes)?;
        Ok(bytes[0])
    }
}

macro_rules! little_endian_scalar {
    ($($ty:ty => $tag:ident, $read:ident, $write:ident;)*) => {
        $(
            impl Scalar for $ty {
                const TAG: TypeTag = TypeTag::$tag;

                fn encode(&self) -> Vec<u8> {
                    let mut buf = vec![0u8; std::mem::size_of::<$ty>()];
                    LittleEndian::$write(&mut buf, *self);
                    buf
                }

                fn decode(key: &[u8], bytes: &[u8]) -> Result<Self> {
                    check_width(Self::TAG, key, bytes)?;
                    Ok(LittleEndian::$read(bytes))
                }
            }
        )*
    };
}

little_endian_scalar! {
    i16 => Int16, read_i16, write_i16;
    i32 => Int32, read_i32, write_i32;
    i64 => Int64, read_i64, write_i64;
    u16 => Uint16, read_u16, write_u16;
    u32 => Uint32, read_u32, write_u32;
    u64 => Uint64, read_u64, write_u64;
    f32 => Float32, read_f32, write_f32;
    f64 => Float64, read_f64, write_f64;
}

impl Scalar for String {
    const TAG: TypeTag = TypeTag::String;

    fn encode(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    fn decode(key: &[u8], bytes: &[u8]) -> Result<Self> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::codec(key, format!("invalid UTF-8 string: {}", e)))
    }
}

macro_rules! persistent_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Persistent for $ty {
                fn tag(&self) -> TypeTag {
                    <$ty as Scalar>::TAG
                }

                fn persist(&self, store: &dyn Store, key: &[u8]) -> Result<()> {
                    persist_scalar(self, store, key)
                }

                fn restore(&mut self, store: &dyn Store, key: &[u8]) -> Result<()> {
                    *self = restore_scalar(store, key)?;
                    Ok(())
                }

                fn placeholder(tag: TypeTag) -> Option<Self> {
                    (tag == <$ty as Scalar>::TAG).then(<$ty>::default)
                }
            }
        )*
    };
}

persistent_scalar!(bool, Byte, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, String);
