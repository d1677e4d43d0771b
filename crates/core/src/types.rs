//! Type tags for typedkv
//!
//! Every persisted value is self-describing: the composed key carries a
//! one-byte tag naming the kind that was written, so decode always knows
//! what it is reading.

use std::fmt;

/// Type tag for discriminating persisted kinds
///
/// ## TypeTag Values
///
/// These values are part of the persisted format and MUST NOT change:
/// - Undefined = 0x00 (empty lists, record elements)
/// - Bool = 0x01
/// - Int8 = 0x02, Int16 = 0x03, Int32 = 0x04, Int64 = 0x05
/// - Uint8 = 0x06, Uint16 = 0x07, Uint32 = 0x08, Uint64 = 0x09
/// - Float32 = 0x0A, Float64 = 0x0B
/// - String = 0x0C
/// - List = 0x0D
/// - Byte = 0x0E
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TypeTag {
    /// No recorded kind
    Undefined = 0x00,
    /// Boolean, one byte
    Bool = 0x01,
    /// Signed 8-bit integer
    Int8 = 0x02,
    /// Signed 16-bit integer
    Int16 = 0x03,
    /// Signed 32-bit integer
    Int32 = 0x04,
    /// Signed 64-bit integer
    Int64 = 0x05,
    /// Unsigned 8-bit integer
    Uint8 = 0x06,
    /// Unsigned 16-bit integer
    Uint16 = 0x07,
    /// Unsigned 32-bit integer
    Uint32 = 0x08,
    /// Unsigned 64-bit integer
    Uint64 = 0x09,
    /// IEEE-754 single precision float
    Float32 = 0x0A,
    /// IEEE-754 double precision float
    Float64 = 0x0B,
    /// UTF-8 string, unprefixed
    String = 0x0C,
    /// Ordered list of values sharing one tag
    List = 0x0D,
    /// Raw byte
    Byte = 0x0E,
}

impl TypeTag {
    /// Every tag, in byte order
    pub const ALL: [TypeTag; 15] = [
        TypeTag::Undefined,
        TypeTag::Bool,
        TypeTag::Int8,
        TypeTag::Int16,
        TypeTag::Int32,
        TypeTag::Int64,
        TypeTag::Uint8,
        TypeTag::Uint16,
        TypeTag::Uint32,
        TypeTag::Uint64,
        TypeTag::Float32,
        TypeTag::Float64,
        TypeTag::String,
        TypeTag::List,
        TypeTag::Byte,
    ];

    /// Convert to byte representation
    pub fn as_byte(&self) -> u8 {
        *self as u8
    }

    /// Try to create from byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::ALL.get(byte as usize).copied()
    }

    /// Encoded width in bytes for fixed-size kinds
    ///
    /// Returns `None` for kinds whose length is delimited by the store
    /// (String) or that do not encode to a single value (List, Undefined).
    pub fn width(&self) -> Option<usize> {
        match self {
            TypeTag::Bool | TypeTag::Int8 | TypeTag::Uint8 | TypeTag::Byte => Some(1),
            TypeTag::Int16 | TypeTag::Uint16 => Some(2),
            TypeTag::Int32 | TypeTag::Uint32 | TypeTag::Float32 => Some(4),
            TypeTag::Int64 | TypeTag::Uint64 | TypeTag::Float64 => Some(8),
            TypeTag::String | TypeTag::List | TypeTag::Undefined => None,
        }
    }

    /// True for every kind handled by the scalar codec
    pub fn is_scalar(&self) -> bool {
        !matches!(self, TypeTag::List | TypeTag::Undefined)
    }

    /// Human readable name
    pub fn name(&self) -> &'static str {
        match self {
            TypeTag::Undefined => "undefined",
            TypeTag::Bool => "bool",
            TypeTag::Int8 => "int8",
            TypeTag::Int16 => "int16",
            TypeTag::Int32 => "int32",
            TypeTag::Int64 => "int64",
            TypeTag::Uint8 => "uint8",
            TypeTag::Uint16 => "uint16",
            TypeTag::Uint32 => "uint32",
            TypeTag::Uint64 => "uint64",
            TypeTag::Float32 => "float32",
            TypeTag::Float64 => "float64",
            TypeTag::String => "string",
            TypeTag::List => "list",
            TypeTag::Byte => "byte",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
