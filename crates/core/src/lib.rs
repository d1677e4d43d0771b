//! Core types and traits for typedkv
//!
//! This crate defines the foundational pieces shared by every layer:
//! - TypeTag: one-byte discriminator for every persistable kind
//! - Key composition: tag prefixes, list metadata keys, element and field keys
//! - Error: error type hierarchy
//! - Store: the byte-keyed save/load contract

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod key;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use key::{
    compose_key, display_key, element_key, field_key, list_key, list_length_key, list_tag_key,
};
pub use traits::Store;
pub use types::TypeTag;
