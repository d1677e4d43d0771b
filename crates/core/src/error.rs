//! Error types for typedkv
//!
//! This module defines the error hierarchy shared by the store contract and
//! every codec. We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.
//!
//! ## Kinds
//!
//! - `NotFound`: the key was never written (the only kind callers commonly
//!   treat as non-fatal)
//! - `Codec`: the stored bytes do not decode into the requested kind
//! - `Io` / `Storage`: opaque failures raised by a store implementation
//! - `PartialFailure`: one or more concurrent list element writes failed
//! - `Config`: invalid configuration or worker pool construction failure

use crate::key::display_key;
use std::io;
use thiserror::Error;

fn key_location(key: &[u8]) -> String {
    if key.is_empty() {
        String::new()
    } else {
        format!(" at {}", display_key(key))
    }
}

/// Result type alias for typedkv operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for typedkv
#[derive(Debug, Error)]
pub enum Error {
    /// Key is absent from the store
    #[error("Key not found: {}", display_key(.key))]
    NotFound {
        /// The fully composed key that was looked up
        key: Vec<u8>,
    },

    /// Stored bytes cannot be decoded into the requested kind
    #[error("Codec error{}: {reason}", key_location(.key))]
    Codec {
        /// The fully composed key being decoded or encoded
        key: Vec<u8>,
        /// What went wrong
        reason: String,
    },

    /// I/O error raised by a store
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Opaque store failure that is not an I/O error
    #[error("Storage error: {0}")]
    Storage(String),

    /// One or more list elements failed to persist
    ///
    /// Only a representative error (the lowest failing index) is kept.
    /// Keys written by the elements that succeeded are not rolled back.
    #[error("{failed} of {total} list elements failed: {source}")]
    PartialFailure {
        /// Number of element tasks that failed
        failed: usize,
        /// Number of element tasks issued
        total: usize,
        /// Representative error
        #[source]
        source: Box<Error>,
    },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build a `NotFound` error for a composed key
    pub fn not_found(key: impl Into<Vec<u8>>) -> Self {
        Error::NotFound { key: key.into() }
    }

    /// Build a `Codec` error for a composed key
    pub fn codec(key: impl Into<Vec<u8>>, reason: impl Into<String>) -> Self {
        Error::Codec {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Build an opaque `Storage` error
    pub fn storage(msg: impl Into<String>) -> Self {
        Error::Storage(msg.into())
    }

    /// Build a `Config` error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// True if this error, or the representative error of a partial failure,
    /// is `NotFound`
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound { .. } => true,
            Error::PartialFailure { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// True if this error is a codec error
    pub fn is_codec(&self) -> bool {
        matches!(self, Error::Codec { .. })
    }
}
