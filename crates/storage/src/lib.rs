//! Storage layer for typedkv
//!
//! The codecs only depend on the `Store` contract from `typedkv-core`. This
//! crate ships the reference implementation:
//! - MemoryStore: DashMap + FxHasher, safe for concurrent disjoint-key access

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;

pub use memory::MemoryStore;
