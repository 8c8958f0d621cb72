//! # tabwatch Storage
//!
//! Persisted local key/value state: the listening-window identifier, the
//! extension activity flag, and the research-URL cache. Values are JSON;
//! the file-backed store writes the whole map on every mutation, which is
//! fine at this scale (three keys, one of them a per-session URL cache).

pub mod error;
pub mod keys;
pub mod store;

pub use error::StorageError;
pub use store::{FileStateStore, MemoryStateStore, StateStore};
